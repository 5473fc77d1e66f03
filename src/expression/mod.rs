pub(crate) mod algebra;
pub(crate) mod args;
pub(crate) mod builtins;
pub(crate) mod context;
pub(crate) mod expr;
pub(crate) mod interpreter;
pub(crate) mod value;

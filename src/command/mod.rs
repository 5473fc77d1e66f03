pub(crate) mod behavior;
pub(crate) mod build;
pub(crate) mod change;
pub(crate) mod context;
pub(crate) mod lifecycle;
pub(crate) mod restyle;
pub(crate) mod shift;
pub(crate) mod visibility;

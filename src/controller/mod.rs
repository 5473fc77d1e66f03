pub(crate) mod draw;
pub(crate) mod session;
pub(crate) mod step;

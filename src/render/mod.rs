pub(crate) mod backend;
pub(crate) mod primitive;
pub(crate) mod recording;

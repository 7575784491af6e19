pub(crate) mod captions;
pub(crate) mod driver;
pub(crate) mod scheduler;
pub(crate) mod state;

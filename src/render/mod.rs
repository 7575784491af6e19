pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod paint;
pub(crate) mod recording;
pub(crate) mod state;
pub(crate) mod surface;

pub(crate) mod compose;
pub(crate) mod environment;
pub(crate) mod lion;
pub(crate) mod monkey;

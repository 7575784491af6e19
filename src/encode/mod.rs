//! Frame sinks for offline output.
//!
//! Sinks receive rendered loop frames in order; the offline session drives them.

pub(crate) mod ffmpeg;
pub(crate) mod png;
pub(crate) mod sink;

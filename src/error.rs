//! Fatal-path error type.
//!
//! Only the two lifecycle failures that abort the tracer (§7: AttachFailed,
//! UnknownStop) are represented here. Every other failure mode in the spec
//! (PatchFailed, ReadFailed, UnmappedHit, InvalidArgument) degrades silently
//! by construction — the handler returns `Option::None` or simply does
//! nothing, never a `Result` the caller has to unwrap.

use std::fmt;

#[derive(Debug)]
pub enum TracerError {
    /// `/proc/<pid>/task` couldn't be enumerated, or attaching to a thread
    /// found there failed.
    AttachFailed(String),
    /// `waitpid` returned a status that was neither exited nor stopped.
    UnknownStop(String),
}

impl fmt::Display for TracerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TracerError::AttachFailed(msg) => write!(f, "failed to attach to target: {}", msg),
            TracerError::UnknownStop(msg) => write!(f, "unexpected wait status: {}", msg),
        }
    }
}

impl std::error::Error for TracerError {}

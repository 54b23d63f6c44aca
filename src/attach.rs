//! Thread enumeration and attach lifecycle (§4.2).

use nix::sys::ptrace;
use nix::sys::wait::{waitpid, WaitPidFlag};
use nix::unistd::Pid;
use std::fs;

use crate::error::TracerError;
use crate::log::LogLevel::LogWarn;

pub struct ThreadAttacher;

impl ThreadAttacher {
    /// Attaches to every thread listed under `/proc/<pid>/task`, then stops
    /// the main thread via `tkill` so breakpoint patching is safe. Fails
    /// only if `/proc/<pid>/task` can't be enumerated at all — a single
    /// thread failing to attach is logged and skipped, the rest proceed.
    pub fn attach_all(pid: Pid) -> Result<(), TracerError> {
        let task_dir = format!("/proc/{}/task", pid);
        let entries =
            fs::read_dir(&task_dir).map_err(|e| TracerError::AttachFailed(e.to_string()))?;

        for entry in entries.flatten() {
            let tid: i32 = match entry.file_name().to_string_lossy().parse() {
                Ok(tid) => tid,
                Err(_) => continue,
            };
            let tid = Pid::from_raw(tid);

            if let Err(e) = ptrace::attach(tid) {
                log!(LogWarn, "failed to attach to thread {}: {}", tid, e);
                continue;
            }
            if let Err(e) = waitpid(tid, Some(WaitPidFlag::__WALL)) {
                log!(LogWarn, "failed to wait for thread {} to stop: {}", tid, e);
                continue;
            }
            if let Err(e) = ptrace::cont(tid, None) {
                log!(LogWarn, "failed to continue thread {} after attach: {}", tid, e);
            }
        }

        // Kernel has no safe ptrace wrapper for tkill(2); it's a
        // thread-directed signal, not a process-directed one.
        let ret = unsafe { libc::syscall(libc::SYS_tkill, pid.as_raw(), libc::SIGSTOP) };
        if ret != 0 {
            return Err(TracerError::AttachFailed(format!(
                "tkill(SIGSTOP) on main thread {} failed",
                pid
            )));
        }

        waitpid(pid, None).map_err(|e| TracerError::AttachFailed(e.to_string()))?;
        Ok(())
    }
}

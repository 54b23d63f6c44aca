//! The tracer loop state machine (§4.4). Single-threaded, sole writer of
//! both `BreakpointTable` byte state and `Level` state — that's what makes
//! the arm/disarm/single-step dance race-free even though hits can arrive
//! from any thread of the target.

use nix::sys::ptrace;
use nix::sys::signal::Signal;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::Pid;

use crate::breakpoint::BreakpointTable;
use crate::dispatcher::Dispatcher;
use crate::error::TracerError;
use crate::level::Level;
use crate::log::LogLevel::{LogDebug, LogWarn};
use crate::reporter::Reporter;

const SIGSTOP_RAW: i32 = 19;
/// Not a portable assumption: this build/kernel combination also treats
/// signal 21 as a transparent attach-time stop (§9 Design Notes).
const SIGSTOP_EQUIVALENT_RAW: i32 = 21;

pub struct TracerLoop;

impl TracerLoop {
    /// Runs until the target exits (`Ok(())`) or an unrecoverable wait
    /// result is observed (`Err(TracerError::UnknownStop)`).
    pub fn run(
        breakpoints: &BreakpointTable,
        level: &mut Level,
        reporter: &mut Reporter,
    ) -> Result<(), TracerError> {
        loop {
            let status = waitpid(Pid::from_raw(-1), Some(WaitPidFlag::__WALL))
                .map_err(|e| TracerError::UnknownStop(e.to_string()))?;

            match status {
                WaitStatus::Exited(_, _) => return Ok(()),
                WaitStatus::Stopped(tid, sig) => {
                    Self::handle_stop(tid, sig, breakpoints, level, reporter);
                }
                other => {
                    return Err(TracerError::UnknownStop(format!("{:?}", other)));
                }
            }
        }
    }

    fn handle_stop(
        tid: Pid,
        sig: Signal,
        breakpoints: &BreakpointTable,
        level: &mut Level,
        reporter: &mut Reporter,
    ) {
        let raw = sig as i32;
        if sig == Signal::SIGTRAP {
            Self::handle_trap(tid, breakpoints, level, reporter);
        } else if raw == SIGSTOP_RAW || raw == SIGSTOP_EQUIVALENT_RAW {
            if raw == SIGSTOP_EQUIVALENT_RAW {
                log!(LogDebug, "treating signal 21 on tid {} as a transparent stop", tid);
            }
            let _ = ptrace::cont(tid, None);
        } else {
            let _ = ptrace::cont(tid, Some(sig));
        }
    }

    fn handle_trap(
        tid: Pid,
        breakpoints: &BreakpointTable,
        level: &mut Level,
        reporter: &mut Reporter,
    ) {
        let regs = match ptrace::getregs(tid) {
            Ok(regs) => regs,
            Err(e) => {
                log!(LogWarn, "failed to read registers for tid {}: {}", tid, e);
                let _ = ptrace::cont(tid, None);
                return;
            }
        };

        let bp = match breakpoints.find_by_rip(regs.rip) {
            Some(bp) => *bp,
            None => {
                // UnmappedHit (§7): pass through untouched.
                let _ = ptrace::cont(tid, None);
                return;
            }
        };

        Dispatcher::dispatch(bp.hook, tid, &regs, level);
        reporter.maybe_emit(level);

        breakpoints.disarm(tid, &bp);

        let mut rewound = regs;
        rewound.rip -= 1;
        if let Err(e) = ptrace::setregs(tid, rewound) {
            log!(LogWarn, "failed to rewind rip for tid {}: {}", tid, e);
        }

        if let Err(e) = ptrace::step(tid, None) {
            log!(LogWarn, "failed to single-step tid {}: {}", tid, e);
        } else {
            let _ = waitpid(tid, Some(WaitPidFlag::__WALL));
        }

        breakpoints.rearm(tid, &bp);
        let _ = ptrace::cont(tid, None);
    }
}

//! Thin driver: parses the PID argument, attaches, installs breakpoints,
//! spawns the reporter worker, then hands off to the tracer loop.

use nix::sys::ptrace;
use nix::unistd::Pid;
use std::process::ExitCode;

use shadow_tracer::attach::ThreadAttacher;
use shadow_tracer::breakpoint::BreakpointTable;
use shadow_tracer::cli::Options;
use shadow_tracer::hooks::HOOK_TABLE;
use shadow_tracer::level::Level;
use shadow_tracer::log::LogLevel::{LogError, LogInfo};
use shadow_tracer::reporter::{spawn_worker, Reporter, StdoutTransport};
use shadow_tracer::log;
use shadow_tracer::tracer::TracerLoop;

fn main() -> ExitCode {
    let options = Options::from_args();
    let pid = Pid::from_raw(options.pid);

    if let Err(e) = ThreadAttacher::attach_all(pid) {
        log!(LogError, "{}", e);
        return ExitCode::FAILURE;
    }
    log!(LogInfo, "attached to all threads of pid {}", pid);

    let breakpoints = BreakpointTable::install(pid, HOOK_TABLE);

    let (sender, receiver) = crossbeam_channel::unbounded();
    let worker = spawn_worker(receiver, Box::new(StdoutTransport));

    let mut level = Level::new();
    let mut reporter = Reporter::new(sender);
    reporter.emit_initial(&level);

    if let Err(e) = ptrace::cont(pid, None) {
        log!(LogError, "failed to resume target after patching: {}", e);
        return ExitCode::FAILURE;
    }

    let result = TracerLoop::run(&breakpoints, &mut level, &mut reporter);

    // Dropping `reporter` drops its sender, which closes the channel and
    // lets the worker drain and exit (§5 Cancellation).
    drop(reporter);
    let _ = worker.join();

    match result {
        Ok(()) => {
            log!(LogInfo, "target exited, shutting down");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log!(LogError, "{}", e);
            ExitCode::FAILURE
        }
    }
}

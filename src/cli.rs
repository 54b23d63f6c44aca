//! Command-line surface: a single positional PID, parsed the way the
//! teacher's `commands::rd_options` module parses its subcommands.

use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "shadow-tracer",
    about = "Attach to a running game server process and publish a live JSON snapshot of its players, weather and time of day."
)]
pub struct Options {
    /// PID of the target process to attach to.
    pub pid: libc::pid_t,
}

impl Options {
    pub fn from_args() -> Options {
        <Options as StructOpt>::from_args()
    }
}

//! Breakpoint arm/disarm bookkeeping (§4.3).

use nix::sys::ptrace;
use nix::unistd::Pid;

use crate::hooks::HookId;
use crate::log::LogLevel::LogWarn;

const INT3_OPCODE: i64 = 0xCC;

/// `(address, hook id, saved_word)`. `saved_word` is the full machine word
/// read from the target *before* patching; arming only ever touches the
/// low byte.
#[derive(Copy, Clone, Debug)]
pub struct Breakpoint {
    pub address: u64,
    pub hook: HookId,
    saved_word: i64,
}

impl Breakpoint {
    fn armed_word(&self) -> i64 {
        (self.saved_word & !0xFF) | INT3_OPCODE
    }
}

#[derive(Default)]
pub struct BreakpointTable {
    breakpoints: Vec<Breakpoint>,
}

impl BreakpointTable {
    pub fn new() -> BreakpointTable {
        BreakpointTable::default()
    }

    /// Reads and patches every address in `table`. An individual patch
    /// failure (`PatchFailed`, §7) only skips that entry; the rest still
    /// install.
    pub fn install(pid: Pid, table: &[(u64, HookId)]) -> BreakpointTable {
        let mut breakpoints = Vec::with_capacity(table.len());
        for &(address, hook) in table {
            match Self::peek(pid, address) {
                Ok(saved_word) => {
                    let bp = Breakpoint {
                        address,
                        hook,
                        saved_word,
                    };
                    if Self::poke(pid, address, bp.armed_word()).is_ok() {
                        breakpoints.push(bp);
                    } else {
                        log!(LogWarn, "failed to arm breakpoint at {:#x}, skipping", address);
                    }
                }
                Err(_) => {
                    log!(
                        LogWarn,
                        "failed to read original instruction at {:#x}, skipping",
                        address
                    );
                }
            }
        }
        BreakpointTable { breakpoints }
    }

    pub fn find_by_rip(&self, rip: u64) -> Option<&Breakpoint> {
        self.breakpoints.iter().find(|bp| bp.address + 1 == rip)
    }

    /// Restores the original word at `bp`'s address (the step before
    /// single-stepping over the trapped instruction).
    pub fn disarm(&self, pid: Pid, bp: &Breakpoint) {
        if Self::poke(pid, bp.address, bp.saved_word).is_err() {
            log!(
                LogWarn,
                "failed to disarm breakpoint at {:#x}",
                bp.address
            );
        }
    }

    /// Re-installs the trap byte after the single step completes.
    pub fn rearm(&self, pid: Pid, bp: &Breakpoint) {
        if Self::poke(pid, bp.address, bp.armed_word()).is_err() {
            log!(LogWarn, "failed to re-arm breakpoint at {:#x}", bp.address);
        }
    }

    fn peek(pid: Pid, address: u64) -> nix::Result<i64> {
        ptrace::read(pid, address as usize as ptrace::AddressType)
    }

    fn poke(pid: Pid, address: u64, word: i64) -> nix::Result<()> {
        unsafe {
            ptrace::write(
                pid,
                address as usize as ptrace::AddressType,
                word as usize as ptrace::AddressType,
            )
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Exercises the bit arithmetic in isolation (no real ptrace): arming
    /// then disarming must leave the original word untouched (§8 property
    /// 7), and only the low byte may ever change while armed.
    #[test]
    fn arm_then_disarm_round_trips_to_the_original_word() {
        let saved_word: i64 = 0x1122_3344_5566_7788u64 as i64;
        let bp = Breakpoint {
            address: 0x1000,
            hook: HookId::ActorSetPos,
            saved_word,
        };
        let armed = bp.armed_word();
        assert_eq!(armed & 0xFF, INT3_OPCODE);
        assert_eq!(armed & !0xFF, saved_word & !0xFF);
        // "disarm" is just writing back saved_word verbatim.
        assert_eq!(saved_word, bp.saved_word);
    }

    #[test]
    fn find_by_rip_matches_address_plus_one() {
        let mut table = BreakpointTable::new();
        table.breakpoints.push(Breakpoint {
            address: 0x1000,
            hook: HookId::ActorSetPos,
            saved_word: 0,
        });
        assert!(table.find_by_rip(0x1001).is_some());
        assert!(table.find_by_rip(0x1000).is_none());
        assert!(table.find_by_rip(0x2001).is_none());
    }
}

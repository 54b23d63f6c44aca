//! Typed reads of the tracee's address space (§4.1).
//!
//! Every read goes through `process_vm_readv` rather than `PTRACE_PEEKTEXT`
//! loops: it's one syscall regardless of length, and it's what the rest of
//! the ptrace-based debuggers in this space reach for to read
//! non-register-sized data.

use nix::sys::uio::{process_vm_readv, RemoteIoVec};
use nix::unistd::Pid;
use std::io::IoSliceMut;

use crate::vec3::Vec3;

#[derive(Debug)]
pub struct ReadFailed;

/// Stateless: every method takes the tracee's pid and the remote address
/// explicitly, matching §4.1's `read(pid, remote_addr, len)` signature.
pub struct TargetMemory;

impl TargetMemory {
    /// Copies `len` bytes from `remote_addr` in `pid`'s address space.
    /// Fails if the kernel copies fewer bytes than requested — a partial
    /// read is treated as no read at all (§4.1: "failure if the call
    /// returns fewer than len bytes").
    pub fn read(pid: Pid, remote_addr: u64, len: usize) -> Result<Vec<u8>, ReadFailed> {
        let mut buf = vec![0u8; len];
        let remote = [RemoteIoVec {
            base: remote_addr as usize,
            len,
        }];
        let mut local = [IoSliceMut::new(&mut buf)];
        match process_vm_readv(pid, &mut local, &remote) {
            Ok(n) if n == len => Ok(buf),
            _ => Err(ReadFailed),
        }
    }

    /// A 12-byte read reinterpreted as three little-endian floats (§4.1).
    pub fn read_vec3(pid: Pid, addr: u64) -> Result<Vec3, ReadFailed> {
        let bytes = TargetMemory::read(pid, addr, Vec3::SIZE)?;
        Ok(Vec3::from_le_bytes(&bytes))
    }

    /// Reads a target string object laid out as `(data_pointer: u64,
    /// length: usize)` at `addr`, then `length` bytes from `data_pointer`
    /// (§4.1). This is an ABI assumption about the target's standard
    /// long-string representation, not something this crate can verify.
    pub fn read_string(pid: Pid, addr: u64) -> Result<String, ReadFailed> {
        const HEADER_SIZE: usize = 16;
        let header = TargetMemory::read(pid, addr, HEADER_SIZE)?;
        let data_pointer = u64::from_le_bytes(header[0..8].try_into().unwrap());
        let length = u64::from_le_bytes(header[8..16].try_into().unwrap()) as usize;

        let data = TargetMemory::read(pid, data_pointer, length)?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

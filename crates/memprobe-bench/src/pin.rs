//! Optional CPU pinning of the benchmark thread.

use std::io;

/// Pin the calling thread to CPU 0. Best effort: the error is returned for
/// logging, never treated as fatal.
#[cfg(target_os = "linux")]
pub fn pin_current_thread() -> io::Result<usize> {
    // SAFETY: cpu_set_t is plain data; zeroed is a valid empty set and the
    // size passed matches the struct handed to the kernel.
    let rc = unsafe {
        let mut set: libc::cpu_set_t = std::mem::zeroed();
        libc::CPU_ZERO(&mut set);
        libc::CPU_SET(0, &mut set);
        libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &set)
    };
    if rc != 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(0)
}

#[cfg(not(target_os = "linux"))]
pub fn pin_current_thread() -> io::Result<usize> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "thread pinning is only implemented on linux",
    ))
}

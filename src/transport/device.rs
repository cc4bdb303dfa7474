//! # Device Transport
//!
//! Writes encoded bytes to a printer device node such as `/dev/usb/lp0`,
//! `/dev/ttyUSB0` or `/dev/rfcomm0`.
//!
//! ## TTY Configuration
//!
//! If the device is a TTY it is switched to raw mode so binary data is
//! transmitted without modification:
//!
//! - **No input processing** and no XON/XOFF flow control
//! - **No output processing**: OPOST disabled (no CR/LF translation)
//! - **8-bit characters**: CS8, no parity
//! - **Non-canonical, no echo**
//!
//! Non-TTY devices (USB line printers, plain files) are written as-is.
//!
//! ## Chunked Writes
//!
//! Large buffers are written in chunks with a short pause between them so
//! slow links do not overflow the printer's input buffer. Failed writes are
//! reported, never retried.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::EstampaError;

/// Default device path
pub const DEFAULT_DEVICE: &str = "/dev/usb/lp0";

/// Default chunk size for writes (bytes)
const CHUNK_SIZE: usize = 4096;

/// Delay between chunks (milliseconds)
const CHUNK_DELAY_MS: u64 = 2;

/// # Printer Device Transport
///
/// ## Example
///
/// ```no_run
/// use estampa::{Encoder, transport::DeviceTransport};
///
/// let mut enc = Encoder::new();
/// enc.init();
/// enc.write_text("Hello");
/// enc.cut();
///
/// let mut transport = DeviceTransport::open("/dev/usb/lp0")?;
/// enc.send_to(&mut transport)?;
/// # Ok::<(), estampa::EstampaError>(())
/// ```
pub struct DeviceTransport {
    file: File,
    chunk_size: usize,
    chunk_delay: Duration,
}

impl DeviceTransport {
    /// Open a printer device for writing.
    ///
    /// ## Errors
    ///
    /// Returns an error if:
    /// - The device doesn't exist
    /// - Permission denied (may need the `lp` or `dialout` group)
    /// - TTY configuration fails
    pub fn open<P: AsRef<Path>>(device: P) -> Result<Self, EstampaError> {
        let path = device.as_ref();

        let file = OpenOptions::new().write(true).open(path).map_err(|e| {
            EstampaError::Transport(format!("Failed to open {}: {}", path.display(), e))
        })?;

        configure_raw(&file)?;
        debug!(device = %path.display(), "opened printer device");

        Ok(Self {
            file,
            chunk_size: CHUNK_SIZE,
            chunk_delay: Duration::from_millis(CHUNK_DELAY_MS),
        })
    }

    /// Open with default device path (/dev/usb/lp0)
    pub fn open_default() -> Result<Self, EstampaError> {
        Self::open(DEFAULT_DEVICE)
    }

    /// Set the chunk size for large writes. Default is 4096 bytes.
    pub fn set_chunk_size(&mut self, size: usize) {
        self.chunk_size = size.max(1);
    }

    /// Set the delay between chunks. Default is 2ms.
    pub fn set_chunk_delay(&mut self, delay: Duration) {
        self.chunk_delay = delay;
    }
}

impl Write for DeviceTransport {
    /// Writes at most one chunk per call.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let end = buf.len().min(self.chunk_size);
        let written = self.file.write(&buf[..end])?;
        if written == self.chunk_size && buf.len() > end && !self.chunk_delay.is_zero() {
            thread::sleep(self.chunk_delay);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}

/// Put a TTY into raw mode; leave anything else alone.
///
/// IXON/IXOFF/IXANY are cleared because 0x11 (XON) and 0x13 (XOFF) appear
/// in raster data and length fields.
#[cfg(unix)]
fn configure_raw(file: &File) -> Result<(), EstampaError> {
    use std::mem::MaybeUninit;
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    if unsafe { libc::isatty(fd) } != 1 {
        return Ok(());
    }

    let mut termios = MaybeUninit::uninit();
    let result = unsafe { libc::tcgetattr(fd, termios.as_mut_ptr()) };
    if result != 0 {
        return Err(EstampaError::Transport(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }
    let mut termios = unsafe { termios.assume_init() };

    termios.c_iflag &= !(libc::IGNBRK
        | libc::BRKINT
        | libc::PARMRK
        | libc::ISTRIP
        | libc::INLCR
        | libc::IGNCR
        | libc::ICRNL
        | libc::IXON
        | libc::IXOFF
        | libc::IXANY);
    termios.c_oflag &= !libc::OPOST;
    termios.c_lflag &= !(libc::ECHO | libc::ECHONL | libc::ICANON | libc::ISIG | libc::IEXTEN);
    termios.c_cflag &= !(libc::CSIZE | libc::PARENB);
    termios.c_cflag |= libc::CS8;

    let result = unsafe { libc::tcsetattr(fd, libc::TCSANOW, &termios) };
    if result != 0 {
        return Err(EstampaError::Transport(format!(
            "tcsetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    Ok(())
}

#[cfg(not(unix))]
fn configure_raw(_file: &File) -> Result<(), EstampaError> {
    Ok(())
}

//! # Printer Transport Layer
//!
//! The encoder only produces bytes; any [`std::io::Write`] can receive them
//! through [`crate::Encoder::send_to`]. This module adds a writer for
//! printer device nodes (USB line printer, serial, RFCOMM).
//!
//! ## Available Transports
//!
//! - [`device`]: Character device opened write-only, raw TTY mode on Unix

pub mod device;

pub use device::DeviceTransport;

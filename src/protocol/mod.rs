//! # ESC/POS Protocol Implementation
//!
//! This module provides stateless command builders for the ESC/POS command
//! family used by thermal receipt printers. Every builder returns the exact
//! bytes for one command; state tracking lives in [`crate::encoder`].
//!
//! ## Module Structure
//!
//! - [`commands`]: Basic printer commands (init, cut, feed, positioning, drawer)
//! - [`text`]: Text styling and the alignment/language/font tables
//! - [`barcode`]: Linear barcodes, HRI settings and 2D symbols
//! - [`graphics`]: Graphics blocks, raster images and downloaded bit images
//!
//! ## Usage Example
//!
//! ```
//! use estampa::protocol::{commands, text};
//!
//! let mut data = Vec::new();
//! data.extend(commands::init());
//! data.extend(text::align(text::Alignment::Center));
//! data.extend(text::emphasize(true));
//! data.extend(b"RECEIPT");
//! data.extend(text::emphasize(false));
//! data.extend(commands::feed_lines(1));
//! data.extend(commands::cut());
//! ```

pub mod barcode;
pub mod commands;
pub mod graphics;
pub mod text;

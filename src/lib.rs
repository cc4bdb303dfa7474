//! # Estampa - ESC/POS Command Encoder
//!
//! Estampa turns structured print instructions into the byte stream spoken
//! by ESC/POS thermal receipt printers. It provides:
//!
//! - **Protocol implementation**: stateless ESC/POS command builders
//! - **Encoder**: printer state tracking and an append-only output buffer
//! - **Node dispatch**: `text`, `feed`, `cut`, `pulse` and `image` nodes
//!   from an upstream document parser
//! - **Transport**: a raw device writer for the CLI
//!
//! ## Quick Start
//!
//! ```
//! use estampa::{Encoder, Node};
//!
//! let mut enc = Encoder::new();
//! enc.init();
//!
//! enc.dispatch(&Node::new("text").with_param("align", "center").with_param("em", "1").with_data("RECEIPT"))?;
//! enc.dispatch(&Node::new("feed").with_param("line", "2"))?;
//! enc.dispatch(&Node::new("cut").with_param("type", "feed"))?;
//!
//! assert_eq!(enc.read_text(), "RECEIPT");
//!
//! let mut out = Vec::new();
//! enc.send_to(&mut out)?;
//! # Ok::<(), estampa::EstampaError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`protocol`] | ESC/POS command builders |
//! | [`encoder`] | Stateful encoder and node dispatcher |
//! | [`transport`] | Device output |
//! | [`error`] | Error types |

pub mod encoder;
pub mod error;
pub mod protocol;
pub mod transport;

// Re-exports for convenience
pub use encoder::{Encoder, Node, PrinterState};
pub use error::EstampaError;

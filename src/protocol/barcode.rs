//! # ESC/POS Barcode Commands
//!
//! Linear barcodes are configured with a handful of single-byte settings
//! (HRI position, HRI font, bar height) and then printed with `GS k`.
//! None of the settings are tracked by the encoder; each call emits its
//! command immediately.
//!
//! ```
//! use estampa::protocol::barcode::{self, HriFont, HriPosition};
//!
//! let mut data = Vec::new();
//! data.extend(barcode::height(50));
//! data.extend(barcode::hri_position(HriPosition::Below));
//! data.extend(barcode::hri_font(HriFont::B));
//! data.extend(barcode::code39("*00014*"));
//! ```

use super::commands::{ESC, GS, NUL, u16_le};
use crate::error::EstampaError;

/// Barcode system selector for CODE39 in the NUL-terminated `GS k` form.
pub const CODE39: u8 = 4;

/// Where the human-readable interpretation (HRI) is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HriPosition {
    #[default]
    None = 0,
    Above = 1,
    Below = 2,
    Both = 3,
}

/// HRI font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HriFont {
    /// 12×24
    #[default]
    A = 0,
    /// 9×17
    B = 1,
}

/// # Print CODE39 Barcode (GS k 4 d1...dk NUL)
///
/// The data is sent verbatim and terminated by a NUL byte.
///
/// ```
/// use estampa::protocol::barcode;
///
/// assert_eq!(barcode::code39("AB"), vec![0x1D, b'k', 4, b'A', b'B', 0]);
/// ```
pub fn code39(data: &str) -> Vec<u8> {
    let mut cmd = Vec::with_capacity(4 + data.len());
    cmd.extend([GS, b'k', CODE39]);
    cmd.extend(data.as_bytes());
    cmd.push(NUL);
    cmd
}

/// # Select HRI Print Position (GS H n)
pub fn hri_position(pos: HriPosition) -> Vec<u8> {
    vec![GS, b'H', pos as u8]
}

/// # Select HRI Font (GS f n)
pub fn hri_font(font: HriFont) -> Vec<u8> {
    vec![GS, b'f', font as u8]
}

/// # Set Barcode Height (GS h n)
///
/// `n` is the bar height in dots, sent as a raw byte.
pub fn height(n: u8) -> Vec<u8> {
    vec![GS, b'h', n]
}

/// # Print 2D Symbol (ESC Z m n k dL dH d1...dk)
///
/// ## Parameters
///
/// - `version`: Symbol version (0 = auto)
/// - `ecc`: Error correction level selector
/// - `cell`: Module size in dots
/// - `data`: Symbol content, at most 65535 bytes
pub fn qr_code(version: u8, ecc: u8, cell: u8, data: &[u8]) -> Result<Vec<u8>, EstampaError> {
    let len = u16::try_from(data.len()).map_err(|_| {
        EstampaError::InvalidParameter(format!("2D symbol data too long: {} bytes", data.len()))
    })?;
    let [lo, hi] = u16_le(len);

    let mut cmd = Vec::with_capacity(7 + data.len());
    cmd.extend([ESC, b'Z', version, ecc, cell, lo, hi]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code39_empty() {
        assert_eq!(code39(""), vec![0x1D, b'k', 4, 0]);
    }

    #[test]
    fn test_hri_position() {
        assert_eq!(hri_position(HriPosition::None), vec![0x1D, b'H', 0]);
        assert_eq!(hri_position(HriPosition::Both), vec![0x1D, b'H', 3]);
    }

    #[test]
    fn test_hri_font() {
        assert_eq!(hri_font(HriFont::B), vec![0x1D, b'f', 1]);
    }

    #[test]
    fn test_height() {
        assert_eq!(height(50), vec![0x1D, b'h', 50]);
    }

    #[test]
    fn test_qr_code_framing() {
        let cmd = qr_code(2, 1, 4, b"hello").unwrap();
        assert_eq!(&cmd[..7], &[0x1B, b'Z', 2, 1, 4, 5, 0]);
        assert_eq!(&cmd[7..], b"hello");
    }

    #[test]
    fn test_qr_code_too_long() {
        let data = vec![b'x'; 70_000];
        assert!(qr_code(0, 0, 3, &data).is_err());
    }
}

//! # ESC/POS Graphics Commands
//!
//! This module implements the length-framed graphics function block
//! (`ESC ( L`) used for raster images, plus the older downloaded bit image
//! commands (`GS *` / `GS /`).
//!
//! ## Graphics Block Framing
//!
//! ```text
//! ESC ( L  pL pH  m  fn  d1...dk
//!          └──┬─┘
//!     length = k + 2 (covers m and fn), little-endian
//! ```
//!
//! A wrong length desynchronizes the printer's parser for everything that
//! follows, so [`graphics_block`] is the only place that computes it.
//!
//! ## Raster Image Sequence
//!
//! An image is sent as two blocks:
//!
//! | Block | m | fn | Payload |
//! |-------|---|----|---------|
//! | 1 | `'0'` | `'p'` | raster header + raster data (store) |
//! | 2 | `'0'` | `'2'` | empty (print stored image) |

use super::commands::{GS, u16_le};
use crate::error::EstampaError;

/// Literal prefix of every graphics block.
pub const BLOCK_PREFIX: [u8; 3] = [0x1B, b'(', b'L'];

/// Raster header: tone `'0'`, x scale 1, y scale 1, color `'1'`.
pub const RASTER_HEADER: [u8; 4] = [b'0', 0x01, 0x01, b'1'];

/// Mode byte shared by the raster store and print functions.
pub const MODE_RASTER: u8 = b'0';

/// Function byte: store raster graphics data.
pub const FN_STORE: u8 = b'p';

/// Function byte: print stored graphics data.
pub const FN_PRINT: u8 = b'2';

/// Largest payload that fits the 16-bit length field.
pub const MAX_BLOCK_PAYLOAD: usize = u16::MAX as usize - 2;

/// # Graphics Function Block (ESC ( L pL pH m fn d1...dk)
///
/// ## Parameters
///
/// - `mode`: `m` byte
/// - `function`: `fn` byte
/// - `payload`: Raw data, appended unmodified
///
/// ## Errors
///
/// Returns [`EstampaError::InvalidParameter`] if the payload exceeds
/// [`MAX_BLOCK_PAYLOAD`] bytes.
///
/// ## Example
///
/// ```
/// use estampa::protocol::graphics;
///
/// let block = graphics::graphics_block(b'0', b'2', &[]).unwrap();
/// assert_eq!(block, vec![0x1B, b'(', b'L', 2, 0, b'0', b'2']);
/// ```
pub fn graphics_block(mode: u8, function: u8, payload: &[u8]) -> Result<Vec<u8>, EstampaError> {
    if payload.len() > MAX_BLOCK_PAYLOAD {
        return Err(EstampaError::InvalidParameter(format!(
            "graphics payload too large: {} bytes (max {})",
            payload.len(),
            MAX_BLOCK_PAYLOAD
        )));
    }
    let [lo, hi] = u16_le((payload.len() + 2) as u16);

    let mut cmd = Vec::with_capacity(BLOCK_PREFIX.len() + 4 + payload.len());
    cmd.extend_from_slice(&BLOCK_PREFIX);
    cmd.extend([lo, hi, mode, function]);
    cmd.extend_from_slice(payload);
    Ok(cmd)
}

/// # Store and Print Raster Image
///
/// Prepends [`RASTER_HEADER`] to `raster` and emits the store block
/// followed by the print block.
///
/// ## Example
///
/// ```
/// use estampa::protocol::graphics;
///
/// let cmd = graphics::raster_image(b"AB").unwrap();
/// // store block: prefix, length 8 (4 header + 2 data + 2), '0', 'p'
/// assert_eq!(&cmd[..7], &[0x1B, b'(', b'L', 8, 0, b'0', b'p']);
/// // print block
/// assert_eq!(&cmd[cmd.len() - 7..], &[0x1B, b'(', b'L', 2, 0, b'0', b'2']);
/// ```
pub fn raster_image(raster: &[u8]) -> Result<Vec<u8>, EstampaError> {
    let mut payload = Vec::with_capacity(RASTER_HEADER.len() + raster.len());
    payload.extend_from_slice(&RASTER_HEADER);
    payload.extend_from_slice(raster);

    let mut cmd = graphics_block(MODE_RASTER, FN_STORE, &payload)?;
    cmd.extend(graphics_block(MODE_RASTER, FN_PRINT, &[])?);
    Ok(cmd)
}

// ============================================================================
// DOWNLOADED BIT IMAGE (GS * / GS /)
// ============================================================================

/// # Define Downloaded Bit Image (GS * x y d1...dk)
///
/// ## Parameters
///
/// - `x`: Width in units of 8 dots (1-255)
/// - `y`: Height in units of 8 dots (1-255)
/// - `data`: Column-major image data, exactly `x * y * 8` bytes
pub fn define_bit_image(x: u8, y: u8, data: &[u8]) -> Result<Vec<u8>, EstampaError> {
    if x == 0 || y == 0 {
        return Err(EstampaError::InvalidParameter(format!(
            "bit image dimensions must be non-zero, got {}x{}",
            x, y
        )));
    }
    let expected = x as usize * y as usize * 8;
    if data.len() != expected {
        return Err(EstampaError::InvalidParameter(format!(
            "bit image data must be {} bytes, got {}",
            expected,
            data.len()
        )));
    }

    let mut cmd = Vec::with_capacity(4 + data.len());
    cmd.extend([GS, b'*', x, y]);
    cmd.extend_from_slice(data);
    Ok(cmd)
}

/// Print mode for a downloaded bit image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitImageMode {
    #[default]
    Normal = 0,
    DoubleWidth = 1,
    DoubleHeight = 2,
    Quadruple = 3,
}

/// # Print Downloaded Bit Image (GS / m)
pub fn print_bit_image(mode: BitImageMode) -> Vec<u8> {
    vec![GS, b'/', mode as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_length_counts_mode_and_function() {
        let block = graphics_block(b'0', b'p', &[1, 2, 3]).unwrap();
        assert_eq!(&block[..5], &[0x1B, b'(', b'L', 5, 0]);
        assert_eq!(&block[5..7], &[b'0', b'p']);
        assert_eq!(&block[7..], &[1, 2, 3]);
    }

    #[test]
    fn test_block_length_crosses_byte_boundary() {
        // 300 + 2 = 302 = 0x012E
        let payload = vec![0xAA; 300];
        let block = graphics_block(b'0', b'p', &payload).unwrap();
        assert_eq!(&block[3..5], &[0x2E, 0x01]);
        assert_eq!(block.len(), 3 + 4 + 300);
    }

    #[test]
    fn test_block_rejects_oversized_payload() {
        let payload = vec![0; MAX_BLOCK_PAYLOAD + 1];
        assert!(graphics_block(b'0', b'p', &payload).is_err());
        let payload = vec![0; MAX_BLOCK_PAYLOAD];
        let block = graphics_block(b'0', b'p', &payload).unwrap();
        assert_eq!(&block[3..5], &[0xFF, 0xFF]);
    }

    #[test]
    fn test_raster_image_layout() {
        let cmd = raster_image(&[0xF0, 0x0F]).unwrap();
        let expected: Vec<u8> = vec![
            0x1B, b'(', b'L', 8, 0, b'0', b'p', b'0', 1, 1, b'1', 0xF0, 0x0F, // store
            0x1B, b'(', b'L', 2, 0, b'0', b'2', // print
        ];
        assert_eq!(cmd, expected);
    }

    #[test]
    fn test_define_bit_image() {
        let data = vec![0xFF; 8];
        let cmd = define_bit_image(1, 1, &data).unwrap();
        assert_eq!(&cmd[..4], &[0x1D, b'*', 1, 1]);
        assert_eq!(cmd.len(), 12);

        assert!(define_bit_image(1, 1, &[0xFF; 7]).is_err());
        assert!(define_bit_image(0, 1, &[]).is_err());
    }

    #[test]
    fn test_print_bit_image() {
        assert_eq!(print_bit_image(BitImageMode::Normal), vec![0x1D, b'/', 0]);
        assert_eq!(print_bit_image(BitImageMode::Quadruple), vec![0x1D, b'/', 3]);
    }
}

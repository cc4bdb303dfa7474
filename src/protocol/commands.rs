//! # ESC/POS Printer Commands
//!
//! This module implements the basic control commands of the ESC/POS command
//! family used by most thermal receipt printers (Epson TM series and clones).
//!
//! ## Protocol Overview
//!
//! ESC/POS mixes literal text bytes with control sequences introduced by a
//! prefix byte. The commands here cover:
//!
//! - **Initialization**: `ESC @`
//! - **Paper control**: line feeds, micro feeds, cutting
//! - **Positioning**: absolute and relative print position, motion units
//! - **Peripherals**: cash drawer pulses
//!
//! ## Escape Sequence Structure
//!
//! Commands follow these patterns:
//! - Single byte: `HT`
//! - Two bytes: `ESC @`
//! - Multi-byte with parameters: `ESC d n`, `ESC $ nL nH`
//!
//! ## Byte Order
//!
//! Multi-byte integers use **little-endian** encoding:
//! - `u16` value 0x1234 is sent as bytes `[0x34, 0x12]`

// ============================================================================
// ESCAPE SEQUENCE CONSTANTS
// ============================================================================

/// ESC (Escape) - Command prefix byte
///
/// Most ESC/POS commands begin with ESC (0x1B).
pub const ESC: u8 = 0x1B;

/// GS (Group Separator) - Extended command prefix
///
/// Used for character size, reverse printing, barcodes and graphics.
pub const GS: u8 = 0x1D;

/// DLE (Data Link Escape) - Real-time command prefix
pub const DLE: u8 = 0x10;

/// DC4 (Device Control 4) - Second byte of the real-time pulse command
pub const DC4: u8 = 0x14;

/// HT (Horizontal Tab) - Advance to next tab position
pub const HT: u8 = 0x09;

/// NUL - Terminator for variable-length barcode data
pub const NUL: u8 = 0x00;

/// End-of-job marker understood by the target printers.
pub const END: u8 = 0xFA;

// ============================================================================
// INITIALIZATION COMMANDS
// ============================================================================

/// # Initialize Printer (ESC @)
///
/// Resets the printer to its power-on default state.
///
/// ## Protocol Details
///
/// | Format  | Bytes |
/// |---------|-------|
/// | ASCII   | ESC @ |
/// | Hex     | 1B 40 |
/// | Decimal | 27 64 |
///
/// ## Example
///
/// ```
/// use estampa::protocol::commands;
///
/// assert_eq!(commands::init(), vec![0x1B, 0x40]);
/// ```
#[inline]
pub fn init() -> Vec<u8> {
    vec![ESC, b'@']
}

/// End-of-job marker (0xFA).
#[inline]
pub fn end() -> Vec<u8> {
    vec![END]
}

/// # Select Print Mode (ESC ! n)
///
/// Sets font, emphasis, double height/width and underline in one byte.
/// `n = 0` selects the plain default mode.
#[inline]
pub fn print_mode(n: u8) -> Vec<u8> {
    vec![ESC, b'!', n]
}

// ============================================================================
// CUTTER CONTROL COMMANDS
// ============================================================================

/// # Cut Paper (GS V A 0)
///
/// Feeds to the cutter position and performs a cut. Function B form of
/// `GS V`, with the feed amount sent as the ASCII digit `'0'`.
///
/// ## Protocol Details
///
/// | Format  | Bytes         |
/// |---------|---------------|
/// | ASCII   | GS V A 0      |
/// | Hex     | 1D 56 41 30   |
///
/// ## Example
///
/// ```
/// use estampa::protocol::commands;
///
/// assert_eq!(commands::cut(), vec![0x1D, 0x56, 0x41, 0x30]);
/// ```
#[inline]
pub fn cut() -> Vec<u8> {
    vec![GS, b'V', b'A', b'0']
}

// ============================================================================
// PAPER FEED COMMANDS
// ============================================================================

/// # Print and Feed n Lines (ESC d n)
///
/// Prints the line buffer and feeds `n` lines. This is the command behind
/// both "form feed" and "line feed" in the encoder.
///
/// ## Example
///
/// ```
/// use estampa::protocol::commands;
///
/// assert_eq!(commands::feed_lines(3), vec![0x1B, 0x64, 3]);
/// ```
#[inline]
pub fn feed_lines(n: u8) -> Vec<u8> {
    vec![ESC, b'd', n]
}

/// # Print and Feed Paper (ESC J n)
///
/// Feeds the paper by `n` motion units.
#[inline]
pub fn print_and_feed(n: u8) -> Vec<u8> {
    vec![ESC, b'J', n]
}

/// # Set Line Spacing (ESC 3 n)
#[inline]
pub fn line_spacing(n: u8) -> Vec<u8> {
    vec![ESC, b'3', n]
}

/// # Set Right-Side Character Spacing (ESC SP n)
#[inline]
pub fn right_space(n: u8) -> Vec<u8> {
    vec![ESC, b' ', n]
}

// ============================================================================
// POSITIONING COMMANDS
// ============================================================================

/// # Set Absolute Print Position (ESC $ nL nH)
///
/// Moves the horizontal print position to `value` motion units from the
/// start of the line.
///
/// ## Example
///
/// ```
/// use estampa::protocol::commands;
///
/// assert_eq!(commands::absolute_x(300), vec![0x1B, 0x24, 0x2C, 0x01]);
/// ```
#[inline]
pub fn absolute_x(value: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(value);
    vec![ESC, b'$', lo, hi]
}

/// # Set Absolute Vertical Print Position (GS $ nL nH)
///
/// Page-mode vertical position; also used by the `feed` node's `unit`
/// parameter.
#[inline]
pub fn absolute_y(value: u16) -> Vec<u8> {
    let [lo, hi] = u16_le(value);
    vec![GS, b'$', lo, hi]
}

/// # Set Relative Print Position (ESC \ nL nH)
///
/// Negative offsets move left and are sent in two's complement.
#[inline]
pub fn relative_x(offset: i16) -> Vec<u8> {
    let [lo, hi] = u16_le(offset as u16);
    vec![ESC, b'\\', lo, hi]
}

/// # Set Horizontal and Vertical Motion Units (GS P x y)
#[inline]
pub fn motion_units(x: u8, y: u8) -> Vec<u8> {
    vec![GS, b'P', x, y]
}

/// Horizontal tab (HT)
#[inline]
pub fn tab() -> Vec<u8> {
    vec![HT]
}

// ============================================================================
// PERIPHERAL COMMANDS
// ============================================================================

/// # Drawer Pulse (ESC p 2)
///
/// Short pulse on the drawer kick-out connector, `t = 2` (2 × 2 ms).
#[inline]
pub fn pulse() -> Vec<u8> {
    vec![ESC, b'p', 0x02]
}

/// # Open Cash Drawer
///
/// Sends the buffered pulse `ESC p 0 2 4` (pin 2, 4 ms on, 8 ms off)
/// followed by the real-time pulse `DLE DC4 1 0 1` so the drawer opens even
/// while the printer is busy.
pub fn open_cash_drawer() -> Vec<u8> {
    vec![ESC, b'p', 0, 2, 4, DLE, DC4, 1, 0, 1]
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Encode a u16 value as little-endian bytes [low, high]
///
/// Equivalent to `[value % 256, value / 256]`.
///
/// ## Example
///
/// ```
/// use estampa::protocol::commands::u16_le;
///
/// assert_eq!(u16_le(0x1234), [0x34, 0x12]);
/// assert_eq!(u16_le(512), [0x00, 0x02]);
/// ```
#[inline]
pub const fn u16_le(value: u16) -> [u8; 2] {
    [(value % 256) as u8, (value / 256) as u8]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init() {
        assert_eq!(init(), vec![0x1B, 0x40]);
    }

    #[test]
    fn test_end() {
        assert_eq!(end(), vec![0xFA]);
    }

    #[test]
    fn test_cut() {
        assert_eq!(cut(), vec![0x1D, b'V', b'A', b'0']);
    }

    #[test]
    fn test_feed_lines() {
        assert_eq!(feed_lines(1), vec![0x1B, 0x64, 0x01]);
        assert_eq!(feed_lines(255), vec![0x1B, 0x64, 0xFF]);
    }

    #[test]
    fn test_absolute_positions() {
        assert_eq!(absolute_x(0), vec![0x1B, 0x24, 0x00, 0x00]);
        assert_eq!(absolute_x(256), vec![0x1B, 0x24, 0x00, 0x01]);
        assert_eq!(absolute_y(65535), vec![0x1D, 0x24, 0xFF, 0xFF]);
    }

    #[test]
    fn test_relative_x_negative() {
        // -1 in two's complement is 0xFFFF
        assert_eq!(relative_x(-1), vec![0x1B, b'\\', 0xFF, 0xFF]);
        assert_eq!(relative_x(10), vec![0x1B, b'\\', 10, 0]);
    }

    #[test]
    fn test_pulse() {
        assert_eq!(pulse(), vec![0x1B, b'p', 0x02]);
    }

    #[test]
    fn test_open_cash_drawer() {
        assert_eq!(
            open_cash_drawer(),
            vec![0x1B, b'p', 0, 2, 4, 0x10, 0x14, 1, 0, 1]
        );
    }

    #[test]
    fn test_u16_le() {
        assert_eq!(u16_le(0x0000), [0x00, 0x00]);
        assert_eq!(u16_le(0x00FF), [0xFF, 0x00]);
        assert_eq!(u16_le(0xFF00), [0x00, 0xFF]);
        assert_eq!(u16_le(0x1234), [0x34, 0x12]);
    }

    #[test]
    fn test_u16_le_matches_div_mod() {
        for v in [1u16, 255, 256, 257, 1000, 40000, u16::MAX] {
            assert_eq!(u16_le(v), [(v % 256) as u8, (v / 256) as u8]);
        }
    }
}

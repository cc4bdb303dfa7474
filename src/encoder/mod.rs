//! # Stateful Command Encoder
//!
//! [`Encoder`] owns the printer state and an append-only output buffer.
//! Every primitive appends its command bytes immediately; stateful
//! primitives update [`PrinterState`] in the same call so the two never
//! diverge.
//!
//! ```
//! use estampa::Encoder;
//!
//! let mut enc = Encoder::new();
//! enc.init();
//! enc.set_emphasize(true);
//! enc.write_text("TOTAL 12.00");
//! enc.linefeed(1);
//! enc.cut();
//!
//! let mut sink = Vec::new();
//! enc.send_to(&mut sink)?;
//! assert_eq!(sink, enc.as_bytes());
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! Nodes from a document parser go through [`Encoder::dispatch`].

pub mod dispatch;
pub mod entities;
pub mod node;
pub mod state;

use std::io::Write;

use crate::error::EstampaError;
use crate::protocol::barcode::{self, HriFont, HriPosition};
use crate::protocol::commands;
use crate::protocol::graphics::{self, BitImageMode};
use crate::protocol::text::{self, Alignment, Font, Language, MAX_SCALE};

pub use node::{Node, NodeKind, Params};
pub use state::PrinterState;

/// Highest underline thickness accepted by `ESC -`.
const MAX_UNDERLINE: u8 = 2;

/// ESC/POS encoder for a single document.
///
/// Not shareable between documents in flight; use one encoder per document.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    state: PrinterState,
    bytes: Vec<u8>,
    text: String,
}

impl Encoder {
    /// Create an encoder with default state and an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current printer state.
    pub fn state(&self) -> &PrinterState {
        &self.state
    }

    /// Restore default state without emitting anything.
    pub fn reset(&mut self) {
        self.state = PrinterState::default();
    }

    // ========================================================================
    // OUTPUT BUFFER
    // ========================================================================

    /// Append raw bytes.
    pub fn write_raw(&mut self, data: &[u8]) {
        self.bytes.extend_from_slice(data);
    }

    /// Append literal text. It is also recorded in [`Encoder::read_text`].
    pub fn write_text(&mut self, data: &str) {
        self.text.push_str(data);
        self.bytes.extend_from_slice(data.as_bytes());
    }

    /// Everything emitted so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Buffer length and contents.
    pub fn read_bytes(&self) -> (usize, &[u8]) {
        (self.bytes.len(), &self.bytes)
    }

    /// Literal text written so far, without control sequences.
    pub fn read_text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the whole buffer to `sink`. The buffer is left untouched, so
    /// repeated calls send identical bytes.
    pub fn send_to<W: Write + ?Sized>(&self, sink: &mut W) -> std::io::Result<usize> {
        sink.write_all(&self.bytes)?;
        sink.flush()?;
        Ok(self.bytes.len())
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    // ========================================================================
    // DOCUMENT CONTROL
    // ========================================================================

    /// Reset state and initialize the printer.
    pub fn init(&mut self) {
        self.reset();
        self.write_raw(&commands::init());
        self.send_emphasize();
        self.set_print_mode(0);
        self.send_rotate();
    }

    /// End-of-job marker.
    pub fn end(&mut self) {
        self.write_raw(&commands::end());
    }

    pub fn cut(&mut self) {
        self.write_raw(&commands::cut());
    }

    /// Drawer pulse.
    pub fn pulse(&mut self) {
        self.write_raw(&commands::pulse());
    }

    pub fn open_cash_drawer(&mut self) {
        self.write_raw(&commands::open_cash_drawer());
    }

    // ========================================================================
    // FEEDS AND SPACING
    // ========================================================================

    /// Print and feed `n` lines.
    pub fn formfeed_n(&mut self, n: u8) {
        self.write_raw(&commands::feed_lines(n));
    }

    pub fn formfeed(&mut self) {
        self.formfeed_n(1);
    }

    pub fn linefeed(&mut self, n: u8) {
        self.formfeed_n(n);
    }

    pub fn print_and_feed(&mut self, n: u8) {
        self.write_raw(&commands::print_and_feed(n));
    }

    pub fn set_line_spacing(&mut self, n: u8) {
        self.write_raw(&commands::line_spacing(n));
    }

    pub fn set_right_space(&mut self, n: u8) {
        self.write_raw(&commands::right_space(n));
    }

    pub fn set_print_mode(&mut self, n: u8) {
        self.write_raw(&commands::print_mode(n));
    }

    /// Write `pattern` `n + 1` times, then feed one line.
    pub fn print_split_line(&mut self, n: usize, pattern: &str) {
        self.write_text(&pattern.repeat(n + 1));
        self.linefeed(1);
    }

    // ========================================================================
    // POSITIONING
    // ========================================================================

    /// Absolute horizontal position, in motion units.
    pub fn set_location(&mut self, value: u16) {
        self.write_raw(&commands::absolute_x(value));
    }

    /// Horizontal position relative to the current one.
    pub fn set_relative_location(&mut self, offset: i16) {
        self.write_raw(&commands::relative_x(offset));
    }

    pub fn send_move_x(&mut self, x: u16) {
        self.write_raw(&commands::absolute_x(x));
    }

    pub fn send_move_y(&mut self, y: u16) {
        self.write_raw(&commands::absolute_y(y));
    }

    pub fn set_motion_units(&mut self, x: u8, y: u8) {
        self.write_raw(&commands::motion_units(x, y));
    }

    pub fn tab(&mut self) {
        self.write_raw(&commands::tab());
    }

    // ========================================================================
    // TEXT SETTINGS (NOT TRACKED)
    // ========================================================================

    pub fn set_align(&mut self, align: Alignment) {
        self.write_raw(&text::align(align));
    }

    pub fn set_lang(&mut self, lang: Language) {
        self.write_raw(&text::language(lang));
    }

    pub fn set_font(&mut self, font: Font) {
        self.write_raw(&text::font(font));
    }

    // ========================================================================
    // STATEFUL SETTERS
    // ========================================================================

    /// Set both size multipliers.
    ///
    /// ## Errors
    ///
    /// [`EstampaError::InvalidParameter`] unless both values are in 1-8.
    /// State and buffer are unchanged on error.
    pub fn set_font_size(&mut self, width: u8, height: u8) -> Result<(), EstampaError> {
        if !(1..=MAX_SCALE).contains(&width) || !(1..=MAX_SCALE).contains(&height) {
            return Err(EstampaError::InvalidParameter(format!(
                "invalid font size: {} x {}",
                width, height
            )));
        }
        self.state.width = width;
        self.state.height = height;
        self.send_font_size();
        Ok(())
    }

    /// Set underline thickness (0 = off, 1 or 2 dots).
    pub fn set_underline(&mut self, n: u8) -> Result<(), EstampaError> {
        if n > MAX_UNDERLINE {
            return Err(EstampaError::invalid("underline", &n.to_string()));
        }
        self.state.underline = n;
        self.send_underline();
        Ok(())
    }

    pub fn set_emphasize(&mut self, on: bool) {
        self.state.emphasize = on;
        self.send_emphasize();
    }

    pub fn set_upside_down(&mut self, on: bool) {
        self.state.upside_down = on;
        self.send_upside_down();
    }

    pub fn set_rotate(&mut self, on: bool) {
        self.state.rotate = on;
        self.send_rotate();
    }

    pub fn set_reverse(&mut self, on: bool) {
        self.state.reverse = on;
        self.send_reverse();
    }

    pub fn set_smooth(&mut self, on: bool) {
        self.state.smooth = on;
        self.send_smooth();
    }

    // Re-emit the stored value of each field.

    fn send_font_size(&mut self) {
        self.write_raw(&text::size(self.state.width, self.state.height));
    }

    fn send_underline(&mut self) {
        self.write_raw(&text::underline(self.state.underline));
    }

    fn send_emphasize(&mut self) {
        self.write_raw(&text::emphasize(self.state.emphasize));
    }

    fn send_upside_down(&mut self) {
        self.write_raw(&text::upside_down(self.state.upside_down));
    }

    fn send_rotate(&mut self) {
        self.write_raw(&text::rotate(self.state.rotate));
    }

    fn send_reverse(&mut self) {
        self.write_raw(&text::reverse(self.state.reverse));
    }

    fn send_smooth(&mut self) {
        self.write_raw(&text::smoothing(self.state.smooth));
    }

    /// Reset state and resend every tracked field, so the printer matches
    /// the defaults even if it missed earlier commands.
    pub fn resync(&mut self) {
        self.reset();
        self.send_emphasize();
        self.send_rotate();
        self.send_smooth();
        self.send_reverse();
        self.send_underline();
        self.send_upside_down();
        self.send_font_size();
        self.send_underline();
    }

    // ========================================================================
    // BARCODES
    // ========================================================================

    /// CODE39 barcode with `data` sent verbatim.
    pub fn barcode(&mut self, data: &str) {
        self.write_raw(&barcode::code39(data));
    }

    pub fn barcode_hri(&mut self, pos: HriPosition) {
        self.write_raw(&barcode::hri_position(pos));
    }

    pub fn barcode_hri_font_size(&mut self, font: HriFont) {
        self.write_raw(&barcode::hri_font(font));
    }

    pub fn barcode_height(&mut self, n: u8) {
        self.write_raw(&barcode::height(n));
    }

    pub fn qr_code(&mut self, version: u8, ecc: u8, cell: u8, data: &str) -> Result<(), EstampaError> {
        let cmd = barcode::qr_code(version, ecc, cell, data.as_bytes())?;
        self.write_raw(&cmd);
        Ok(())
    }

    // ========================================================================
    // GRAPHICS
    // ========================================================================

    /// Emit one `ESC ( L` graphics block.
    pub fn graphics_block(&mut self, mode: u8, function: u8, payload: &[u8]) -> Result<(), EstampaError> {
        let cmd = graphics::graphics_block(mode, function, payload)?;
        self.write_raw(&cmd);
        Ok(())
    }

    /// Store and print decoded raster data.
    pub fn print_raster(&mut self, raster: &[u8]) -> Result<(), EstampaError> {
        let cmd = graphics::raster_image(raster)?;
        self.write_raw(&cmd);
        Ok(())
    }

    /// Download a bit image to the printer (`x`, `y` in units of 8 dots).
    pub fn define_bit_image(&mut self, x: u8, y: u8, data: &[u8]) -> Result<(), EstampaError> {
        let cmd = graphics::define_bit_image(x, y, data)?;
        self.write_raw(&cmd);
        Ok(())
    }

    pub fn print_bit_image(&mut self, mode: BitImageMode) {
        self.write_raw(&graphics::print_bit_image(mode));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_encoder_is_empty() {
        let enc = Encoder::new();
        assert!(enc.is_empty());
        assert!(enc.state().is_default());
        assert_eq!(enc.read_text(), "");
    }

    #[test]
    fn test_font_size_all_valid() {
        for w in 1..=8u8 {
            for h in 1..=8u8 {
                let mut enc = Encoder::new();
                enc.set_font_size(w, h).unwrap();
                assert_eq!(enc.as_bytes(), &[0x1D, b'!', ((w - 1) << 4) | (h - 1)]);
                assert_eq!((enc.state().width, enc.state().height), (w, h));
            }
        }
    }

    #[test]
    fn test_font_size_out_of_range_leaves_state() {
        let mut enc = Encoder::new();
        enc.set_font_size(3, 4).unwrap();
        let before = enc.as_bytes().to_vec();

        for (w, h) in [(0, 1), (1, 0), (9, 1), (1, 9), (255, 255)] {
            let err = enc.set_font_size(w, h).unwrap_err();
            assert!(matches!(err, EstampaError::InvalidParameter(_)));
        }
        assert_eq!(enc.as_bytes(), before.as_slice());
        assert_eq!((enc.state().width, enc.state().height), (3, 4));
    }

    #[test]
    fn test_toggle_setters_update_state_and_emit() {
        let mut enc = Encoder::new();
        enc.set_underline(1).unwrap();
        enc.set_emphasize(true);
        enc.set_upside_down(true);
        enc.set_rotate(true);
        enc.set_reverse(true);
        enc.set_smooth(true);

        let state = enc.state();
        assert_eq!(state.underline, 1);
        assert!(state.emphasize && state.upside_down && state.rotate && state.reverse && state.smooth);
        assert_eq!(
            enc.as_bytes(),
            &[
                0x1B, b'-', 1, 0x1B, b'G', 1, 0x1B, b'{', 1, 0x1B, b'R', 1, 0x1D, b'B', 1, 0x1D,
                b'b', 1,
            ]
        );
    }

    #[test]
    fn test_underline_rejects_three() {
        let mut enc = Encoder::new();
        assert!(enc.set_underline(3).is_err());
        assert!(enc.is_empty());
        assert_eq!(enc.state().underline, 0);
    }

    #[test]
    fn test_send_move_x_every_value_is_four_bytes() {
        for x in (0..=u16::MAX).step_by(97).chain([u16::MAX]) {
            let mut enc = Encoder::new();
            enc.send_move_x(x);
            assert_eq!(enc.as_bytes(), &[0x1B, 0x24, (x % 256) as u8, (x / 256) as u8]);
        }
    }

    #[test]
    fn test_send_move_y() {
        let mut enc = Encoder::new();
        enc.send_move_y(513);
        assert_eq!(enc.as_bytes(), &[0x1D, 0x24, 1, 2]);
    }

    #[test]
    fn test_init_sequence() {
        let mut enc = Encoder::new();
        enc.set_emphasize(true);
        enc.init();
        assert!(enc.state().is_default());
        assert_eq!(
            &enc.as_bytes()[3..],
            &[0x1B, b'@', 0x1B, b'G', 0, 0x1B, b'!', 0, 0x1B, b'R', 0]
        );
    }

    #[test]
    fn test_resync_resets_and_reemits() {
        let mut enc = Encoder::new();
        enc.set_emphasize(true);
        enc.set_font_size(4, 4).unwrap();
        let start = enc.len();
        enc.resync();

        assert!(enc.state().is_default());
        assert_eq!(
            &enc.as_bytes()[start..],
            &[
                0x1B, b'G', 0, // emphasize
                0x1B, b'R', 0, // rotate
                0x1D, b'b', 0, // smooth
                0x1D, b'B', 0, // reverse
                0x1B, b'-', 0, // underline
                0x1B, b'{', 0, // upside down
                0x1D, b'!', 0, // size 1x1
                0x1B, b'-', 0, // underline
            ]
        );
    }

    #[test]
    fn test_text_log_excludes_control_bytes() {
        let mut enc = Encoder::new();
        enc.set_emphasize(true);
        enc.write_text("hello");
        enc.cut();
        enc.write_text(" world");
        assert_eq!(enc.read_text(), "hello world");
        assert_eq!(enc.len(), 3 + 5 + 4 + 6);
    }

    #[test]
    fn test_print_split_line() {
        let mut enc = Encoder::new();
        enc.print_split_line(2, "-=");
        assert_eq!(enc.read_text(), "-=-=-=");
        assert_eq!(&enc.as_bytes()[6..], &[0x1B, b'd', 1]);
    }

    #[test]
    fn test_send_to_is_repeatable() {
        let mut enc = Encoder::new();
        enc.write_text("abc");
        enc.pulse();

        let mut first = Vec::new();
        let mut second = Vec::new();
        assert_eq!(enc.send_to(&mut first).unwrap(), 6);
        assert_eq!(enc.send_to(&mut second).unwrap(), 6);
        assert_eq!(first, second);
        assert_eq!(enc.read_bytes(), (6, first.as_slice()));
    }

    #[test]
    fn test_barcode_settings() {
        let mut enc = Encoder::new();
        enc.barcode_height(50);
        enc.barcode_hri(HriPosition::Below);
        enc.barcode_hri_font_size(HriFont::B);
        enc.barcode("*00014*");
        let mut expected = vec![0x1D, b'h', 50, 0x1D, b'H', 2, 0x1D, b'f', 1, 0x1D, b'k', 4];
        expected.extend(b"*00014*");
        expected.push(0);
        assert_eq!(enc.as_bytes(), expected.as_slice());
        assert!(enc.state().is_default());
    }

    #[test]
    fn test_untracked_primitives() {
        let mut enc = Encoder::new();
        enc.set_align(Alignment::Right);
        enc.set_lang(Language::German);
        enc.set_font(Font::B);
        enc.set_relative_location(-2);
        enc.tab();
        enc.open_cash_drawer();
        enc.print_bit_image(BitImageMode::DoubleWidth);
        enc.qr_code(0, 1, 3, "hi").unwrap();

        let mut expected = vec![
            0x1B, b'a', 2, 0x1B, b'R', 2, 0x1B, b'M', 1, 0x1B, b'\\', 0xFE, 0xFF, 0x09,
        ];
        expected.extend([0x1B, b'p', 0, 2, 4, 0x10, 0x14, 1, 0, 1]);
        expected.extend([0x1D, b'/', 1]);
        expected.extend([0x1B, b'Z', 0, 1, 3, 2, 0, b'h', b'i']);
        assert_eq!(enc.as_bytes(), expected.as_slice());
        assert!(enc.state().is_default());
        assert_eq!(enc.read_text(), "");
    }

    #[test]
    fn test_graphics_block_error_appends_nothing() {
        let mut enc = Encoder::new();
        let payload = vec![0u8; graphics::MAX_BLOCK_PAYLOAD + 1];
        assert!(enc.graphics_block(b'0', b'p', &payload).is_err());
        assert!(enc.is_empty());
    }
}

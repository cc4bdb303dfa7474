//! Printer-side state tracked by the encoder.

/// Cumulative text state of the printer.
///
/// Mirrors what the printer believes after every command the encoder has
/// emitted. Only [`crate::encoder::Encoder`] setters mutate it, and each of
/// them emits the matching command in the same call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrinterState {
    /// Horizontal multiplier, 1-8
    pub width: u8,
    /// Vertical multiplier, 1-8
    pub height: u8,
    /// Underline thickness: 0 (off), 1 or 2 dots
    pub underline: u8,
    pub emphasize: bool,
    pub upside_down: bool,
    pub rotate: bool,
    pub reverse: bool,
    pub smooth: bool,
}

impl Default for PrinterState {
    fn default() -> Self {
        Self {
            width: 1,
            height: 1,
            underline: 0,
            emphasize: false,
            upside_down: false,
            rotate: false,
            reverse: false,
            smooth: false,
        }
    }
}

impl PrinterState {
    /// True when every field holds its power-on value.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

//! # Node Dispatcher
//!
//! Routes [`Node`]s to encoder primitives. Each node kind first parses its
//! parameters into a typed struct, so a node with any invalid parameter is
//! rejected before a single byte of it is written. Applying the parsed
//! parameters then only goes through the encoder's setters.
//!
//! | Node | Parameters | Payload |
//! |------|------------|---------|
//! | `text` | `align`, `lang`, `smooth`, `em`, `ul`, `reverse`, `rotate`, `font`, `dw`, `dh`, `width`, `height`, `x`, `y` | literal text |
//! | `feed` | `line`, `unit` | - |
//! | `cut` | `type` | - |
//! | `pulse` | - | - |
//! | `image` | `width`, `height` (required), `align` | base64 raster data |
//!
//! Unknown node names are ignored.

use std::collections::HashMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, trace};

use super::Encoder;
use super::entities::unescape;
use super::node::{Node, NodeKind, Params};
use crate::error::EstampaError;
use crate::protocol::graphics;
use crate::protocol::text::{Alignment, Font, Language, MAX_SCALE};

/// Characters of payload shown in the dispatch log.
const PREVIEW_CHARS: usize = 40;

/// Parsed `text` node parameters.
#[derive(Debug, Default)]
struct TextParams {
    align: Option<Alignment>,
    lang: Option<Language>,
    smooth: bool,
    emphasize: bool,
    underline: bool,
    reverse: bool,
    rotate: bool,
    font: Option<Font>,
    double_width: bool,
    double_height: bool,
    width: Option<u8>,
    height: Option<u8>,
    x: Option<u16>,
    y: Option<u16>,
}

impl TextParams {
    fn parse(params: Params<'_>) -> Result<Self, EstampaError> {
        Ok(Self {
            align: params.parse("align")?,
            lang: params.parse("lang")?,
            smooth: params.flag("smooth"),
            emphasize: params.flag("em"),
            underline: params.flag("ul"),
            reverse: params.flag("reverse"),
            rotate: params.flag("rotate"),
            font: params.font("font")?,
            double_width: params.flag("dw"),
            double_height: params.flag("dh"),
            width: scale(params, "width")?,
            height: scale(params, "height")?,
            x: params.parse("x")?,
            y: params.parse("y")?,
        })
    }
}

/// Size multiplier parameter, range-checked up front.
fn scale(params: Params<'_>, key: &str) -> Result<Option<u8>, EstampaError> {
    let value: Option<i64> = params.parse(key)?;
    match value {
        None => Ok(None),
        Some(n) if (1..=MAX_SCALE as i64).contains(&n) => Ok(Some(n as u8)),
        Some(n) => Err(EstampaError::InvalidParameter(format!(
            "invalid font {}: {} (must be 1-{})",
            key, n, MAX_SCALE
        ))),
    }
}

/// Parsed `feed` node parameters.
#[derive(Debug, Default)]
struct FeedParams {
    lines: Option<u8>,
    units: Option<u16>,
}

impl FeedParams {
    fn parse(params: Params<'_>) -> Result<Self, EstampaError> {
        Ok(Self {
            lines: params.parse("line")?,
            units: params.parse("unit")?,
        })
    }
}

/// Parsed and decoded `image` node.
#[derive(Debug)]
struct ImageParams {
    align: Option<Alignment>,
    width: u32,
    height: u32,
    raster_len: usize,
    /// Store and print blocks, framed before anything is written.
    blocks: Vec<u8>,
}

impl ImageParams {
    fn parse(params: Params<'_>, data: &str) -> Result<Self, EstampaError> {
        let align = params.parse("align")?;
        let width = params.require("width")?;
        let height = params.require("height")?;

        if data.is_empty() {
            return Err(EstampaError::MalformedPayload("image has no data".into()));
        }
        let raster = STANDARD
            .decode(data)
            .map_err(|e| EstampaError::MalformedPayload(format!("image data is not base64: {}", e)))?;

        let blocks = graphics::raster_image(&raster)?;

        Ok(Self {
            align,
            width,
            height,
            raster_len: raster.len(),
            blocks,
        })
    }
}

impl Encoder {
    /// Encode one node.
    ///
    /// ## Errors
    ///
    /// [`EstampaError::InvalidParameter`] or [`EstampaError::MalformedPayload`];
    /// in both cases nothing from this node has been written.
    pub fn dispatch(&mut self, node: &Node) -> Result<(), EstampaError> {
        self.write_node(&node.name, &node.params, &node.data)
    }

    /// Encode a node given as its separate parts.
    pub fn write_node(
        &mut self,
        name: &str,
        params: &HashMap<String, String>,
        data: &str,
    ) -> Result<(), EstampaError> {
        let Some(kind) = NodeKind::from_name(name) else {
            trace!(name, "ignoring unknown node");
            return Ok(());
        };
        debug!(name, ?params, data = %preview(data), "write node");

        let params = Params::new(params);
        match kind {
            NodeKind::Text => self.text(params, data),
            NodeKind::Feed => self.feed(params),
            NodeKind::Cut => {
                self.feed_and_cut(params);
                Ok(())
            }
            NodeKind::Pulse => {
                self.pulse();
                Ok(())
            }
            NodeKind::Image => self.image(params, data),
        }
    }

    /// Apply text styling parameters, then write the unescaped payload.
    fn text(&mut self, params: Params<'_>, data: &str) -> Result<(), EstampaError> {
        let p = TextParams::parse(params)?;

        if let Some(align) = p.align {
            self.set_align(align);
        }
        if let Some(lang) = p.lang {
            self.set_lang(lang);
        }
        if p.smooth {
            self.set_smooth(true);
        }
        if p.emphasize {
            self.set_emphasize(true);
        }
        if p.underline {
            self.set_underline(1)?;
        }
        if p.reverse {
            self.set_reverse(true);
        }
        if p.rotate {
            self.set_rotate(true);
        }
        if let Some(font) = p.font {
            self.set_font(font);
        }
        if p.double_width {
            self.set_font_size(2, self.state.height)?;
        }
        if p.double_height {
            self.set_font_size(self.state.width, 2)?;
        }
        if let Some(width) = p.width {
            self.set_font_size(width, self.state.height)?;
        }
        if let Some(height) = p.height {
            self.set_font_size(self.state.width, height)?;
        }
        if let Some(x) = p.x {
            self.send_move_x(x);
        }
        if let Some(y) = p.y {
            self.send_move_y(y);
        }

        let text = unescape(data);
        if !text.is_empty() {
            self.write_text(&text);
        }
        Ok(())
    }

    /// Feed lines and/or units, end the line, then resynchronize state.
    fn feed(&mut self, params: Params<'_>) -> Result<(), EstampaError> {
        let p = FeedParams::parse(params)?;

        if let Some(lines) = p.lines {
            self.formfeed_n(lines);
        }
        if let Some(units) = p.units {
            self.send_move_y(units);
        }
        self.linefeed(1);
        self.resync();
        Ok(())
    }

    fn feed_and_cut(&mut self, params: Params<'_>) {
        if params.get("type") == Some("feed") {
            self.formfeed();
        }
        self.cut();
    }

    fn image(&mut self, params: Params<'_>, data: &str) -> Result<(), EstampaError> {
        let p = ImageParams::parse(params, data)?;
        debug!(len = p.raster_len, width = p.width, height = p.height, "image");

        if let Some(align) = p.align {
            self.set_align(align);
        }
        self.write_raw(&p.blocks);
        Ok(())
    }
}

/// Truncated payload for logging.
fn preview(data: &str) -> String {
    match data.char_indices().nth(PREVIEW_CHARS) {
        Some((idx, _)) => format!("{} ...", &data[..idx]),
        None => data.to_string(),
    }
}

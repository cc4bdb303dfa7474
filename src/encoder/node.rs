//! Print instructions produced by an upstream document parser.
//!
//! A [`Node`] is a `(name, params, data)` triple. Parameter values are
//! always strings; [`Params`] gives typed, validated access to them so each
//! node handler states exactly which keys it reads and what they must hold.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EstampaError;
use crate::protocol::text::Font;

/// One structured print instruction.
///
/// Deserializes from `{"name": "text", "params": {"em": "true"}, "data": "Hi"}`;
/// `params` and `data` may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
    #[serde(default)]
    pub data: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add or replace a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Set the payload.
    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = data.into();
        self
    }

    /// The node kind, or `None` for names the encoder ignores.
    pub fn kind(&self) -> Option<NodeKind> {
        NodeKind::from_name(&self.name)
    }

    pub fn params(&self) -> Params<'_> {
        Params::new(&self.params)
    }
}

/// Node names the dispatcher acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Text,
    Feed,
    Cut,
    Pulse,
    Image,
}

impl NodeKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "feed" => Some(Self::Feed),
            "cut" => Some(Self::Cut),
            "pulse" => Some(Self::Pulse),
            "image" => Some(Self::Image),
            _ => None,
        }
    }
}

/// Typed view over a node's parameter map.
#[derive(Debug, Clone, Copy)]
pub struct Params<'a> {
    map: &'a HashMap<String, String>,
}

impl<'a> Params<'a> {
    pub fn new(map: &'a HashMap<String, String>) -> Self {
        Self { map }
    }

    /// Raw value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.map.get(key).map(String::as_str)
    }

    /// Boolean-style flag: present and equal to `"true"` or `"1"`.
    ///
    /// Any other value, including `"false"`, reads as not set.
    pub fn flag(&self, key: &str) -> bool {
        matches!(self.get(key), Some("true" | "1"))
    }

    /// Parse an optional parameter. Absent keys give `Ok(None)`.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<Option<T>, EstampaError> {
        match self.get(key) {
            None => Ok(None),
            Some(value) => value
                .parse()
                .map(Some)
                .map_err(|_| EstampaError::invalid(key, value)),
        }
    }

    /// Parse a parameter that must be present.
    pub fn require<T: FromStr>(&self, key: &str) -> Result<T, EstampaError> {
        self.parse(key)?.ok_or_else(|| {
            EstampaError::InvalidParameter(format!("missing required parameter '{}'", key))
        })
    }

    /// Font selector. The font letter is the sixth character of the value
    /// (e.g. `"font:b"` selects font B), compared case-insensitively.
    pub fn font(&self, key: &str) -> Result<Option<Font>, EstampaError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        let letter = value
            .get(5..6)
            .ok_or_else(|| EstampaError::invalid(key, value))?
            .to_uppercase();
        letter.parse::<Font>().map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_node_kind() {
        assert_eq!(Node::new("text").kind(), Some(NodeKind::Text));
        assert_eq!(Node::new("image").kind(), Some(NodeKind::Image));
        assert_eq!(Node::new("bogus").kind(), None);
        assert_eq!(Node::new("TEXT").kind(), None);
    }

    #[test]
    fn test_flag_truthiness() {
        let map = params(&[("a", "true"), ("b", "1"), ("c", "false"), ("d", "yes"), ("e", "")]);
        let p = Params::new(&map);
        assert!(p.flag("a"));
        assert!(p.flag("b"));
        assert!(!p.flag("c"));
        assert!(!p.flag("d"));
        assert!(!p.flag("e"));
        assert!(!p.flag("missing"));
    }

    #[test]
    fn test_parse_integers() {
        let map = params(&[("n", "42"), ("bad", "4x"), ("neg", "-1")]);
        let p = Params::new(&map);
        assert_eq!(p.parse::<u8>("n").unwrap(), Some(42));
        assert_eq!(p.parse::<u8>("missing").unwrap(), None);
        assert!(p.parse::<u8>("bad").is_err());
        assert!(p.parse::<u16>("neg").is_err());
    }

    #[test]
    fn test_require() {
        let map = params(&[("width", "100")]);
        let p = Params::new(&map);
        assert_eq!(p.require::<u32>("width").unwrap(), 100);
        let err = p.require::<u32>("height").unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_font_sixth_character() {
        let map = params(&[("a", "font:a"), ("b", "font:B"), ("c", "font:c"), ("short", "b")]);
        let p = Params::new(&map);
        assert_eq!(p.font("a").unwrap(), Some(Font::A));
        assert_eq!(p.font("b").unwrap(), Some(Font::B));
        assert!(p.font("c").is_err());
        assert!(p.font("short").is_err());
        assert_eq!(p.font("missing").unwrap(), None);
    }

    #[test]
    fn test_node_deserialize_defaults() {
        let node: Node = serde_json::from_str(r#"{"name":"pulse"}"#).unwrap();
        assert_eq!(node, Node::new("pulse"));

        let node: Node =
            serde_json::from_str(r#"{"name":"text","params":{"em":"1"},"data":"hi"}"#).unwrap();
        assert_eq!(node, Node::new("text").with_param("em", "1").with_data("hi"));
    }
}

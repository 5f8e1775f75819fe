//! Identity rendering: a deterministic two-tone square derived from a key.
//!
//! Key characters `[0, 6)` give the fill of the whole square and characters
//! `[6, 12)` give the fill of a band across its top half. Everything after
//! the twelfth character is ignored, so any viewer renders the same avatar
//! for the same key without coordination.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;
use crate::types::{AuthorKey, MIN_KEY_LEN};

/// Edge length of the rendered square, in CSS pixels.
pub const AVATAR_SIZE_PX: u32 = 40;

/// An RGB color.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse six hex digits, e.g. `"ff8800"`.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let mut bytes = [0u8; 3];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| match e {
            hex::FromHexError::InvalidHexCharacter { c, index } => CoreError::NonHexKey {
                position: index,
                found: c,
            },
            _ => CoreError::InvalidKeyFormat {
                min: 6,
                len: s.len(),
            },
        })?;
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    /// Lowercase hex, without the `#`.
    pub fn to_hex(&self) -> String {
        hex::encode([self.r, self.g, self.b])
    }

    /// CSS color literal, e.g. `#ff8800`.
    pub fn to_css(&self) -> String {
        format!("#{}", self.to_hex())
    }
}

impl fmt::Debug for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgb({})", self.to_css())
    }
}

/// The visual fingerprint of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Avatar {
    /// Fill of the whole square.
    pub fill: Rgb,
    /// Fill of the top-half band.
    pub band: Rgb,
}

impl Avatar {
    /// Derive an avatar from a raw key string.
    ///
    /// Fails with [`CoreError::InvalidKeyFormat`] when the key has fewer than
    /// twelve characters, and with [`CoreError::NonHexKey`] when one of the
    /// first twelve is not a hex digit.
    pub fn from_key(key: &str) -> Result<Self, CoreError> {
        let len = key.chars().count();
        if len < MIN_KEY_LEN {
            return Err(CoreError::InvalidKeyFormat {
                min: MIN_KEY_LEN,
                len,
            });
        }
        if let Some((position, found)) = key
            .chars()
            .take(MIN_KEY_LEN)
            .enumerate()
            .find(|(_, c)| !c.is_ascii_hexdigit())
        {
            return Err(CoreError::NonHexKey { position, found });
        }

        // The first twelve characters are ASCII, so these are byte offsets.
        Ok(Self {
            fill: Rgb::from_hex(&key[0..6])?,
            band: Rgb::from_hex(&key[6..12])?,
        })
    }

    /// Derive an avatar from a validated key.
    ///
    /// [`AuthorKey::parse`] already enforces what [`Avatar::from_key`]
    /// checks: at least twelve characters, all hex.
    pub fn for_author(key: &AuthorKey) -> Self {
        match Self::from_key(key.as_str()) {
            Ok(avatar) => avatar,
            Err(e) => {
                debug_assert!(false, "author key {key} rejected by avatar: {e}");
                Self {
                    fill: Rgb::new(0, 0, 0),
                    band: Rgb::new(0, 0, 0),
                }
            }
        }
    }

    /// Self-contained HTML: a rounded square with a band over its top half.
    pub fn to_html(&self) -> String {
        let size = AVATAR_SIZE_PX;
        let half = AVATAR_SIZE_PX / 2;
        format!(
            "<div class=\"avatar\" style=\"width:{size}px; height:{size}px; background:{fill}; \
             overflow:hidden; border-radius:8px 8px;\">\
             <div style=\"width:{size}px; height:{half}px; background:{band}\"></div>\
             </div>",
            fill = self.fill.to_css(),
            band = self.band.to_css(),
        )
    }

    /// Two terminal cells of upper half blocks: band on top, fill below.
    pub fn to_ansi(&self) -> String {
        format!(
            "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m\u{2580}\u{2580}\x1b[0m",
            self.band.r, self.band.g, self.band.b, self.fill.r, self.fill.g, self.fill.b,
        )
    }
}

impl From<&AuthorKey> for Avatar {
    fn from(key: &AuthorKey) -> Self {
        Self::for_author(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_colors_come_from_key_segments() {
        let avatar = Avatar::from_key("ff8800112233deadbeef").unwrap();
        assert_eq!(avatar.fill, Rgb::new(0xff, 0x88, 0x00));
        assert_eq!(avatar.band, Rgb::new(0x11, 0x22, 0x33));
    }

    #[test]
    fn test_short_key_is_invalid() {
        assert_eq!(
            Avatar::from_key("abc12345678").unwrap_err(),
            CoreError::InvalidKeyFormat { min: 12, len: 11 }
        );
        assert_eq!(
            Avatar::from_key("").unwrap_err(),
            CoreError::InvalidKeyFormat { min: 12, len: 0 }
        );
    }

    #[test]
    fn test_non_hex_prefix_is_invalid() {
        assert_eq!(
            Avatar::from_key("ff88g0112233").unwrap_err(),
            CoreError::NonHexKey {
                position: 4,
                found: 'g'
            }
        );
    }

    #[test]
    fn test_multibyte_key_does_not_panic() {
        assert!(Avatar::from_key("ééééééééééééé").is_err());
    }

    #[test]
    fn test_uppercase_key_matches_lowercase() {
        assert_eq!(
            Avatar::from_key("FF8800ABCDEF").unwrap(),
            Avatar::from_key("ff8800abcdef").unwrap()
        );
    }

    #[test]
    fn test_for_author_matches_from_key() {
        let key = AuthorKey::parse("aaa111bbb222").unwrap();
        assert_eq!(Avatar::for_author(&key), Avatar::from_key("aaa111bbb222").unwrap());
    }

    #[test]
    fn test_html_fragment() {
        let html = Avatar::from_key("aaa111bbb222").unwrap().to_html();
        assert!(html.contains("background:#aaa111;"));
        assert!(html.contains("height:20px; background:#bbb222"));
        assert!(html.starts_with("<div class=\"avatar\""));
    }

    #[test]
    fn test_ansi_fragment() {
        let ansi = Avatar::from_key("ff000000ff00").unwrap().to_ansi();
        assert!(ansi.starts_with("\x1b[38;2;0;255;0m\x1b[48;2;255;0;0m"));
        assert!(ansi.ends_with("\x1b[0m"));
    }

    fn hex_string(len: usize) -> impl Strategy<Value = String> {
        proptest::string::string_regex(&format!("[0-9a-f]{{{len}}}")).unwrap()
    }

    proptest! {
        #[test]
        fn prop_every_author_key_yields_its_avatar(raw in "[0-9a-fA-F]{12,64}") {
            let key = AuthorKey::parse(raw.as_str()).unwrap();
            prop_assert_eq!(Avatar::for_author(&key), Avatar::from_key(&raw).unwrap());
        }

        #[test]
        fn prop_avatar_is_deterministic(key in hex_string(64)) {
            let a = Avatar::from_key(&key).unwrap();
            let b = Avatar::from_key(&key).unwrap();
            prop_assert_eq!(a, b);
            prop_assert_eq!(a.to_html(), b.to_html());
        }

        #[test]
        fn prop_only_first_twelve_chars_matter(
            prefix in hex_string(12),
            tail_a in hex_string(20),
            tail_b in hex_string(52),
        ) {
            let a = Avatar::from_key(&format!("{prefix}{tail_a}")).unwrap();
            let b = Avatar::from_key(&format!("{prefix}{tail_b}")).unwrap();
            prop_assert_eq!(a.to_html(), b.to_html());
        }

        #[test]
        fn prop_fill_segment_changes_fill(
            fill_a in hex_string(6),
            fill_b in hex_string(6),
            band in hex_string(6),
        ) {
            prop_assume!(fill_a != fill_b);
            let a = Avatar::from_key(&format!("{fill_a}{band}")).unwrap();
            let b = Avatar::from_key(&format!("{fill_b}{band}")).unwrap();
            prop_assert_ne!(a.fill, b.fill);
            prop_assert_eq!(a.band, b.band);
        }

        #[test]
        fn prop_band_segment_changes_only_band(
            fill in hex_string(6),
            band_a in hex_string(6),
            band_b in hex_string(6),
        ) {
            prop_assume!(band_a != band_b);
            let a = Avatar::from_key(&format!("{fill}{band_a}")).unwrap();
            let b = Avatar::from_key(&format!("{fill}{band_b}")).unwrap();
            prop_assert_eq!(a.fill, b.fill);
            prop_assert_ne!(a.band, b.band);
        }
    }
}

// Derived from asciinema (https://github.com/asciinema/asciinema)
// Copyright (c) asciinema authors
// Licensed under GPL-3.0-or-later
// Vendored by castplay project

//! Terminal theme parsing shared by the v2 and v3 headers.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Terminal theme (colors) recorded in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub fg: rgb::RGB8,
    pub bg: rgb::RGB8,
    /// Always 16 colors; 8-color palettes are repeated into the bright half.
    pub palette: Vec<rgb::RGB8>,
}

#[derive(Deserialize)]
struct RawTheme {
    #[serde(deserialize_with = "deserialize_color")]
    fg: rgb::RGB8,
    #[serde(deserialize_with = "deserialize_color")]
    bg: rgb::RGB8,
    #[serde(deserialize_with = "deserialize_palette")]
    palette: Vec<rgb::RGB8>,
}

impl Theme {
    /// Parse a theme object as found in a header.
    ///
    /// Returns `None` (after logging) when the object is malformed. Themes are
    /// pass-through metadata, so a bad one never fails the whole recording.
    pub(crate) fn from_value(value: serde_json::Value) -> Option<Self> {
        match serde_json::from_value::<RawTheme>(value) {
            Ok(raw) => Some(Theme {
                fg: raw.fg,
                bg: raw.bg,
                palette: raw.palette,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed theme in header");
                None
            }
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fg {} bg {}", Hex(self.fg), Hex(self.bg))
    }
}

struct Hex(rgb::RGB8);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "#{:0>2x}{:0>2x}{:0>2x}", self.0.r, self.0.g, self.0.b)
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<rgb::RGB8, D::Error>
where
    D: Deserializer<'de>,
{
    let value: String = Deserialize::deserialize(deserializer)?;
    parse_hex_color(&value).ok_or(serde::de::Error::custom("invalid hex triplet"))
}

fn parse_hex_color(rgb: &str) -> Option<rgb::RGB8> {
    if rgb.len() != 7 || !rgb.starts_with('#') {
        return None;
    }

    let r = u8::from_str_radix(rgb.get(1..3)?, 16).ok()?;
    let g = u8::from_str_radix(rgb.get(3..5)?, 16).ok()?;
    let b = u8::from_str_radix(rgb.get(5..7)?, 16).ok()?;

    Some(rgb::RGB8::new(r, g, b))
}

fn deserialize_palette<'de, D>(deserializer: D) -> Result<Vec<rgb::RGB8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: String = Deserialize::deserialize(deserializer)?;
    let mut colors: Vec<rgb::RGB8> = value.split(':').filter_map(parse_hex_color).collect();
    let len = colors.len();

    if len == 8 {
        colors.extend_from_within(..);
    } else if len != 16 {
        return Err(serde::de::Error::custom("expected 8 or 16 hex triplets"));
    }

    Ok(colors)
}

//! Theme data: a named mapping from semantic color roles to colors.
//!
//! Resolution rules (active theme, default theme fallback) live in
//! `gauges-core`; this module only holds the data and the built-in palettes.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::color::Color;

/// Well-known role names consulted by the built-in displays
pub mod roles {
    pub const BACKGROUND: &str = "background";
    pub const BORDER: &str = "border";
    pub const ACCENT: &str = "accent";
    pub const TEXT: &str = "text";
    pub const NEEDLE: &str = "needle";
    pub const NEEDLE_SECONDARY: &str = "needle-secondary";
    pub const TICK_MAJOR: &str = "tick-major";
    pub const TICK_MINOR: &str = "tick-minor";
    pub const PITCH: &str = "pitch";
    pub const ROLL: &str = "roll";
    pub const FLASH: &str = "flash";
    pub const FPS_GOOD: &str = "fps-good";
    pub const FPS_WARN: &str = "fps-warn";
    pub const FPS_BAD: &str = "fps-bad";
    pub const FPS_TEXT: &str = "fps-text";

    /// Number of `series-N` roles defined by the built-in themes
    pub const SERIES_COUNT: usize = 8;

    /// Role name for the line chart series with the given index
    pub fn series(index: usize) -> String {
        format!("series-{}", index % SERIES_COUNT)
    }
}

/// A named palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    #[serde(
        serialize_with = "serialize_hex_map",
        deserialize_with = "deserialize_hex_map"
    )]
    pub colors: BTreeMap<String, Color>,
}

// Solarized, https://ethanschoonover.com/solarized/
const BASE03: (u8, u8, u8) = (0x00, 0x2b, 0x36);
const BASE02: (u8, u8, u8) = (0x07, 0x36, 0x42);
const BASE01: (u8, u8, u8) = (0x58, 0x6e, 0x75);
const BASE00: (u8, u8, u8) = (0x65, 0x7b, 0x83);
const BASE0: (u8, u8, u8) = (0x83, 0x94, 0x96);
const BASE1: (u8, u8, u8) = (0x93, 0xa1, 0xa1);
const BASE2: (u8, u8, u8) = (0xee, 0xe8, 0xd5);
const BASE3: (u8, u8, u8) = (0xfd, 0xf6, 0xe3);
const YELLOW: (u8, u8, u8) = (0xb5, 0x89, 0x00);
const ORANGE: (u8, u8, u8) = (0xcb, 0x4b, 0x16);
const RED: (u8, u8, u8) = (0xdc, 0x32, 0x2f);
const MAGENTA: (u8, u8, u8) = (0xd3, 0x36, 0x82);
const VIOLET: (u8, u8, u8) = (0x6c, 0x71, 0xc4);
const BLUE: (u8, u8, u8) = (0x26, 0x8b, 0xd2);
const CYAN: (u8, u8, u8) = (0x2a, 0xa1, 0x98);
const GREEN: (u8, u8, u8) = (0x85, 0x99, 0x00);

const SERIES: [(u8, u8, u8); roles::SERIES_COUNT] =
    [GREEN, RED, VIOLET, ORANGE, BLUE, YELLOW, CYAN, MAGENTA];

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::from_rgb8(r, g, b)
}

impl Theme {
    /// Empty theme with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            colors: BTreeMap::new(),
        }
    }

    /// Builder-style role assignment
    pub fn with(mut self, role: impl Into<String>, color: Color) -> Self {
        self.colors.insert(role.into(), color);
        self
    }

    pub fn get(&self, role: &str) -> Option<Color> {
        self.colors.get(role).copied()
    }

    /// Dark Solarized palette, the process-wide default
    pub fn solarized_dark() -> Self {
        Self::solarized("solarized-dark", false)
    }

    pub fn solarized_light() -> Self {
        Self::solarized("solarized-light", true)
    }

    /// Look up a built-in theme by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "solarized-dark" | "solarized" => Some(Self::solarized_dark()),
            "solarized-light" => Some(Self::solarized_light()),
            _ => None,
        }
    }

    fn solarized(name: &str, light: bool) -> Self {
        // Light variant mirrors the base tones
        let (bg, border, needle, needle2, major, minor, text) = if light {
            (BASE3, BASE00, BASE02, BASE00, BASE1, BASE2, BASE01)
        } else {
            (BASE03, BASE0, BASE2, BASE0, BASE00, BASE02, BASE1)
        };

        let mut theme = Self::new(name)
            .with(roles::BACKGROUND, rgb(bg))
            .with(roles::BORDER, rgb(border))
            .with(roles::ACCENT, rgb(BLUE))
            .with(roles::TEXT, rgb(text))
            .with(roles::NEEDLE, rgb(needle))
            .with(roles::NEEDLE_SECONDARY, rgb(needle2))
            .with(roles::TICK_MAJOR, rgb(major))
            .with(roles::TICK_MINOR, rgb(minor))
            .with(roles::PITCH, rgb(RED))
            .with(roles::ROLL, rgb(YELLOW))
            .with(roles::FLASH, Color::WHITE)
            .with(roles::FPS_GOOD, rgb(GREEN))
            .with(roles::FPS_WARN, rgb(YELLOW))
            .with(roles::FPS_BAD, rgb(RED))
            .with(roles::FPS_TEXT, rgb(bg));

        for (i, color) in SERIES.iter().enumerate() {
            theme = theme.with(roles::series(i), rgb(*color));
        }

        // Raw palette names stay addressable as roles
        for (raw, color) in [
            ("base03", BASE03),
            ("base02", BASE02),
            ("base01", BASE01),
            ("base00", BASE00),
            ("base0", BASE0),
            ("base1", BASE1),
            ("base2", BASE2),
            ("base3", BASE3),
            ("yellow", YELLOW),
            ("orange", ORANGE),
            ("red", RED),
            ("magenta", MAGENTA),
            ("violet", VIOLET),
            ("blue", BLUE),
            ("cyan", CYAN),
            ("green", GREEN),
        ] {
            theme = theme.with(raw, rgb(color));
        }
        theme
    }
}

fn serialize_hex_map<S>(colors: &BTreeMap<String, Color>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;
    let mut map = serializer.serialize_map(Some(colors.len()))?;
    for (role, color) in colors {
        map.serialize_entry(role, &color.to_string())?;
    }
    map.end()
}

/// Accepts either `"#rrggbb[aa]"` strings or `{r, g, b, a}` objects per role
fn deserialize_hex_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Color>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ColorRepr {
        Hex(String),
        Rgba(Color),
    }

    let raw = BTreeMap::<String, ColorRepr>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(role, repr)| match repr {
            ColorRepr::Rgba(color) => Ok((role, color)),
            ColorRepr::Hex(hex) => Color::from_hex(&hex)
                .map(|color| (role.clone(), color))
                .ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid color '{}' for role '{}'", hex, role))
                }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_themes_define_display_roles() {
        for theme in [Theme::solarized_dark(), Theme::solarized_light()] {
            for role in [
                roles::BACKGROUND,
                roles::BORDER,
                roles::NEEDLE,
                roles::PITCH,
                roles::ROLL,
                roles::FPS_TEXT,
            ] {
                assert!(theme.get(role).is_some(), "{} lacks {}", theme.name, role);
            }
            for i in 0..roles::SERIES_COUNT {
                assert!(theme.get(&roles::series(i)).is_some());
            }
        }
    }

    #[test]
    fn test_theme_json_uses_hex_strings() {
        let theme = Theme::new("tiny").with("accent", Color::from_rgb8(0x26, 0x8b, 0xd2));
        let json = serde_json::to_string(&theme).unwrap();
        assert!(json.contains("\"accent\":\"#268bd2\""));

        let parsed: Theme = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, theme);
    }

    #[test]
    fn test_theme_rejects_bad_hex() {
        let json = r##"{"name":"bad","colors":{"accent":"#12"}}"##;
        let err = serde_json::from_str::<Theme>(json).unwrap_err();
        assert!(err.to_string().contains("accent"));
    }
}

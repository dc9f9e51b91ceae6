//! Color handling for diagram rendering.
//!
//! Colors travel as CSS color strings, which SVG and Canvas 2D both accept
//! directly. [`Rgb`] is used where color math is needed.

/// A CSS color string (e.g., "#F59E0B")
pub type CssColor = String;

/// RGB color with u8 components for color math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Parse from a hex string (with or without #).
    /// Returns None if the format is invalid.
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#').unwrap_or(s.trim());
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
        let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
        let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Convert to CSS hex string (#RRGGBB).
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Lighten the color by blending with white.
    /// Factor of 0.0 = no change, 1.0 = pure white.
    pub fn lighten(self, factor: f64) -> Self {
        Self {
            r: Self::blend_component(self.r, 255, factor),
            g: Self::blend_component(self.g, 255, factor),
            b: Self::blend_component(self.b, 255, factor),
        }
    }

    /// Blend a single color component toward a target. Clamped to
    /// [0, 255] before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn blend_component(from: u8, to: u8, factor: f64) -> u8 {
        let from = f64::from(from);
        let to = f64::from(to);
        let blended = from + (to - from) * factor.clamp(0.0, 1.0);
        blended.clamp(0.0, 255.0).round() as u8
    }
}

/// Normalize a color string to `#RRGGBB`.
///
/// Accepts "#RRGGBB", "RRGGBB" and the short "#RGB" form.
pub fn parse_color(s: &str) -> Option<CssColor> {
    let s = s.trim();
    let hex = s.strip_prefix('#').unwrap_or(s);

    match hex.len() {
        6 => Rgb::from_hex(hex).map(Rgb::to_hex),
        3 => {
            let expanded: String = hex.chars().flat_map(|c| [c, c]).collect();
            Rgb::from_hex(&expanded).map(Rgb::to_hex)
        }
        _ => None,
    }
}

/// Default diagram colors (CSS format)
pub mod palette {
    /// Active path accent (gold)
    pub const PRIMARY: &str = "#F59E0B";

    /// Light tint for partially active cells
    pub const PRIMARY_LIGHT: &str = "#FFFBEB";

    /// Inactive cell fill (light gray)
    pub const INACTIVE_FILL: &str = "#F1F5F9";

    /// Frame around the vectors and the matrix
    pub const INACTIVE_EDGE: &str = "#CBD5E1";

    /// Titles and formula (dark blue-black)
    pub const TEXT_MAIN: &str = "#1E293B";

    pub const WHITE: &str = "#FFFFFF";

    /// Legend caption (slate)
    pub const TEXT_MUTED: &str = "#64748B";
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        assert_eq!(parse_color("#f59e0b").unwrap(), "#F59E0B");
    }

    #[test]
    fn test_parse_without_hash() {
        assert_eq!(parse_color("FF0000").unwrap(), "#FF0000");
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#fff").unwrap(), "#FFFFFF");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_color("gold").is_none());
        assert!(parse_color("#12345").is_none());
        assert!(parse_color("#GGGGGG").is_none());
    }

    #[test]
    fn test_lighten_bounds() {
        let gold = Rgb::from_hex(palette::PRIMARY).unwrap();
        assert_eq!(gold.lighten(0.0), gold);
        assert_eq!(gold.lighten(1.0).to_hex(), palette::WHITE);
        let tint = gold.lighten(0.9);
        assert!(tint.r >= gold.r && tint.g >= gold.g && tint.b >= gold.b);
    }
}

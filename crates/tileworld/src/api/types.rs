use crate::error::EngineError;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Linear RGB color with components in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    /// Build a color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a `#rrggbb` hex string (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, EngineError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(EngineError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| EngineError::InvalidColor(hex.to_string()))
        };
        Ok(Self::rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_with_and_without_hash() {
        let a = Color::from_hex("#125555").unwrap();
        let b = Color::from_hex("125555").unwrap();
        assert_eq!(a, b);
        assert!((a.r - 0x12 as f32 / 255.0).abs() < 1e-6);
        assert!((a.g - 0x55 as f32 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12555").is_err());
        assert!(Color::from_hex("#zz5555").is_err());
        assert!(Color::from_hex("").is_err());
        // Sign characters are not hex digits.
        assert!(Color::from_hex("#+1+2+3").is_err());
        assert!(Color::from_hex("-12345").is_err());
    }
}

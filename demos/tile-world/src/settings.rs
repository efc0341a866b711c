use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tunables for the tile-world demo. Every field has a default, so an
/// override file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Avatar speed in world units per second.
    pub speed: f32,
    pub player_radius: f32,
    pub spawn: [f32; 2],
    /// World parts along x.
    pub parts_wide: u32,
    /// World parts along y.
    pub parts_high: u32,
    /// Correction passes per frame before giving up.
    pub max_passes: u32,
    /// Factor applied to each correction push.
    pub overshoot: f32,
    /// Camera follow smoothing, 0.0 snaps.
    pub camera_smoothing: f32,
    /// `#rrggbb`
    pub background: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            speed: 400.0,
            player_radius: 50.0,
            spawn: [100.0, 100.0],
            parts_wide: 50,
            parts_high: 50,
            max_passes: 10,
            overshoot: 1.05,
            camera_smoothing: 0.0,
            background: "#125555".to_string(),
        }
    }
}

impl DemoSettings {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn spawn_point(&self) -> Vec2 {
        Vec2::from(self.spawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo() {
        let s = DemoSettings::default();
        assert_eq!(s.speed, 400.0);
        assert_eq!(s.max_passes, 10);
        assert_eq!(s.overshoot, 1.05);
        assert_eq!(s.spawn_point(), Vec2::new(100.0, 100.0));
        assert_eq!((s.parts_wide, s.parts_high), (50, 50));
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let s = DemoSettings::from_json(r#"{ "speed": 250.0, "parts_wide": 2 }"#).unwrap();
        assert_eq!(s.speed, 250.0);
        assert_eq!(s.parts_wide, 2);
        assert_eq!(s.parts_high, 50);
        assert_eq!(s.background, "#125555");
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(DemoSettings::from_json(r#"{ "speed": "fast" }"#).is_err());
    }
}

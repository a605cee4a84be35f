//! Watchface configuration

use embedded_graphics::geometry::{Point, Size};

/// Face layout and refresh policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FaceConfig {
    /// Size of the whole face
    pub size: Size,
    /// Center of the 24-hour dial
    pub center: Point,
    /// Radius of the dial edge, where sunrise and sunset are drawn
    pub dial_radius: i32,
    /// Distance from the dial edge to the ring the sun and moon travel on
    pub ring_inset: i32,
    pub sun_diameter: u32,
    pub moon_diameter: u32,
    /// Seconds between data requests to the phone
    pub refresh_interval: i64,
    /// Seconds to wait before retrying after the phone reported a failure
    pub error_retry: i64,
    /// Show the previous/next sunrise and sunset labels
    pub debug_labels: bool,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl FaceConfig {
    /// Configuration for a 144x168 face with the dial centered at (72, 84)
    pub const fn new() -> Self {
        Self {
            size: Size::new(144, 168),
            center: Point::new(72, 84),
            dial_radius: 72,
            ring_inset: 10,
            sun_diameter: 16,
            moon_diameter: 16,
            refresh_interval: 900,
            error_retry: 120,
            debug_labels: false,
        }
    }

    /// Same layout scaled to a different face, dial centered and touching
    /// the shorter side
    pub fn for_size(size: Size) -> Self {
        let radius = (size.width.min(size.height) / 2) as i32;
        Self {
            size,
            center: Point::new(size.width as i32 / 2, size.height as i32 / 2),
            dial_radius: radius,
            ..Self::new()
        }
    }

    pub fn with_debug_labels(mut self, enabled: bool) -> Self {
        self.debug_labels = enabled;
        self
    }

    pub fn with_refresh(mut self, interval: i64, error_retry: i64) -> Self {
        self.refresh_interval = interval;
        self.error_retry = error_retry;
        self
    }

    /// Radius of the ring the sun and moon markers travel on
    pub fn marker_radius(&self) -> i32 {
        self.dial_radius - self.ring_inset
    }

    pub fn width(&self) -> i32 {
        self.size.width as i32
    }

    pub fn height(&self) -> i32 {
        self.size.height as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let config = FaceConfig::default();
        assert_eq!(config.center, Point::new(72, 84));
        assert_eq!(config.marker_radius(), 62);
        assert_eq!(config.refresh_interval, 900);
        assert_eq!(config.error_retry, 120);
        assert!(!config.debug_labels);
    }

    #[test]
    fn scaled_face_centers_dial() {
        let config = FaceConfig::for_size(Size::new(64, 64)).with_debug_labels(true);
        assert_eq!(config.center, Point::new(32, 32));
        assert_eq!(config.dial_radius, 32);
        assert!(config.debug_labels);
    }
}

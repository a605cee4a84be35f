//! 24-hour dial geometry
//!
//! Midnight sits at the bottom of the dial and noon at the top, so the
//! sun's marker rises on the left at 06:00 and sets on the right at 18:00.

use core::f32::consts::TAU;

use embedded_graphics::{
    geometry::{Point, Size},
    primitives::Rectangle,
};
use libm::{cosf, sinf};

use crate::system::time::Timestamp;

/// Fraction of a full turn for the time of day of `t`, in `[0, 1)`
pub fn dial_fraction(t: Timestamp) -> f32 {
    let hour = (t.hour() + 12) % 24;
    (hour as f32 + t.minute() as f32 / 60.0) / 24.0
}

/// Point on the circle of `radius` around `center` for the time of day of `t`
pub fn point_for_time(t: Timestamp, radius: i32, center: Point) -> Point {
    let angle = TAU * dial_fraction(t);
    let r = radius as f32;
    Point::new(
        center.x + (sinf(angle) * r) as i32,
        center.y + (-cosf(angle) * r) as i32,
    )
}

/// Square frame of a marker sprite centered on `point`
pub fn marker_frame(point: Point, diameter: u32) -> Rectangle {
    let half = (diameter / 2) as i32;
    Rectangle::new(point - Point::new(half, half), Size::new(diameter, diameter))
}

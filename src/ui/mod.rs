//! Watchface definitions module

use embedded_graphics::primitives::Rectangle;

use crate::sky::{
    daylight::DayRegion,
    events::{EventLabels, Label},
    moon::MoonSprite,
};

pub mod natural_watchface;
pub mod render;
pub mod status;

use status::{BatteryIcon, NotificationIcon};

/// Everything the display needs for one update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Current time as "HH:MM"
    pub clock: Label,
    /// Where to place the sun sprite
    pub sun: Rectangle,
    /// Hidden until the timezone offset is known
    pub moon: Option<MoonMarker>,
    pub daylight: DayRegion,
    /// Previous/next sunrise and sunset, shown in debug mode
    pub events: EventLabels,
    pub notification: NotificationIcon,
    pub battery: BatteryIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MoonMarker {
    /// Where to place the moon sprite
    pub frame: Rectangle,
    pub sprite: MoonSprite,
    /// The sprite differs from the one shown before and must be swapped
    pub sprite_changed: bool,
}

pub mod companion;
pub mod config;
pub mod storage;
pub mod time;

/// Dictionary keys shared by phone messages and persistent storage.
///
/// The numbering is part of the on-watch storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u32)]
pub enum Key {
    Status = 0,
    TzOffset = 1,
    Sunrise = 2,
    Sunset = 3,
    PrevSunrise = 4,
    PrevSunset = 5,
    NextSunrise = 6,
    NextSunset = 7,
    TimeStamp = 8,
}

impl Key {
    /// Numeric key as used on the wire and in storage
    pub const fn id(self) -> u32 {
        self as u32
    }

    pub const fn from_id(id: u32) -> Option<Self> {
        Some(match id {
            0 => Key::Status,
            1 => Key::TzOffset,
            2 => Key::Sunrise,
            3 => Key::Sunset,
            4 => Key::PrevSunrise,
            5 => Key::PrevSunset,
            6 => Key::NextSunrise,
            7 => Key::NextSunset,
            8 => Key::TimeStamp,
            _ => return None,
        })
    }
}

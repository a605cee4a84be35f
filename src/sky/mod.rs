//! Sun and moon bookkeeping and dial geometry

pub mod daylight;
pub mod dial;
pub mod events;
pub mod moon;

//! Core of the "natural" watchface: a 24-hour analog dial with the sun, the
//! moon and the day/night terminator.
//!
//! - [`sky::events`]: previous/next sunrise and sunset bookkeeping
//! - [`sky::dial`], [`sky::daylight`], [`sky::moon`]: dial geometry
//! - [`ui`]: the watchface shell, status icons and rendering
//! - [`runtime`]: the event loop that drives the shell
//! - [`system`]: time, configuration, persistence and phone messages

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod error;
pub mod runtime;
pub mod sky;
pub mod system;
pub mod ui;

pub use error::Error;
pub use system::time::{Timestamp, TzOffset};
pub use ui::natural_watchface::NaturalWatchface;

//! Messages exchanged with the companion app on the phone

use heapless::Vec;

use super::{time::TzOffset, Key};
use crate::Error;

/// Status sent to the phone to ask for fresh data
pub const REQUEST_STATUS: &str = "retrieve";

const MAX_ENTRIES: usize = 8;

/// A dictionary value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    Int(i32),
    Str(&'a str),
}

/// Key-tagged values as delivered by the phone.
///
/// Keys are kept numeric so that fields this face does not use, such as
/// temperature or coordinates, pass through without error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary<'a> {
    entries: Vec<(u32, Value<'a>), MAX_ENTRIES>,
}

impl<'a> Dictionary<'a> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Add an entry, replacing an earlier one under the same key.
    /// Entries beyond the dictionary's capacity are dropped.
    pub fn insert(&mut self, key: u32, value: Value<'a>) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else if self.entries.push((key, value)).is_err() {
            warn!("dictionary full, dropping key {=u32}", key);
        }
    }

    pub fn with(mut self, key: Key, value: Value<'a>) -> Self {
        self.insert(key.id(), value);
        self
    }

    pub fn get(&self, key: Key) -> Option<Value<'a>> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key.id())
            .map(|(_, v)| *v)
    }

    fn int(&self, key: Key) -> Result<Option<i32>, Error> {
        match self.get(key) {
            Some(Value::Int(v)) => Ok(Some(v)),
            Some(Value::Str(_)) => Err(Error::WrongType(key)),
            None => Ok(None),
        }
    }

    fn str(&self, key: Key) -> Result<&'a str, Error> {
        match self.get(key) {
            Some(Value::Str(s)) => Ok(s),
            Some(Value::Int(_)) => Err(Error::WrongType(key)),
            None => Err(Error::MissingField(key)),
        }
    }

    /// The outbound request for fresh data
    pub fn request() -> Dictionary<'static> {
        Dictionary::new().with(Key::Status, Value::Str(REQUEST_STATUS))
    }
}

/// Companion app status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// The phone side is ready to take requests
    Ready,
    /// The phone reports fresh data
    Reporting,
    /// The phone could not fetch data
    Failed,
}

impl Status {
    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "ready" => Ok(Status::Ready),
            "reporting" => Ok(Status::Reporting),
            "failed" => Ok(Status::Failed),
            _ => Err(Error::UnknownStatus),
        }
    }
}

/// A message from the phone, validated and typed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    Ready,
    Reporting {
        tz_offset: Option<TzOffset>,
        /// Sunrise as a UTC epoch
        sunrise: Option<i64>,
        /// Sunset as a UTC epoch
        sunset: Option<i64>,
    },
    Failed {
        tz_offset: Option<TzOffset>,
    },
}

impl Message {
    pub fn parse(dict: &Dictionary<'_>) -> Result<Self, Error> {
        let status = Status::parse(dict.str(Key::Status)?)?;
        let tz_offset = dict.int(Key::TzOffset)?.map(TzOffset::from_secs);

        Ok(match status {
            Status::Ready => Message::Ready,
            Status::Reporting => Message::Reporting {
                tz_offset,
                sunrise: dict.int(Key::Sunrise)?.map(i64::from),
                sunset: dict.int(Key::Sunset)?.map(i64::from),
            },
            Status::Failed => Message::Failed { tz_offset },
        })
    }

    pub fn status(&self) -> Status {
        match self {
            Message::Ready => Status::Ready,
            Message::Reporting { .. } => Status::Reporting,
            Message::Failed { .. } => Status::Failed,
        }
    }
}

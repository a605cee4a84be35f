//! Persistent storage of the reconciled sunrise/sunset state
//!
//! Records are 32-bit integers under the numeric [`Key`]s. Unknown times
//! are written with the sentinels the watch has always used: `0` for an
//! unknown previous event and [`INF`] for an unknown next one.

use core::fmt;

use heapless::FnvIndexMap;

use super::{
    time::{Timestamp, TzOffset},
    Key,
};
use crate::{
    sky::events::{EventKind, EventState, EventTable},
    Error,
};

/// Stored in place of an unknown previous event or a missing timestamp
pub const ZERO: i32 = 0;
/// Stored in place of an unknown next event, 7 seconds before the 2038 rollover
pub const INF: i32 = 2_147_483_640;

/// Keys that must all be present for a saved state to be loaded
const REQUIRED_KEYS: [Key; 6] = [
    Key::PrevSunrise,
    Key::NextSunrise,
    Key::PrevSunset,
    Key::NextSunset,
    Key::TimeStamp,
    Key::TzOffset,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// No room left for another record
    Full,
    /// The backend failed to read or write
    Io,
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Full => f.write_str("storage full"),
            StorageError::Io => f.write_str("storage I/O error"),
        }
    }
}

/// Integer key/value persistence provided by the platform
pub trait Storage {
    fn exists(&self, key: Key) -> bool;

    fn read_i32(&self, key: Key) -> Option<i32>;

    fn write_i32(&mut self, key: Key, value: i32) -> Result<(), StorageError>;
}

/// RAM-backed storage, for hosts without flash and for tests
#[derive(Default)]
pub struct MemoryStorage {
    records: FnvIndexMap<Key, i32, 16>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn exists(&self, key: Key) -> bool {
        self.records.contains_key(&key)
    }

    fn read_i32(&self, key: Key) -> Option<i32> {
        self.records.get(&key).copied()
    }

    fn write_i32(&mut self, key: Key, value: i32) -> Result<(), StorageError> {
        self.records
            .insert(key, value)
            .map(|_| ())
            .map_err(|_| StorageError::Full)
    }
}

/// Everything the face keeps across restarts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PersistedState {
    pub events: EventTable,
    /// Time of the last successful data update
    pub last_update: Option<Timestamp>,
    pub tz_offset: TzOffset,
}

impl PersistedState {
    pub fn save<S: Storage>(&self, storage: &mut S) -> Result<(), Error> {
        for kind in EventKind::ALL {
            let state = self.events.get(kind);
            let (prev_key, next_key) = keys_for(kind);
            storage.write_i32(prev_key, encode(state.previous, ZERO, prev_key)?)?;
            storage.write_i32(next_key, encode(state.next, INF, next_key)?)?;
        }
        storage.write_i32(
            Key::TimeStamp,
            encode(self.last_update, ZERO, Key::TimeStamp)?,
        )?;
        storage.write_i32(Key::TzOffset, self.tz_offset.as_secs())?;
        Ok(())
    }

    /// Load a saved state, or `None` if any record is missing
    pub fn load<S: Storage>(storage: &S) -> Result<Option<Self>, Error> {
        if !REQUIRED_KEYS.iter().all(|key| storage.exists(*key)) {
            return Ok(None);
        }

        let read = |key: Key| storage.read_i32(key).ok_or(Error::MissingField(key));

        let mut events = EventTable::new();
        for kind in EventKind::ALL {
            let (prev_key, next_key) = keys_for(kind);
            *events.get_mut(kind) = EventState {
                previous: decode(read(prev_key)?, ZERO),
                next: decode(read(next_key)?, INF),
            };
        }

        Ok(Some(Self {
            events,
            last_update: decode(read(Key::TimeStamp)?, ZERO),
            tz_offset: TzOffset::from_secs(read(Key::TzOffset)?),
        }))
    }
}

fn keys_for(kind: EventKind) -> (Key, Key) {
    match kind {
        EventKind::Sunrise => (Key::PrevSunrise, Key::NextSunrise),
        EventKind::Sunset => (Key::PrevSunset, Key::NextSunset),
    }
}

fn encode(time: Option<Timestamp>, sentinel: i32, key: Key) -> Result<i32, Error> {
    match time {
        Some(t) => i32::try_from(t.as_secs()).map_err(|_| Error::OutOfRange(key)),
        None => Ok(sentinel),
    }
}

fn decode(raw: i32, sentinel: i32) -> Option<Timestamp> {
    (raw != sentinel).then(|| Timestamp::from_secs(raw as i64))
}

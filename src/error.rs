//! Crate error type

use core::fmt;

use crate::system::{storage::StorageError, Key};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A message lacks a field its status requires
    MissingField(Key),
    /// A field holds a string where an integer is expected, or vice versa
    WrongType(Key),
    /// The status string is not one the companion app sends
    UnknownStatus,
    /// A value does not fit its persisted representation
    OutOfRange(Key),
    /// Persistent storage failed
    Storage(StorageError),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Storage(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MissingField(key) => write!(f, "missing field {:?}", key),
            Error::WrongType(key) => write!(f, "unexpected value type for {:?}", key),
            Error::UnknownStatus => f.write_str("unknown status"),
            Error::OutOfRange(key) => write!(f, "value for {:?} out of range", key),
            Error::Storage(err) => write!(f, "storage: {}", err),
        }
    }
}

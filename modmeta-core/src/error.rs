use thiserror::Error;

use crate::format::{Field, Format};

#[derive(Debug, Error)]
pub enum Error {
    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    /// The format has no region for this field.
    #[error("Cannot set {field} for format {format}")]
    UnsupportedField { field: Field, format: Format },

    #[error("{field} longer than maximum allowed length {max} ({actual} bytes), aborting!")]
    ValueTooLong {
        field: Field,
        max: usize,
        actual: usize,
    },

    #[error("Short read at offset {offset}: wanted {length} bytes, only {available} available")]
    ShortRead {
        offset: u64,
        length: usize,
        available: u64,
    },

    #[error("Field at offset {offset} ({length} bytes) lies past end of file ({file_size} bytes)")]
    FieldOutOfBounds {
        offset: u64,
        length: usize,
        file_size: u64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Open/seek/read/write failures, including bounds failures against the file.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::ShortRead { .. } | Error::FieldOutOfBounds { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::UnsupportedFormat("song.xyz".into()).to_string(),
            "File format not supported: song.xyz"
        );
        assert_eq!(
            Error::UnsupportedField {
                field: Field::Tracker,
                format: Format::Mod
            }
            .to_string(),
            "Cannot set tracker for format MOD"
        );
        assert_eq!(
            Error::ValueTooLong {
                field: Field::Title,
                max: 20,
                actual: 21
            }
            .to_string(),
            "title longer than maximum allowed length 20 (21 bytes), aborting!"
        );
    }

    #[test]
    fn test_is_io() {
        let io = Error::from(std::io::Error::from(std::io::ErrorKind::NotFound));
        assert!(io.is_io());
        assert!(Error::ShortRead {
            offset: 17,
            length: 20,
            available: 3
        }
        .is_io());
        assert!(!Error::UnsupportedFormat("x".into()).is_io());
    }
}

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::format::{Field, FieldLocation, Format};

/// Raw content of a field as stored in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// The format has no such field.
    Unsupported,
    /// Exactly `length` bytes, padding included.
    Raw(Vec<u8>),
}

impl FieldValue {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            FieldValue::Unsupported => None,
            FieldValue::Raw(bytes) => Some(bytes),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, FieldValue::Raw(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Unsupported => f.write_str("n/a"),
            FieldValue::Raw(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

/// Reads the field region at `location`, or returns `Unsupported` without
/// touching the file when there is none.
pub fn read_field<P: AsRef<Path>>(path: P, location: Option<FieldLocation>) -> Result<FieldValue> {
    let Some(location) = location else {
        return Ok(FieldValue::Unsupported);
    };

    let mut file = File::open(path.as_ref())?;
    let file_size = file.metadata()?.len();
    if location.end() > file_size {
        return Err(Error::ShortRead {
            offset: location.offset,
            length: location.length,
            available: file_size.saturating_sub(location.offset),
        });
    }

    let mut buf = vec![0u8; location.length];
    file.seek(SeekFrom::Start(location.offset))?;
    file.read_exact(&mut buf)?;

    log::debug!(
        "read {} bytes at {:#x} from {}",
        buf.len(),
        location.offset,
        path.as_ref().display()
    );
    Ok(FieldValue::Raw(buf))
}

/// Left-aligns `value` in a zero-filled buffer of `length` bytes.
pub fn encode_field(value: &[u8], length: usize) -> Vec<u8> {
    let mut buf = vec![0u8; length];
    buf[..value.len()].copy_from_slice(value);
    buf
}

/// Overwrites the region at `location` with `value`, zero-padded to the
/// field width. Nothing outside the region changes and the file never grows.
pub fn write_field<P: AsRef<Path>>(
    path: P,
    field: Field,
    location: Option<FieldLocation>,
    format: Format,
    value: &[u8],
) -> Result<()> {
    let Some(location) = location else {
        log::warn!("{format} has no {field} field");
        return Err(Error::UnsupportedField { field, format });
    };
    if value.len() > location.length {
        log::warn!(
            "rejecting {field} of {} bytes (max {})",
            value.len(),
            location.length
        );
        return Err(Error::ValueTooLong {
            field,
            max: location.length,
            actual: value.len(),
        });
    }

    let buf = encode_field(value, location.length);

    let mut file = OpenOptions::new().read(true).write(true).open(path.as_ref())?;
    let file_size = file.metadata()?.len();
    if location.end() > file_size {
        return Err(Error::FieldOutOfBounds {
            offset: location.offset,
            length: location.length,
            file_size,
        });
    }

    file.seek(SeekFrom::Start(location.offset))?;
    file.write_all(&buf)?;
    file.flush()?;

    log::info!(
        "wrote {field} ({} of {} bytes) at {:#x} in {}",
        value.len(),
        location.length,
        location.offset,
        path.as_ref().display()
    );
    Ok(())
}

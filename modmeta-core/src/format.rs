//! Fixed field layout of the supported tracker module formats.
//!
//! Offsets come from the format headers:
//! - XM: <http://content.gpwiki.org/index.php/XM>
//! - MOD: <http://www.aes.id.au/modformat.html>
//! - S3M: <http://hackipedia.org/File%20formats/Music/Sample%20based/html/s3mformat.html>
//! - IT: song name follows the 4-byte `IMPM` magic.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// A named metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Tracker,
}

impl Field {
    /// Display order.
    pub const ALL: [Field; 2] = [Field::Title, Field::Tracker];

    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Tracker => "tracker",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Byte region of a field inside a module file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLocation {
    pub offset: u64,
    pub length: usize,
}

impl FieldLocation {
    pub const fn new(offset: u64, length: usize) -> Self {
        Self { offset, length }
    }

    /// One past the last byte of the region.
    pub fn end(&self) -> u64 {
        self.offset + self.length as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Xm,
    Mod,
    It,
    S3m,
}

#[derive(Debug)]
pub struct FormatDescriptor {
    pub format: Format,
    /// Extension without the leading dot, matched case-sensitively.
    pub extension: &'static str,
    pub name: &'static str,
    pub title: Option<FieldLocation>,
    pub tracker: Option<FieldLocation>,
}

impl FormatDescriptor {
    pub fn location(&self, field: Field) -> Option<FieldLocation> {
        match field {
            Field::Title => self.title,
            Field::Tracker => self.tracker,
        }
    }
}

pub static FORMATS: &[FormatDescriptor] = &[
    FormatDescriptor {
        format: Format::Xm,
        extension: "xm",
        name: "XM",
        title: Some(FieldLocation::new(17, 20)),
        tracker: Some(FieldLocation::new(38, 20)),
    },
    FormatDescriptor {
        format: Format::Mod,
        extension: "mod",
        name: "MOD",
        title: Some(FieldLocation::new(0, 20)),
        tracker: None,
    },
    FormatDescriptor {
        format: Format::It,
        extension: "it",
        name: "IT",
        title: Some(FieldLocation::new(4, 20)),
        tracker: None,
    },
    FormatDescriptor {
        format: Format::S3m,
        extension: "s3m",
        name: "S3M",
        title: Some(FieldLocation::new(0, 28)),
        tracker: None,
    },
];

impl Format {
    pub fn from_extension(ext: &str) -> Option<Format> {
        FORMATS
            .iter()
            .find(|d| d.extension == ext)
            .map(|d| d.format)
    }

    /// Resolves the format from the file name alone; the file is not opened.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
            .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
    }

    pub fn descriptor(self) -> &'static FormatDescriptor {
        // FORMATS holds one entry per variant, in declaration order.
        &FORMATS[self as usize]
    }

    pub fn location(self, field: Field) -> Option<FieldLocation> {
        self.descriptor().location(field)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().name)
    }
}

/// Looks up where `field` lives for `format`, or `None` if the format lacks it.
pub fn resolve_field(format: Format, field: Field) -> Option<FieldLocation> {
    let location = format.location(field);
    log::debug!("{format} {field} -> {location:?}");
    location
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_order_matches_variants() {
        for d in FORMATS {
            assert_eq!(d.format.descriptor().extension, d.extension);
        }
    }

    #[test]
    fn test_layout_table() {
        assert_eq!(
            resolve_field(Format::Xm, Field::Title),
            Some(FieldLocation::new(17, 20))
        );
        assert_eq!(
            resolve_field(Format::Xm, Field::Tracker),
            Some(FieldLocation::new(38, 20))
        );
        assert_eq!(
            resolve_field(Format::Mod, Field::Title),
            Some(FieldLocation::new(0, 20))
        );
        assert_eq!(
            resolve_field(Format::It, Field::Title),
            Some(FieldLocation::new(4, 20))
        );
        assert_eq!(
            resolve_field(Format::S3m, Field::Title),
            Some(FieldLocation::new(0, 28))
        );
        for format in [Format::Mod, Format::It, Format::S3m] {
            assert_eq!(resolve_field(format, Field::Tracker), None);
        }
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Format::from_path("song.xm").unwrap(), Format::Xm);
        assert_eq!(Format::from_path("dir/a.b.mod").unwrap(), Format::Mod);
        assert_eq!(Format::from_path("x.it").unwrap(), Format::It);
        assert_eq!(Format::from_path("x.s3m").unwrap(), Format::S3m);
    }

    #[test]
    fn test_from_path_is_exact() {
        for name in ["song.XM", "song.Mod", "song.xyz", "song", ".xm", "song.xm.bak"] {
            assert!(
                matches!(Format::from_path(name), Err(Error::UnsupportedFormat(_))),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_field_location_end() {
        assert_eq!(FieldLocation::new(38, 20).end(), 58);
    }
}

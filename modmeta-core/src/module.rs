use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::field::{read_field, write_field, FieldValue};
use crate::format::{resolve_field, Field, FieldLocation, Format};

/// A tracker module on disk. Holds no open handle; every read or write opens
/// the file, does one operation and closes it again.
#[derive(Debug, Clone)]
pub struct ModuleFile {
    pub path: PathBuf,
    pub format: Format,
}

impl ModuleFile {
    /// Resolves the format from the file name. Fails with `UnsupportedFormat`
    /// before any I/O.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = Format::from_path(&path)?;
        log::info!("{} detected as {format}", path.as_ref().display());
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            format,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn location(&self, field: Field) -> Option<FieldLocation> {
        resolve_field(self.format, field)
    }

    pub fn read(&self, field: Field) -> Result<FieldValue> {
        read_field(&self.path, self.location(field))
    }

    pub fn write(&self, field: Field, value: &[u8]) -> Result<()> {
        write_field(&self.path, field, self.location(field), self.format, value)
    }

    pub fn set_title(&self, title: &str) -> Result<()> {
        self.write(Field::Title, title.as_bytes())
    }

    /// Every known field in display order.
    pub fn metadata(&self) -> Result<Vec<(Field, FieldValue)>> {
        Field::ALL
            .iter()
            .map(|&field| Ok((field, self.read(field)?)))
            .collect()
    }
}

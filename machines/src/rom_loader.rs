//! Table ROM loading and validation.
//!
//! The coprocessor's translator tables can be replaced by a dumped table
//! image. Images are supplied as a directory of loose files, an archive the
//! frontend unpacks, or byte slices (for testing). The image size is always
//! enforced; a CRC32 check is available when a reference checksum is known.

use std::collections::HashMap;
use std::path::Path;

use gatekeeper_core::mcu::tables::{TRANSLATOR_IMAGE_SIZE, TableImageError, TranslatorTables};
use thiserror::Error;

// ---------------------------------------------------------------------------
// CRC-32 (private)
// ---------------------------------------------------------------------------

/// CRC-32 lookup table (reflected polynomial 0xEDB88320).
const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0u32;
    while i < 256 {
        let mut crc = i;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i as usize] = crc;
        i += 1;
    }
    table
};

/// Compute the CRC-32 checksum of a byte slice.
fn crc32(data: &[u8]) -> u32 {
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ CRC32_TABLE[index];
    }
    crc ^ 0xFFFF_FFFF
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum RomLoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing ROM file: {0}")]
    MissingFile(String),

    #[error("ROM {file}: expected {expected} bytes, got {actual}")]
    SizeMismatch {
        file: String,
        expected: usize,
        actual: usize,
    },

    #[error("ROM {file}: CRC32 expected 0x{expected:08X}, got 0x{actual:08X}")]
    ChecksumMismatch {
        file: String,
        expected: u32,
        actual: u32,
    },

    #[error(transparent)]
    TableImage(#[from] TableImageError),
}

// ---------------------------------------------------------------------------
// RomSet
// ---------------------------------------------------------------------------

/// Named ROM files, loaded from disk or provided programmatically.
#[derive(Debug, Default)]
pub struct RomSet {
    files: HashMap<String, Vec<u8>>,
}

impl RomSet {
    /// Read every regular file in `path` (non-recursive), keyed by file name.
    pub fn from_directory(path: &Path) -> Result<Self, RomLoadError> {
        let mut files = HashMap::new();
        for entry in std::fs::read_dir(path)? {
            let file_path = entry?.path();
            if !file_path.is_file() {
                continue;
            }
            let Some(name) = file_path.file_name() else {
                continue;
            };
            let name = name.to_string_lossy().to_string();
            files.insert(name, std::fs::read(&file_path)?);
        }
        log::debug!("loaded {} ROM file(s) from {}", files.len(), path.display());
        Ok(Self { files })
    }

    /// Build from owned `(name, data)` pairs, e.g. unpacked archive entries.
    pub fn from_entries(entries: Vec<(String, Vec<u8>)>) -> Self {
        Self {
            files: entries.into_iter().collect(),
        }
    }

    pub fn from_slices(entries: &[(&str, &[u8])]) -> Self {
        let files = entries
            .iter()
            .map(|(name, data)| (name.to_string(), data.to_vec()))
            .collect();
        Self { files }
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(|v| v.as_slice())
    }

    pub fn require(&self, name: &str) -> Result<&[u8], RomLoadError> {
        self.get(name)
            .ok_or_else(|| RomLoadError::MissingFile(name.to_string()))
    }

    pub fn require_sized(&self, name: &str, expected: usize) -> Result<&[u8], RomLoadError> {
        let data = self.require(name)?;
        if data.len() != expected {
            return Err(RomLoadError::SizeMismatch {
                file: name.to_string(),
                expected,
                actual: data.len(),
            });
        }
        Ok(data)
    }
}

// ---------------------------------------------------------------------------
// Translator table image
// ---------------------------------------------------------------------------

/// File name of the translator table image inside a ROM set.
pub const TABLE_IMAGE_NAME: &str = "translate.bin";

/// Check the table image against a known-good dump checksum.
pub fn verify_table_image(rom_set: &RomSet, expected: u32) -> Result<(), RomLoadError> {
    let data = rom_set.require_sized(TABLE_IMAGE_NAME, TRANSLATOR_IMAGE_SIZE)?;
    let actual = crc32(data);
    if actual != expected {
        return Err(RomLoadError::ChecksumMismatch {
            file: TABLE_IMAGE_NAME.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Load translator tables from a ROM set. Size is always enforced.
pub fn load_translator_tables(rom_set: &RomSet) -> Result<TranslatorTables, RomLoadError> {
    let image = rom_set.require_sized(TABLE_IMAGE_NAME, TRANSLATOR_IMAGE_SIZE)?;
    Ok(TranslatorTables::from_image(image)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

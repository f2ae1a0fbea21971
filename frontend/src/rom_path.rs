//! Table ROM path resolution: loads a [`RomSet`] from a rompath directory,
//! a direct ZIP file, or a directory of loose files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use gatekeeper_machines::rom_loader::{RomLoadError, RomSet};

/// Resolve `path` and load every file it names.
///
/// 1. `*.zip` is read as an archive.
/// 2. A directory holding `{rom_name}.zip` loads that archive.
/// 3. Any other directory is read as loose files.
pub fn load_rom_set(rom_name: &str, path: &Path) -> Result<RomSet, RomLoadError> {
    if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("zip"))
    {
        return load_from_zip(path);
    }

    if path.is_dir() {
        let zip_path = path.join(format!("{rom_name}.zip"));
        if zip_path.exists() {
            return load_from_zip(&zip_path);
        }
        return RomSet::from_directory(path);
    }

    Err(RomLoadError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("ROM path not found: {}", path.display()),
    )))
}

fn load_from_zip(path: &Path) -> Result<RomSet, RomLoadError> {
    let reader = BufReader::new(File::open(path)?);
    let mut archive = zip::ZipArchive::new(reader).map_err(invalid_zip)?;

    let mut entries = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(invalid_zip)?;
        if entry.is_dir() {
            continue;
        }
        // Archives sometimes nest files in a folder; keep the bare name.
        let name = entry
            .name()
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;
        entries.push((name, data));
    }

    log::debug!("loaded {} file(s) from {}", entries.len(), path.display());
    Ok(RomSet::from_entries(entries))
}

fn invalid_zip(e: zip::result::ZipError) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidData, format!("invalid ZIP: {e}"))
}

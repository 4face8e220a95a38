//! Filesystem utilities for file reading and atomic writing.

use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process;

use crate::error::{Error, Result};

/// Reads the entire contents of a file as bytes.
///
/// A missing file is reported as `Error::PathNotFound`; any other failure
/// is passed through as `Error::Io`.
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            Error::PathNotFound(path.as_ref().to_path_buf())
        } else {
            Error::Io(e)
        }
    })
}

/// Writes data to a file atomically.
///
/// The data goes to a temporary sibling file first, which is then renamed
/// over the target. Readers see either the old or the new contents, never a
/// partial write. A failed write removes its temporary file.
pub fn write_file_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file path: {}", path.display()),
        )
    })?;

    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Same directory as the target, so the rename stays on one filesystem.
    let mut temp_name = OsString::from(".");
    temp_name.push(name);
    temp_name.push(format!(".{}.tmp", process::id()));
    let temp_path = dir.join(temp_name);

    // Data must be on disk before the rename publishes it.
    let written = fs::File::create(&temp_path).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::Io(e));
    }

    fs::rename(&temp_path, path)?;

    Ok(())
}

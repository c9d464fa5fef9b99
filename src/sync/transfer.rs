//! File copies that carry the source's last-write time over to the destination.
//!
//! Freshness is decided purely by last-write time, so a copied savegame has to
//! look exactly as old as the file it came from.

use filetime::{set_file_mtime, FileTime};
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

/// Copy `from` over `to`, replacing any existing file.
///
/// Refuses when both paths name the same file, since opening the destination
/// truncates it. A copy whose last-write time could not be carried over is
/// still an error: the destination would look newer than its source and the
/// next sync would copy it back the other way.
pub fn copy_overwrite(from: &Path, to: &Path) -> io::Result<u64> {
    if same_file(from, to) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "source and destination are the same file: '{}'",
                from.display()
            ),
        ));
    }
    let bytes = fs::copy(from, to)?;
    carry_mtime(from, to).map_err(mtime_not_kept)?;
    Ok(bytes)
}

/// Copy `from` to `to`, failing with `AlreadyExists` if `to` is already there
pub fn copy_new(from: &Path, to: &Path) -> io::Result<u64> {
    let mut source = fs::File::open(from)?;
    let mut dest = OpenOptions::new().write(true).create_new(true).open(to)?;
    let bytes = io::copy(&mut source, &mut dest)?;
    dest.sync_all()?;
    drop(dest);
    carry_mtime(from, to).map_err(mtime_not_kept)?;
    Ok(bytes)
}

/// Whether both paths resolve to the same file. A destination that does not
/// exist yet never matches.
pub fn same_file(from: &Path, to: &Path) -> bool {
    match (fs::canonicalize(from), fs::canonicalize(to)) {
        (Ok(from), Ok(to)) => from == to,
        _ => false,
    }
}

fn mtime_not_kept(err: io::Error) -> io::Error {
    io::Error::new(
        err.kind(),
        format!("file was copied but its last-write time was not kept: {err}"),
    )
}

fn carry_mtime(from: &Path, to: &Path) -> io::Result<()> {
    let metadata = fs::metadata(from)?;
    set_file_mtime(to, FileTime::from_last_modification_time(&metadata))
}

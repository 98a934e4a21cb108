//! FITS file discovery and header collection.
//!
//! Walks an input directory tree, decompresses gzipped FITS files in
//! place, and reads each file's primary header into a [`HeaderStore`].

use crate::constants::{FITS_FILE_MARKER, GZIP_EXTENSION};
use crate::error::{GrouperError, Result};
use crate::fits;
use crate::models::HeaderStore;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Collect headers of all FITS files under the input directory.
///
/// Compressed files are replaced on disk by their decompressed form
/// before the header is read, so the returned store only names files a
/// downstream reduction can open directly.
pub fn collect_headers(input_dir: &Path) -> Result<HeaderStore> {
    if !input_dir.is_dir() {
        return Err(GrouperError::InputDirNotFound {
            path: input_dir.to_path_buf(),
        });
    }

    debug!("searching for FITS files in {}", input_dir.display());

    let mut headers = HeaderStore::new();

    for entry in WalkDir::new(input_dir) {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_fits_file(entry.path()) {
            continue;
        }

        let path = if is_gzipped(entry.path()) {
            decompress_in_place(entry.path())?
        } else {
            entry.path().to_path_buf()
        };

        let header = fits::read_header(&path)?;
        headers.insert(path.to_string_lossy().into_owned(), header);
    }

    debug!(
        "collected {} headers under {}",
        headers.len(),
        input_dir.display()
    );

    Ok(headers)
}

/// Check if a path names a FITS file (possibly compressed)
fn is_fits_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.contains(FITS_FILE_MARKER))
}

/// Check if a path names a gzip-compressed file
fn is_gzipped(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == GZIP_EXTENSION)
}

/// Replace a gzipped file with its decompressed form, returning the new path
fn decompress_in_place(path: &Path) -> Result<PathBuf> {
    let target = path.with_extension("");

    debug!("decompressing {}", path.display());

    let mut decoder = GzDecoder::new(BufReader::new(File::open(path)?));
    let mut output = BufWriter::new(File::create(&target)?);
    io::copy(&mut decoder, &mut output)?;
    drop(output);

    fs::remove_file(path)?;

    Ok(target)
}

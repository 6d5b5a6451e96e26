//! Writing the finished PDF to disk

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;

const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// A PDF that has been written to disk
#[derive(Debug, Clone, PartialEq)]
pub struct WrittenPdf {
    /// Where the file was written
    pub path: PathBuf,
    /// File size in bytes
    pub bytes: u64,
}

impl WrittenPdf {
    /// File size in mebibytes
    pub fn size_mib(&self) -> f64 {
        self.bytes as f64 / BYTES_PER_MIB
    }
}

/// Write PDF bytes to `path`, creating missing parent directories
///
/// The bytes go to a temporary file next to `path` which is then renamed over
/// it, so `path` either keeps its old content or holds the complete PDF.
pub fn write_pdf(path: &Path, pdf: &[u8]) -> Result<WrittenPdf> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(pdf)?;
    file.as_file().sync_all()?;

    // NamedTempFile is created 0600; give the PDF ordinary permissions
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))?;
    }

    file.persist(path).map_err(|e| e.error)?;
    let bytes = fs::metadata(path)?.len();

    Ok(WrittenPdf {
        path: path.to_path_buf(),
        bytes,
    })
}

//! exiftool-backed metadata store.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::MetadataStore;
use crate::error::{PixsigError, Result};

/// Metadata store that shells out to an exiftool-compatible binary.
///
/// Writes are staged: exiftool emits the tagged copy into a temporary file
/// in the target's directory, which is then renamed over the original. A
/// failed write leaves the image exactly as it was.
#[derive(Debug, Clone)]
pub struct ExifToolStore {
    binary: String,
}

impl ExifToolStore {
    pub fn new() -> Self {
        Self {
            binary: "exiftool".into(),
        }
    }

    /// Use a different binary name or path (e.g. a wrapper script in tests).
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn run(&self, args: &[&OsStr]) -> Result<std::process::Output> {
        debug!(binary = %self.binary, ?args, "Invoking metadata tool");
        Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| PixsigError::ExternalTool(format!("failed to run {}: {e}", self.binary)))
    }
}

impl Default for ExifToolStore {
    fn default() -> Self {
        Self::new()
    }
}

fn stderr_excerpt(output: &std::process::Output) -> String {
    let text = String::from_utf8_lossy(&output.stderr);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        output.status.to_string()
    } else {
        trimmed.to_string()
    }
}

impl MetadataStore for ExifToolStore {
    fn write_tag(&self, path: &Path, tag: &str, value: &str) -> Result<()> {
        std::fs::metadata(path).map_err(|source| PixsigError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("tmp")
            .to_string();

        // Stage into the same directory so the final rename cannot cross a
        // filesystem boundary. The extension is kept because exiftool picks
        // its writer from it.
        let staged = tempfile::Builder::new()
            .prefix(".pixsig-")
            .suffix(&format!(".{extension}"))
            .tempfile_in(dir.unwrap_or_else(|| Path::new(".")))
            .map_err(|e| PixsigError::MetadataWrite(format!("failed to stage output: {e}")))?
            .into_temp_path();

        // exiftool refuses to write over an existing output file.
        let _ = std::fs::remove_file(&staged);

        let assignment = format!("-{tag}={value}");
        let output = self.run(&[
            OsStr::new(&assignment),
            OsStr::new("-o"),
            staged.as_os_str(),
            path.as_os_str(),
        ])?;

        if !output.status.success() {
            return Err(PixsigError::MetadataWrite(stderr_excerpt(&output)));
        }

        std::fs::rename(&staged, path)
            .map_err(|e| PixsigError::MetadataWrite(format!("failed to replace image: {e}")))?;

        debug!(path = %path.display(), tag, bytes = value.len(), "Wrote metadata tag");
        Ok(())
    }

    fn read_tag(&self, path: &Path, tag: &str) -> Result<Option<Vec<u8>>> {
        std::fs::metadata(path).map_err(|source| PixsigError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;

        let selector = format!("-{tag}");
        let output = self.run(&[OsStr::new("-b"), OsStr::new(&selector), path.as_os_str()])?;

        if !output.status.success() {
            return Err(PixsigError::ExternalTool(stderr_excerpt(&output)));
        }

        debug!(path = %path.display(), tag, bytes = output.stdout.len(), "Read metadata tag");

        if output.stdout.is_empty() {
            Ok(None)
        } else {
            Ok(Some(output.stdout))
        }
    }
}

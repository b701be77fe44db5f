use crate::generator::error::GenerateError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Atomically write `contents` to `path`, creating parent directories.
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed over the target, so readers never observe a half-written
/// artifact. Unchanged files are left alone.
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), GenerateError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|source| GenerateError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    if fs::read(path).is_ok_and(|existing| existing == contents.as_bytes()) {
        debug!(file = %path.display(), "Artifact unchanged");
        return Ok(());
    }

    let write_err = |source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644)).map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

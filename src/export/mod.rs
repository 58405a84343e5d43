/// Sinks: turn parsed / rotated data into files on disk.
///
/// ```text
///   RawTable ──► csv  ──► <name>.csv
///   RotatedFrame ──► png ──► <name>.png
/// ```
///
/// Both sinks write into a temporary file next to the destination and rename
/// it into place, so a failed conversion never leaves a partial artifact.

pub mod csv;
pub mod png;

use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::data::error::ConvertError;

/// `<out_dir>/<file name of source>.<ext>`, e.g. `run_45_deg.odt.png`.
pub fn artifact_path(out_dir: &Path, source: &Path, ext: &str) -> PathBuf {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    out_dir.join(format!("{name}.{ext}"))
}

/// Run `write` against a temp file in `dest`'s directory, then move it to `dest`.
/// The temp file keeps `dest`'s extension so format sniffing by name still works.
pub(crate) fn write_atomically<F>(dest: &Path, write: F) -> Result<(), ConvertError>
where
    F: FnOnce(&mut NamedTempFile) -> Result<(), ConvertError>,
{
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let suffix = dest
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut tmp = tempfile::Builder::new()
        .prefix(".partial-")
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(|e| ConvertError::io(dir, e))?;

    // On error `tmp` is dropped here and the file removed.
    write(&mut tmp)?;

    tmp.persist(dest).map_err(|e| ConvertError::io(dest, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_artifact_path_appends_extension() {
        let p = artifact_path(Path::new("/out"), Path::new("/data/run_45_deg.odt"), "png");
        assert_eq!(p, PathBuf::from("/out/run_45_deg.odt.png"));
    }

    #[test]
    fn test_atomic_write_success() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.csv");
        write_atomically(&dest, |f| {
            f.write_all(b"hello").map_err(|e| ConvertError::io("tmp", e))
        })
        .unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "hello");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_atomic_write_failure_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("a.csv");
        let err = write_atomically(&dest, |f| {
            f.write_all(b"half").unwrap();
            Err(ConvertError::EmptyTable)
        })
        .unwrap_err();
        assert!(matches!(err, ConvertError::EmptyTable));
        assert!(!dest.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_atomic_write_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nope").join("a.csv");
        let err = write_atomically(&dest, |_| Ok(())).unwrap_err();
        assert!(matches!(err, ConvertError::Io { .. }));
    }
}

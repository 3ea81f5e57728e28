use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Python module template. The header warns readers off editing or tracking
/// the generated file.
const PY_TEMPLATE: &str = "\
# coding: utf-8
# file generated by scmver
# don't change, don't track in version control
version = '{version}'
";

const TXT_TEMPLATE: &str = "{version}";

fn template_for(extension: &str) -> Option<&'static str> {
    match extension {
        "txt" => Some(TXT_TEMPLATE),
        "py" => Some(PY_TEMPLATE),
        _ => None,
    }
}

/// Persists a computed version string to `root.join(write_to)`.
///
/// The file format is inferred from the target's extension; `.txt` (the bare
/// string) and `.py` (a generated single-assignment module) are supported.
/// An unrecognized extension fails with [`Error::BadFileFormat`] before
/// anything is written. There is no silent fallback: a wrong-format version
/// file would corrupt downstream packaging metadata.
///
/// ```no_run
/// use scmver::dump_version;
/// use std::path::Path;
///
/// dump_version(Path::new("."), "1.2.dev3", Path::new("VERSION.txt"))?;
/// # Ok::<(), scmver::Error>(())
/// ```
pub fn dump_version(root: &Path, version: &str, write_to: &Path) -> Result<()> {
    let target = root.join(write_to);
    let extension = target
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default();
    let template = template_for(&extension).ok_or_else(|| Error::BadFileFormat {
        extension: if extension.is_empty() {
            String::new()
        } else {
            format!(".{extension}")
        },
        path: target.clone(),
    })?;
    fs::write(&target, template.replace("{version}", version)).map_err(|source| {
        Error::WriteFailed {
            path: target,
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_txt() {
        let dir = tempfile::tempdir().unwrap();
        dump_version(dir.path(), "1.2.dev3", Path::new("VERSION.txt")).unwrap();
        let written = fs::read_to_string(dir.path().join("VERSION.txt")).unwrap();
        assert_eq!(written, "1.2.dev3");
    }

    #[test]
    fn test_dump_py() {
        let dir = tempfile::tempdir().unwrap();
        dump_version(dir.path(), "1.1", Path::new("_version.py")).unwrap();
        let written = fs::read_to_string(dir.path().join("_version.py")).unwrap();
        assert!(written.contains("version = '1.1'"));
        assert!(written.starts_with("# coding: utf-8"));
    }

    #[test]
    fn test_dump_into_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        dump_version(dir.path(), "1.1", Path::new("src/_version.py")).unwrap();
        assert!(dir.path().join("src/_version.py").exists());
    }

    #[test]
    fn test_unknown_extension_fails_with_fixed_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let err = dump_version(dir.path(), "1.1", Path::new("VERSION")).unwrap_err();
        assert!(err.to_string().starts_with("bad file format:"));
        // the target must be left untouched
        assert!(!dir.path().join("VERSION").exists());

        let err = dump_version(dir.path(), "1.1", Path::new("VERSION.json")).unwrap_err();
        assert!(err.to_string().starts_with("bad file format: '.json'"));
        assert!(!dir.path().join("VERSION.json").exists());
    }

    #[test]
    fn test_write_failure_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        // missing parent directory
        let err = dump_version(dir.path(), "1.1", Path::new("missing/VERSION.txt")).unwrap_err();
        assert!(matches!(err, Error::WriteFailed { .. }));
    }
}

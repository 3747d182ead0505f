//! Directory enumeration.

use rustix::fs::{self, Dir, Mode, OFlags};
use std::path::Path;

use crate::error::FsResult;

/// Names in one native directory, read once from the start.
///
/// Owns the native directory stream; dropping the `DirStream` closes it,
/// whether iteration finished, stopped early, or hit an error. `.` and `..`
/// are skipped.
#[derive(Debug)]
pub struct DirStream {
    dir: Dir,
}

impl DirStream {
    /// Open the native directory at `path`.
    pub fn open(path: &Path) -> FsResult<Self> {
        let fd = fs::open(
            path,
            OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
            Mode::empty(),
        )?;
        let dir = Dir::read_from(&fd)?;
        Ok(Self { dir })
    }
}

impl Iterator for DirStream {
    type Item = FsResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.dir.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(e.into())),
            };
            let name = entry.file_name().to_bytes();
            if name == b"." || name == b".." {
                continue;
            }
            return Some(Ok(String::from_utf8_lossy(name).into_owned()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FsError;
    use tempfile::TempDir;

    #[test]
    fn test_lists_names_without_dot_entries() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a"), "").unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();

        let mut names: Vec<_> = DirStream::open(dir.path())
            .unwrap()
            .collect::<FsResult<_>>()
            .unwrap();
        names.sort();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn test_open_missing() {
        let dir = TempDir::new().unwrap();
        let err = DirStream::open(&dir.path().join("nope")).unwrap_err();
        assert_eq!(err, FsError::NotFound);
    }

    #[test]
    fn test_open_file_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("f"), "x").unwrap();
        let err = DirStream::open(&dir.path().join("f")).unwrap_err();
        assert_eq!(err, FsError::NotADirectory);
    }
}

//! Adapter configuration.

use std::path::{Path, PathBuf};

use crate::error::{FsError, FsResult};
use crate::passthrough::Passthrough;

/// Startup settings for a [`Passthrough`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassthroughConfig {
    /// Absolute native directory exposed as `/`.
    pub root: PathBuf,
}

impl PassthroughConfig {
    /// Make `root` absolute against the current directory.
    ///
    /// Symlinks are not resolved and nothing is checked yet; see
    /// [`validate`](Self::validate).
    pub fn new(root: impl AsRef<Path>) -> FsResult<Self> {
        let root = std::path::absolute(root.as_ref())?;
        Ok(Self { root })
    }

    /// The root must exist and be a directory.
    pub fn validate(&self) -> FsResult<()> {
        let meta = std::fs::metadata(&self.root)?;
        if !meta.is_dir() {
            return Err(FsError::NotADirectory);
        }
        Ok(())
    }

    /// Validate and build the adapter.
    pub fn build(self) -> FsResult<Passthrough> {
        self.validate()?;
        Ok(Passthrough::new(self.root))
    }
}

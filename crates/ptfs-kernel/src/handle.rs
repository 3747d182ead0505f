//! Open-file handles and the path-or-handle choice.

use std::os::fd::{BorrowedFd, IntoRawFd, OwnedFd, RawFd};

use ptfs_types::NO_HANDLE;

use crate::error::{FsError, FsResult};

/// An open native descriptor, as handed to the host.
///
/// Created only by `create`, `open` and `opendir`; given back up only by
/// `release` and `releasedir`, which take it by value. Dropping a handle
/// without releasing it leaks the descriptor.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a FileHandle leaks its descriptor unless released"]
pub struct FileHandle {
    fd: RawFd,
}

impl FileHandle {
    pub(crate) fn from_owned(fd: OwnedFd) -> Self {
        Self {
            fd: fd.into_raw_fd(),
        }
    }

    /// Rebuild a handle from the value the host passed back.
    ///
    /// Only [`NO_HANDLE`] means "no handle". Any other value is taken as a
    /// descriptor, and one that cannot be a descriptor at all is
    /// `BadHandle`, as the native call on it would be. The value is trusted
    /// otherwise: the host must only pass back handles it got from us and
    /// has not released.
    pub(crate) fn from_abi(fh: u64) -> FsResult<Option<Self>> {
        if fh == NO_HANDLE {
            return Ok(None);
        }
        let fd = RawFd::try_from(fh).map_err(|_| FsError::BadHandle)?;
        Ok(Some(Self { fd }))
    }

    /// The value handed to the host: the descriptor, widened.
    pub fn to_abi(&self) -> u64 {
        self.fd as u64
    }

    pub(crate) fn into_raw(self) -> RawFd {
        self.fd
    }

    pub(crate) fn as_fd(&self) -> BorrowedFd<'_> {
        // SAFETY: a FileHandle only exists for a descriptor we opened and
        // have not closed; release consumes the handle before closing.
        unsafe { BorrowedFd::borrow_raw(self.fd) }
    }
}

/// What an operation that accepts either form acts on.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    ByPath(&'a str),
    ByHandle(&'a FileHandle),
}

impl<'a> Target<'a> {
    /// Prefer the handle; fall back to the path when there is none.
    ///
    /// Together with `FileHandle::from_abi`, this is the one place the
    /// sentinel handle turns into a path lookup.
    pub fn new(path: &'a str, handle: Option<&'a FileHandle>) -> Self {
        match handle {
            Some(handle) => Target::ByHandle(handle),
            None => Target::ByPath(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_is_no_handle() {
        assert_eq!(FileHandle::from_abi(NO_HANDLE), Ok(None));
    }

    #[test]
    fn test_out_of_range_is_bad_handle() {
        for fh in [1 << 32, u64::from(u32::MAX), NO_HANDLE - 1] {
            assert_eq!(FileHandle::from_abi(fh), Err(FsError::BadHandle), "fh {fh}");
        }
    }

    #[test]
    fn test_abi_value_is_descriptor() {
        let handle = FileHandle::from_abi(7).unwrap().unwrap();
        assert_eq!(handle.to_abi(), 7);
        assert_eq!(handle.into_raw(), 7);
    }

    #[test]
    fn test_target_prefers_handle() {
        let handle = FileHandle::from_abi(NO_HANDLE).unwrap();
        assert!(matches!(Target::new("/a", handle.as_ref()), Target::ByPath("/a")));

        let handle = FileHandle::from_abi(3).unwrap();
        match Target::new("/a", handle.as_ref()) {
            Target::ByHandle(h) => assert_eq!(h.to_abi(), 3),
            other => panic!("expected handle, got {other:?}"),
        }
    }
}

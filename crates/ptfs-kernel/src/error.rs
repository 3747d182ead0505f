//! Filesystem error kinds and their numeric projection.
//!
//! Every native failure is an errno. [`FsError`] names the common ones and
//! carries any other code in [`FsError::Os`], so converting an errno to an
//! `FsError` and back always yields the same number.

use rustix::io::Errno;
use std::io;
use thiserror::Error;

/// Largest errno the kernel ABI can encode.
const MAX_ERRNO: i32 = 4095;

/// Filesystem error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    /// File or directory not found (`ENOENT`).
    #[error("no such file or directory")]
    NotFound,

    /// Permission denied (`EACCES`).
    #[error("permission denied")]
    PermissionDenied,

    /// Operation not permitted (`EPERM`).
    #[error("operation not permitted")]
    NotPermitted,

    /// Path already exists (`EEXIST`).
    #[error("file exists")]
    AlreadyExists,

    /// Expected a directory (`ENOTDIR`).
    #[error("not a directory")]
    NotADirectory,

    /// Expected a non-directory (`EISDIR`).
    #[error("is a directory")]
    IsADirectory,

    /// Directory not empty (`ENOTEMPTY`).
    #[error("directory not empty")]
    DirectoryNotEmpty,

    /// Invalid argument (`EINVAL`).
    #[error("invalid argument")]
    InvalidArgument,

    /// Handle does not refer to an open descriptor (`EBADF`).
    #[error("bad file handle")]
    BadHandle,

    /// Cross-device link (`EXDEV`).
    #[error("cross-device link")]
    CrossDeviceLink,

    /// Too many symbolic links (`ELOOP`).
    #[error("too many symbolic links")]
    TooManySymlinks,

    /// File name too long (`ENAMETOOLONG`).
    #[error("file name too long")]
    NameTooLong,

    /// No space left on device (`ENOSPC`).
    #[error("no space left on device")]
    NoSpace,

    /// Filesystem is read-only (`EROFS`).
    #[error("read-only filesystem")]
    ReadOnly,

    /// I/O error (`EIO`).
    #[error("I/O error")]
    Io,

    /// Operation not implemented (`ENOSYS`).
    #[error("function not implemented")]
    NotSupported,

    /// Any other native error code.
    #[error("{0}")]
    Os(Errno),
}

impl FsError {
    /// Build from a raw errno value.
    ///
    /// Values outside `1..=MAX_ERRNO` are not errnos at all and become `Io`.
    pub fn from_raw_os_error(raw: i32) -> Self {
        if !(1..=MAX_ERRNO).contains(&raw) {
            return FsError::Io;
        }
        Errno::from_raw_os_error(raw).into()
    }

    /// The native error this kind stands for.
    pub fn errno(self) -> Errno {
        match self {
            FsError::NotFound => Errno::NOENT,
            FsError::PermissionDenied => Errno::ACCESS,
            FsError::NotPermitted => Errno::PERM,
            FsError::AlreadyExists => Errno::EXIST,
            FsError::NotADirectory => Errno::NOTDIR,
            FsError::IsADirectory => Errno::ISDIR,
            FsError::DirectoryNotEmpty => Errno::NOTEMPTY,
            FsError::InvalidArgument => Errno::INVAL,
            FsError::BadHandle => Errno::BADF,
            FsError::CrossDeviceLink => Errno::XDEV,
            FsError::TooManySymlinks => Errno::LOOP,
            FsError::NameTooLong => Errno::NAMETOOLONG,
            FsError::NoSpace => Errno::NOSPC,
            FsError::ReadOnly => Errno::ROFS,
            FsError::Io => Errno::IO,
            FsError::NotSupported => Errno::NOSYS,
            FsError::Os(errno) => errno,
        }
    }

    /// The value reported across the ABI: the negated errno.
    pub fn code(self) -> i32 {
        -self.errno().raw_os_error()
    }
}

impl From<Errno> for FsError {
    fn from(errno: Errno) -> Self {
        match errno {
            Errno::NOENT => FsError::NotFound,
            Errno::ACCESS => FsError::PermissionDenied,
            Errno::PERM => FsError::NotPermitted,
            Errno::EXIST => FsError::AlreadyExists,
            Errno::NOTDIR => FsError::NotADirectory,
            Errno::ISDIR => FsError::IsADirectory,
            Errno::NOTEMPTY => FsError::DirectoryNotEmpty,
            Errno::INVAL => FsError::InvalidArgument,
            Errno::BADF => FsError::BadHandle,
            Errno::XDEV => FsError::CrossDeviceLink,
            Errno::LOOP => FsError::TooManySymlinks,
            Errno::NAMETOOLONG => FsError::NameTooLong,
            Errno::NOSPC => FsError::NoSpace,
            Errno::ROFS => FsError::ReadOnly,
            Errno::IO => FsError::Io,
            Errno::NOSYS => FsError::NotSupported,
            other => FsError::Os(other),
        }
    }
}

/// Errors without an OS code (e.g. a short `write_all`) become `Io`.
impl From<io::Error> for FsError {
    fn from(e: io::Error) -> Self {
        Errno::from_io_error(&e).map_or(FsError::Io, FsError::from)
    }
}

impl From<FsError> for io::Error {
    fn from(e: FsError) -> Self {
        io::Error::from_raw_os_error(e.errno().raw_os_error())
    }
}

/// Filesystem result type.
pub type FsResult<T> = Result<T, FsError>;

/// Collapse a result into an ABI code: `0` on success, `-errno` on failure.
pub fn errc(result: FsResult<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => e.code(),
    }
}

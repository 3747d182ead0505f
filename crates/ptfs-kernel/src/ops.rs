//! The filesystem operation interface the host calls into.
//!
//! This is the ABI side of the adapter: paths are the host's virtual paths,
//! handles are plain `u64`s, and every result is an integer: `0` or a
//! non-negative byte count on success, `-errno` on failure. Out-values come
//! back as tuples, out-structures through `&mut` parameters.
//!
//! Every method has a default that reports `-ENOSYS`, so an implementation
//! only overrides what it supports.

use ptfs_types::{NO_HANDLE, Stat, Statfs, Timespec};

use crate::error::FsError;

/// Per-entry callback for [`FileSystemOps::readdir`].
///
/// Arguments are the entry name, optional attributes, and the offset of the
/// next entry (`0` when the implementation does not track offsets). Returns
/// `false` when the host wants no more entries.
pub type FillDir<'a> = dyn FnMut(&str, Option<&Stat>, i64) -> bool + 'a;

fn enosys() -> i32 {
    FsError::NotSupported.code()
}

/// Filesystem operations as the host invokes them.
///
/// Implementations must be callable from many host threads at once.
#[allow(unused_variables)]
pub trait FileSystemOps: Send + Sync {
    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Called once when the filesystem is mounted.
    fn init(&self) {}

    /// Called once when the filesystem is unmounted.
    fn destroy(&self) {}

    // ========================================================================
    // Filesystem
    // ========================================================================

    /// Fill `stat` with filesystem statistics.
    fn statfs(&self, path: &str, stat: &mut Statfs) -> i32 {
        enosys()
    }

    // ========================================================================
    // Nodes
    // ========================================================================

    /// Create a file node (regular, FIFO, device, socket).
    fn mknod(&self, path: &str, mode: u32, dev: u64) -> i32 {
        enosys()
    }

    /// Create a directory.
    fn mkdir(&self, path: &str, mode: u32) -> i32 {
        enosys()
    }

    /// Remove a file.
    fn unlink(&self, path: &str) -> i32 {
        enosys()
    }

    /// Remove an empty directory.
    fn rmdir(&self, path: &str) -> i32 {
        enosys()
    }

    /// Create a hard link `newpath` to `oldpath`.
    fn link(&self, oldpath: &str, newpath: &str) -> i32 {
        enosys()
    }

    /// Create a symbolic link `newpath` pointing at `target`.
    fn symlink(&self, target: &str, newpath: &str) -> i32 {
        enosys()
    }

    /// Read a symbolic link's target.
    fn readlink(&self, path: &str) -> (i32, String) {
        (enosys(), String::new())
    }

    /// Rename a file or directory.
    fn rename(&self, oldpath: &str, newpath: &str) -> i32 {
        enosys()
    }

    // ========================================================================
    // Attributes
    // ========================================================================

    /// Change permission bits.
    fn chmod(&self, path: &str, mode: u32) -> i32 {
        enosys()
    }

    /// Change owner and group. `u32::MAX` leaves that id unchanged.
    fn chown(&self, path: &str, uid: u32, gid: u32) -> i32 {
        enosys()
    }

    /// Set access (`tmsp[0]`) and modification (`tmsp[1]`) times.
    fn utimens(&self, path: &str, tmsp: &[Timespec; 2]) -> i32 {
        enosys()
    }

    /// Check access permissions (`F_OK`, `R_OK`, `W_OK`, `X_OK` mask).
    fn access(&self, path: &str, mask: u32) -> i32 {
        enosys()
    }

    /// Fill `stat` for `fh`, or for `path` when `fh` is [`NO_HANDLE`].
    fn getattr(&self, path: &str, stat: &mut Stat, fh: u64) -> i32 {
        enosys()
    }

    /// Set the file size, through `fh` or by `path` when `fh` is [`NO_HANDLE`].
    fn truncate(&self, path: &str, size: i64, fh: u64) -> i32 {
        enosys()
    }

    // ========================================================================
    // Files
    // ========================================================================

    /// Create and open a file for writing. Returns the new handle.
    fn create(&self, path: &str, mode: u32) -> (i32, u64) {
        (enosys(), NO_HANDLE)
    }

    /// Open a file with native `open(2)` flags. Returns the new handle.
    fn open(&self, path: &str, flags: i32) -> (i32, u64) {
        (enosys(), NO_HANDLE)
    }

    /// Read into `buf` at `offset`. Returns bytes read or `-errno`.
    fn read(&self, path: &str, buf: &mut [u8], offset: i64, fh: u64) -> isize {
        enosys() as isize
    }

    /// Write `buf` at `offset`. Returns bytes written or `-errno`.
    fn write(&self, path: &str, buf: &[u8], offset: i64, fh: u64) -> isize {
        enosys() as isize
    }

    /// Called on each close of a host-side file description.
    fn flush(&self, path: &str, fh: u64) -> i32 {
        enosys()
    }

    /// Close `fh`. The handle must not be used again.
    fn release(&self, path: &str, fh: u64) -> i32 {
        enosys()
    }

    /// Flush file data (and metadata unless `datasync`) to storage.
    fn fsync(&self, path: &str, datasync: bool, fh: u64) -> i32 {
        enosys()
    }

    // ========================================================================
    // Directories
    // ========================================================================

    /// Open a directory. Returns the new handle.
    fn opendir(&self, path: &str) -> (i32, u64) {
        (enosys(), NO_HANDLE)
    }

    /// Enumerate a directory, calling `fill` once per entry until it
    /// returns `false`.
    fn readdir(&self, path: &str, fill: &mut FillDir<'_>, offset: i64, fh: u64) -> i32 {
        enosys()
    }

    /// Close a directory handle. The handle must not be used again.
    fn releasedir(&self, path: &str, fh: u64) -> i32 {
        enosys()
    }

    /// Flush directory contents to storage.
    fn fsyncdir(&self, path: &str, datasync: bool, fh: u64) -> i32 {
        enosys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl FileSystemOps for Empty {}

    #[test]
    fn test_defaults_report_enosys() {
        let fs: &dyn FileSystemOps = &Empty;
        let enosys = FsError::NotSupported.code();

        assert_eq!(fs.mkdir("/d", 0o755), enosys);
        assert_eq!(fs.open("/f", 0), (enosys, NO_HANDLE));
        assert_eq!(fs.readlink("/l"), (enosys, String::new()));
        assert_eq!(fs.read("/f", &mut [0; 4], 0, 3), enosys as isize);

        let mut calls = 0;
        let mut fill = |_: &str, _: Option<&Stat>, _: i64| {
            calls += 1;
            true
        };
        assert_eq!(fs.readdir("/", &mut fill, 0, NO_HANDLE), enosys);
        assert_eq!(calls, 0);
    }
}

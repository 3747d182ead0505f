//! Per-call tracing for any [`FileSystemOps`] implementation.
//!
//! Wrap an adapter in [`Traced`] to get one `tracing` event per host call:
//! `trace` for successes, `debug` for failures. Failures are ordinary
//! filesystem outcomes (a lookup of a missing name is a failure), so nothing
//! is logged louder than that.

use ptfs_types::{Stat, Statfs, Timespec};

use crate::error::FsError;
use crate::ops::{FileSystemOps, FillDir};

/// Logging decorator over a filesystem.
#[derive(Debug, Clone)]
pub struct Traced<F> {
    inner: F,
}

impl<F: FileSystemOps> Traced<F> {
    pub fn new(inner: F) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

/// Error text for a negative result, for the failure event.
fn describe(result: i64) -> FsError {
    result
        .checked_neg()
        .and_then(|raw| i32::try_from(raw).ok())
        .map_or(FsError::Io, FsError::from_raw_os_error)
}

/// Emit the one event for a call: `debug` on failure, `trace` otherwise.
/// Extra `field = value` pairs carry the call's arguments.
macro_rules! record {
    ($op:literal, $path:expr, $fh:expr, $result:expr $(, $($field:tt)+)?) => {{
        let fh: Option<u64> = $fh;
        let result = i64::from($result);
        if result < 0 {
            let error = describe(result);
            tracing::debug!(op = $op, path = $path, ?fh, result, %error $(, $($field)+)?, "fs call failed");
        } else {
            tracing::trace!(op = $op, path = $path, ?fh, result $(, $($field)+)?, "fs call");
        }
    }};
}

impl<F: FileSystemOps> FileSystemOps for Traced<F> {
    fn init(&self) {
        tracing::trace!(op = "init", "fs call");
        self.inner.init();
    }

    fn destroy(&self) {
        tracing::trace!(op = "destroy", "fs call");
        self.inner.destroy();
    }

    fn statfs(&self, path: &str, stat: &mut Statfs) -> i32 {
        let errc = self.inner.statfs(path, stat);
        record!("statfs", path, None, errc);
        errc
    }

    fn mknod(&self, path: &str, mode: u32, dev: u64) -> i32 {
        let errc = self.inner.mknod(path, mode, dev);
        record!("mknod", path, None, errc, mode, dev);
        errc
    }

    fn mkdir(&self, path: &str, mode: u32) -> i32 {
        let errc = self.inner.mkdir(path, mode);
        record!("mkdir", path, None, errc, mode);
        errc
    }

    fn unlink(&self, path: &str) -> i32 {
        let errc = self.inner.unlink(path);
        record!("unlink", path, None, errc);
        errc
    }

    fn rmdir(&self, path: &str) -> i32 {
        let errc = self.inner.rmdir(path);
        record!("rmdir", path, None, errc);
        errc
    }

    fn link(&self, oldpath: &str, newpath: &str) -> i32 {
        let errc = self.inner.link(oldpath, newpath);
        record!("link", oldpath, None, errc, newpath);
        errc
    }

    fn symlink(&self, target: &str, newpath: &str) -> i32 {
        let errc = self.inner.symlink(target, newpath);
        record!("symlink", newpath, None, errc, link_target = target);
        errc
    }

    fn readlink(&self, path: &str) -> (i32, String) {
        let (errc, target) = self.inner.readlink(path);
        record!("readlink", path, None, errc, link_target = %target);
        (errc, target)
    }

    fn rename(&self, oldpath: &str, newpath: &str) -> i32 {
        let errc = self.inner.rename(oldpath, newpath);
        record!("rename", oldpath, None, errc, newpath);
        errc
    }

    fn chmod(&self, path: &str, mode: u32) -> i32 {
        let errc = self.inner.chmod(path, mode);
        record!("chmod", path, None, errc, mode);
        errc
    }

    fn chown(&self, path: &str, uid: u32, gid: u32) -> i32 {
        let errc = self.inner.chown(path, uid, gid);
        record!("chown", path, None, errc, uid, gid);
        errc
    }

    fn utimens(&self, path: &str, tmsp: &[Timespec; 2]) -> i32 {
        let errc = self.inner.utimens(path, tmsp);
        record!("utimens", path, None, errc, atime = ?tmsp[0], mtime = ?tmsp[1]);
        errc
    }

    fn access(&self, path: &str, mask: u32) -> i32 {
        let errc = self.inner.access(path, mask);
        record!("access", path, None, errc, mask);
        errc
    }

    fn getattr(&self, path: &str, stat: &mut Stat, fh: u64) -> i32 {
        let errc = self.inner.getattr(path, stat, fh);
        record!("getattr", path, Some(fh), errc);
        errc
    }

    fn truncate(&self, path: &str, size: i64, fh: u64) -> i32 {
        let errc = self.inner.truncate(path, size, fh);
        record!("truncate", path, Some(fh), errc, size);
        errc
    }

    fn create(&self, path: &str, mode: u32) -> (i32, u64) {
        let (errc, fh) = self.inner.create(path, mode);
        record!("create", path, Some(fh), errc, mode);
        (errc, fh)
    }

    fn open(&self, path: &str, flags: i32) -> (i32, u64) {
        let (errc, fh) = self.inner.open(path, flags);
        record!("open", path, Some(fh), errc, flags);
        (errc, fh)
    }

    fn read(&self, path: &str, buf: &mut [u8], offset: i64, fh: u64) -> isize {
        let len = buf.len();
        let n = self.inner.read(path, buf, offset, fh);
        record!("read", path, Some(fh), n as i64, len, offset);
        n
    }

    fn write(&self, path: &str, buf: &[u8], offset: i64, fh: u64) -> isize {
        let n = self.inner.write(path, buf, offset, fh);
        record!("write", path, Some(fh), n as i64, len = buf.len(), offset);
        n
    }

    fn flush(&self, path: &str, fh: u64) -> i32 {
        let errc = self.inner.flush(path, fh);
        record!("flush", path, Some(fh), errc);
        errc
    }

    fn release(&self, path: &str, fh: u64) -> i32 {
        let errc = self.inner.release(path, fh);
        record!("release", path, Some(fh), errc);
        errc
    }

    fn fsync(&self, path: &str, datasync: bool, fh: u64) -> i32 {
        let errc = self.inner.fsync(path, datasync, fh);
        record!("fsync", path, Some(fh), errc, datasync);
        errc
    }

    fn opendir(&self, path: &str) -> (i32, u64) {
        let (errc, fh) = self.inner.opendir(path);
        record!("opendir", path, Some(fh), errc);
        (errc, fh)
    }

    fn readdir(&self, path: &str, fill: &mut FillDir<'_>, offset: i64, fh: u64) -> i32 {
        let mut entries = 0usize;
        let mut counted = |name: &str, stat: Option<&Stat>, next: i64| {
            entries += 1;
            fill(name, stat, next)
        };
        let errc = self.inner.readdir(path, &mut counted, offset, fh);
        record!("readdir", path, Some(fh), errc, entries);
        errc
    }

    fn releasedir(&self, path: &str, fh: u64) -> i32 {
        let errc = self.inner.releasedir(path, fh);
        record!("releasedir", path, Some(fh), errc);
        errc
    }

    fn fsyncdir(&self, path: &str, datasync: bool, fh: u64) -> i32 {
        let errc = self.inner.fsyncdir(path, datasync, fh);
        record!("fsyncdir", path, Some(fh), errc, datasync);
        errc
    }
}

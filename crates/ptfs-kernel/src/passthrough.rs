//! Passthrough adapter.
//!
//! Maps every operation onto the native syscall against the same path under
//! a fixed root directory. No caching, no permission checks of its own, no
//! escape prevention: what the OS does is what the host sees.

use rustix::fs::{self, AtFlags, CWD, Access, FileType, Gid, Mode, OFlags, Timestamps, Uid};
use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use ptfs_types::{Stat, Statfs, Timespec};

use crate::convert::{stat_from_native, statfs_from_native, timespec_to_native};
use crate::dir::DirStream;
use crate::error::{FsError, FsResult, errc};
use crate::handle::{FileHandle, Target};
use crate::ops::{FileSystemOps, FillDir};
use crate::path;

const S_IFMT: u32 = 0o170000;

/// Passthrough filesystem rooted at a native directory.
///
/// All paths are relative to `root`. For example, if `root` is
/// `/home/amy/project`, then `getattr("/src/main.rs")` stats
/// `/home/amy/project/src/main.rs`.
///
/// The root never changes after construction, so one adapter can serve any
/// number of host threads without locking.
#[derive(Debug, Clone)]
pub struct Passthrough {
    root: PathBuf,
}

impl Passthrough {
    /// Create an adapter over `root`.
    ///
    /// `root` is used as given; see [`PassthroughConfig`](crate::PassthroughConfig)
    /// for making it absolute and checking it first.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        tracing::debug!(root = %root.display(), "passthrough adapter created");
        Self { root }
    }

    /// Get the root path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Native path for a virtual path.
    pub fn resolve(&self, path: &str) -> PathBuf {
        path::resolve(&self.root, path)
    }

    pub fn statfs(&self, path: &str) -> FsResult<Statfs> {
        let st = fs::statvfs(self.resolve(path))?;
        Ok(statfs_from_native(&st))
    }

    /// `mode` carries both the node type and the permission bits.
    pub fn mknod(&self, path: &str, mode: u32, dev: u64) -> FsResult<()> {
        let file_type = match mode & S_IFMT {
            0 => FileType::RegularFile,
            _ => match FileType::from_raw_mode(mode as _) {
                FileType::Unknown => return Err(FsError::InvalidArgument),
                file_type => file_type,
            },
        };
        fs::mknodat(
            CWD,
            self.resolve(path),
            file_type,
            Mode::from_raw_mode(mode as _),
            dev as fs::Dev,
        )?;
        Ok(())
    }

    pub fn mkdir(&self, path: &str, mode: u32) -> FsResult<()> {
        fs::mkdir(self.resolve(path), Mode::from_raw_mode(mode as _))?;
        Ok(())
    }

    pub fn unlink(&self, path: &str) -> FsResult<()> {
        fs::unlink(self.resolve(path))?;
        Ok(())
    }

    pub fn rmdir(&self, path: &str) -> FsResult<()> {
        fs::rmdir(self.resolve(path))?;
        Ok(())
    }

    pub fn link(&self, oldpath: &str, newpath: &str) -> FsResult<()> {
        fs::link(self.resolve(oldpath), self.resolve(newpath))?;
        Ok(())
    }

    /// The target is resolved under the root like any other path, so the
    /// link stores an absolute native path.
    pub fn symlink(&self, target: &str, newpath: &str) -> FsResult<()> {
        fs::symlink(self.resolve(target), self.resolve(newpath))?;
        Ok(())
    }

    pub fn readlink(&self, path: &str) -> FsResult<String> {
        let target = fs::readlink(self.resolve(path), Vec::new())?;
        Ok(String::from_utf8_lossy(target.as_bytes()).into_owned())
    }

    pub fn rename(&self, oldpath: &str, newpath: &str) -> FsResult<()> {
        fs::rename(self.resolve(oldpath), self.resolve(newpath))?;
        Ok(())
    }

    pub fn chmod(&self, path: &str, mode: u32) -> FsResult<()> {
        fs::chmod(self.resolve(path), Mode::from_raw_mode(mode as _))?;
        Ok(())
    }

    /// `u32::MAX` for either id leaves it unchanged.
    pub fn chown(&self, path: &str, uid: u32, gid: u32) -> FsResult<()> {
        // SAFETY: ids are plain integers to chown(2); the kernel checks them.
        // Only `u32::MAX` (-1) has a special meaning, and it never gets here.
        let owner = (uid != u32::MAX).then(|| unsafe { Uid::from_raw(uid) });
        let group = (gid != u32::MAX).then(|| unsafe { Gid::from_raw(gid) });
        fs::chown(self.resolve(path), owner, group)?;
        Ok(())
    }

    /// Set both times in one `utimensat` call, following symlinks.
    pub fn utimens(&self, path: &str, tmsp: &[Timespec; 2]) -> FsResult<()> {
        let times = Timestamps {
            last_access: timespec_to_native(tmsp[0]),
            last_modification: timespec_to_native(tmsp[1]),
        };
        fs::utimensat(CWD, self.resolve(path), &times, AtFlags::empty())?;
        Ok(())
    }

    pub fn access(&self, path: &str, mask: u32) -> FsResult<()> {
        fs::access(self.resolve(path), Access::from_bits_retain(mask as _))?;
        Ok(())
    }

    /// Open for writing, creating or truncating, at `mode`.
    pub fn create(&self, path: &str, mode: u32) -> FsResult<FileHandle> {
        let fd = fs::open(
            self.resolve(path),
            OFlags::WRONLY | OFlags::CREATE | OFlags::TRUNC | OFlags::CLOEXEC,
            Mode::from_raw_mode(mode as _),
        )?;
        Ok(FileHandle::from_owned(fd))
    }

    /// Open with the caller's native `open(2)` flags.
    pub fn open(&self, path: &str, flags: i32) -> FsResult<FileHandle> {
        let flags = OFlags::from_bits_retain(flags as _) | OFlags::CLOEXEC;
        let fd = fs::open(self.resolve(path), flags, Mode::empty())?;
        Ok(FileHandle::from_owned(fd))
    }

    /// `stat` follows symlinks, as the host expects of a passthrough.
    pub fn getattr(&self, target: Target<'_>) -> FsResult<Stat> {
        let st = match target {
            Target::ByPath(path) => fs::stat(self.resolve(path))?,
            Target::ByHandle(handle) => fs::fstat(handle.as_fd())?,
        };
        Ok(stat_from_native(&st))
    }

    pub fn truncate(&self, target: Target<'_>, size: u64) -> FsResult<()> {
        match target {
            Target::ByPath(path) => truncate_path(&self.resolve(path), size)?,
            Target::ByHandle(handle) => fs::ftruncate(handle.as_fd(), size)?,
        }
        Ok(())
    }

    /// Positioned read; the descriptor's own offset is untouched.
    pub fn read(&self, handle: &FileHandle, buf: &mut [u8], offset: u64) -> FsResult<usize> {
        Ok(rustix::io::pread(handle.as_fd(), buf, offset)?)
    }

    /// Positioned write; the descriptor's own offset is untouched.
    pub fn write(&self, handle: &FileHandle, buf: &[u8], offset: u64) -> FsResult<usize> {
        Ok(rustix::io::pwrite(handle.as_fd(), buf, offset)?)
    }

    /// Close the descriptor behind `handle`.
    ///
    /// A handle value that no longer names an open descriptor reports
    /// `BadHandle`. One that was released and then reused by a later open
    /// closes that other file; the host must not release twice.
    pub fn release(&self, handle: FileHandle) -> FsResult<()> {
        rustix::io::fcntl_getfd(handle.as_fd())?;
        // SAFETY: the descriptor is open (checked above) and the handle is
        // consumed, so nothing in this process refers to it through us again.
        unsafe { rustix::io::close(handle.into_raw()) };
        Ok(())
    }

    pub fn fsync(&self, handle: &FileHandle, datasync: bool) -> FsResult<()> {
        if datasync {
            fs::fdatasync(handle.as_fd())?;
        } else {
            fs::fsync(handle.as_fd())?;
        }
        Ok(())
    }

    pub fn opendir(&self, path: &str) -> FsResult<FileHandle> {
        let fd = fs::open(
            self.resolve(path),
            OFlags::RDONLY | OFlags::DIRECTORY | OFlags::CLOEXEC,
            Mode::empty(),
        )?;
        Ok(FileHandle::from_owned(fd))
    }

    /// Call `visit` with each entry name until it returns `false`.
    ///
    /// Reads a fresh stream from the path each time; the stream is closed
    /// before returning on every path out of here.
    pub fn readdir(&self, path: &str, mut visit: impl FnMut(&str) -> bool) -> FsResult<()> {
        for name in DirStream::open(&self.resolve(path))? {
            if !visit(&name?) {
                break;
            }
        }
        Ok(())
    }

    pub fn releasedir(&self, handle: FileHandle) -> FsResult<()> {
        self.release(handle)
    }
}

/// `truncate(2)` by path.
///
/// rustix only has `ftruncate`. Opening the file first would report open's
/// errors instead of truncate's (`ENXIO` rather than `EINVAL` on a FIFO).
fn truncate_path(path: &Path, size: u64) -> FsResult<()> {
    let path = CString::new(path.as_os_str().as_bytes()).map_err(|_| FsError::InvalidArgument)?;
    let size = libc::off_t::try_from(size).map_err(|_| FsError::InvalidArgument)?;
    // SAFETY: `path` is NUL-terminated and outlives the call.
    if unsafe { libc::truncate(path.as_ptr(), size) } != 0 {
        return Err(io::Error::last_os_error().into());
    }
    Ok(())
}

// ============================================================================
// ABI glue
// ============================================================================

/// Handle-only operations get `BadHandle` for the sentinel, as the native
/// call on descriptor `-1` would, and for values no descriptor can have.
fn abi_handle(fh: u64) -> FsResult<FileHandle> {
    FileHandle::from_abi(fh)?.ok_or(FsError::BadHandle)
}

/// Negative offsets and sizes are rejected the way the native calls do.
fn abi_len(value: i64) -> FsResult<u64> {
    u64::try_from(value).map_err(|_| FsError::InvalidArgument)
}

fn abi_opened(result: FsResult<FileHandle>) -> (i32, u64) {
    match result {
        Ok(handle) => (0, handle.to_abi()),
        Err(e) => (e.code(), ptfs_types::NO_HANDLE),
    }
}

fn abi_count(result: FsResult<usize>) -> isize {
    match result {
        Ok(n) => n as isize,
        Err(e) => e.code() as isize,
    }
}

impl FileSystemOps for Passthrough {
    fn init(&self) {
        tracing::debug!(root = %self.root.display(), "passthrough mounted");
    }

    fn destroy(&self) {
        tracing::debug!(root = %self.root.display(), "passthrough unmounted");
    }

    fn statfs(&self, path: &str, stat: &mut Statfs) -> i32 {
        errc(Passthrough::statfs(self, path).map(|st| *stat = st))
    }

    fn mknod(&self, path: &str, mode: u32, dev: u64) -> i32 {
        errc(Passthrough::mknod(self, path, mode, dev))
    }

    fn mkdir(&self, path: &str, mode: u32) -> i32 {
        errc(Passthrough::mkdir(self, path, mode))
    }

    fn unlink(&self, path: &str) -> i32 {
        errc(Passthrough::unlink(self, path))
    }

    fn rmdir(&self, path: &str) -> i32 {
        errc(Passthrough::rmdir(self, path))
    }

    fn link(&self, oldpath: &str, newpath: &str) -> i32 {
        errc(Passthrough::link(self, oldpath, newpath))
    }

    fn symlink(&self, target: &str, newpath: &str) -> i32 {
        errc(Passthrough::symlink(self, target, newpath))
    }

    fn readlink(&self, path: &str) -> (i32, String) {
        match Passthrough::readlink(self, path) {
            Ok(target) => (0, target),
            Err(e) => (e.code(), String::new()),
        }
    }

    fn rename(&self, oldpath: &str, newpath: &str) -> i32 {
        errc(Passthrough::rename(self, oldpath, newpath))
    }

    fn chmod(&self, path: &str, mode: u32) -> i32 {
        errc(Passthrough::chmod(self, path, mode))
    }

    fn chown(&self, path: &str, uid: u32, gid: u32) -> i32 {
        errc(Passthrough::chown(self, path, uid, gid))
    }

    fn utimens(&self, path: &str, tmsp: &[Timespec; 2]) -> i32 {
        errc(Passthrough::utimens(self, path, tmsp))
    }

    fn access(&self, path: &str, mask: u32) -> i32 {
        errc(Passthrough::access(self, path, mask))
    }

    fn getattr(&self, path: &str, stat: &mut Stat, fh: u64) -> i32 {
        errc(FileHandle::from_abi(fh).and_then(|handle| {
            let target = Target::new(path, handle.as_ref());
            *stat = Passthrough::getattr(self, target)?;
            Ok(())
        }))
    }

    fn truncate(&self, path: &str, size: i64, fh: u64) -> i32 {
        errc(FileHandle::from_abi(fh).and_then(|handle| {
            let target = Target::new(path, handle.as_ref());
            Passthrough::truncate(self, target, abi_len(size)?)
        }))
    }

    fn create(&self, path: &str, mode: u32) -> (i32, u64) {
        abi_opened(Passthrough::create(self, path, mode))
    }

    fn open(&self, path: &str, flags: i32) -> (i32, u64) {
        abi_opened(Passthrough::open(self, path, flags))
    }

    fn read(&self, _path: &str, buf: &mut [u8], offset: i64, fh: u64) -> isize {
        abi_count(abi_handle(fh).and_then(|handle| {
            Passthrough::read(self, &handle, buf, abi_len(offset)?)
        }))
    }

    fn write(&self, _path: &str, buf: &[u8], offset: i64, fh: u64) -> isize {
        abi_count(abi_handle(fh).and_then(|handle| {
            Passthrough::write(self, &handle, buf, abi_len(offset)?)
        }))
    }

    fn release(&self, _path: &str, fh: u64) -> i32 {
        errc(abi_handle(fh).and_then(|handle| Passthrough::release(self, handle)))
    }

    fn fsync(&self, _path: &str, datasync: bool, fh: u64) -> i32 {
        errc(abi_handle(fh).and_then(|handle| Passthrough::fsync(self, &handle, datasync)))
    }

    fn opendir(&self, path: &str) -> (i32, u64) {
        abi_opened(Passthrough::opendir(self, path))
    }

    /// Names only: attributes are left to a later `getattr`, offsets to the host.
    fn readdir(&self, path: &str, fill: &mut FillDir<'_>, _offset: i64, _fh: u64) -> i32 {
        errc(Passthrough::readdir(self, path, |name| fill(name, None, 0)))
    }

    fn releasedir(&self, _path: &str, fh: u64) -> i32 {
        errc(abi_handle(fh).and_then(|handle| Passthrough::releasedir(self, handle)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::{MetadataExt, PermissionsExt};
    use tempfile::TempDir;

    fn setup() -> (Passthrough, TempDir) {
        let dir = TempDir::new().unwrap();
        let fs = Passthrough::new(dir.path());
        (fs, dir)
    }

    fn write_file(fs: &Passthrough, path: &str, data: &[u8]) {
        let handle = fs.create(path, 0o644).unwrap();
        assert_eq!(fs.write(&handle, data, 0).unwrap(), data.len());
        fs.release(handle).unwrap();
    }

    fn read_file(fs: &Passthrough, path: &str) -> Vec<u8> {
        let handle = fs.open(path, OFlags::RDONLY.bits() as i32).unwrap();
        let mut buf = vec![0; 4096];
        let n = fs.read(&handle, &mut buf, 0).unwrap();
        fs.release(handle).unwrap();
        buf.truncate(n);
        buf
    }

    #[test]
    fn test_create_and_read() {
        let (fs, _dir) = setup();

        write_file(&fs, "/test.txt", b"hello world");
        assert_eq!(read_file(&fs, "/test.txt"), b"hello world");
    }

    #[test]
    fn test_partial_read_at_offset() {
        let (fs, _dir) = setup();
        write_file(&fs, "/test.txt", b"hello world");

        let handle = fs.open("/test.txt", OFlags::RDONLY.bits() as i32).unwrap();
        let mut buf = [0; 5];
        assert_eq!(fs.read(&handle, &mut buf, 6).unwrap(), 5);
        assert_eq!(&buf, b"world");

        // Past EOF is a short read, not an error.
        assert_eq!(fs.read(&handle, &mut buf, 100).unwrap(), 0);
        fs.release(handle).unwrap();
    }

    #[test]
    fn test_create_truncates_existing() {
        let (fs, dir) = setup();
        std::fs::write(dir.path().join("f"), b"old contents").unwrap();

        write_file(&fs, "/f", b"new");
        assert_eq!(std::fs::read(dir.path().join("f")).unwrap(), b"new");
    }

    #[test]
    fn test_create_applies_mode() {
        let (fs, dir) = setup();
        let handle = fs.create("/f", 0o600).unwrap();
        fs.release(handle).unwrap();

        let meta = std::fs::metadata(dir.path().join("f")).unwrap();
        // umask can only clear bits.
        assert_eq!(meta.permissions().mode() & 0o077, 0);
    }

    #[test]
    fn test_getattr_by_path_and_handle_agree() {
        let (fs, _dir) = setup();
        write_file(&fs, "/f", b"12345");

        let by_path = fs.getattr(Target::ByPath("/f")).unwrap();
        let handle = fs.open("/f", OFlags::RDONLY.bits() as i32).unwrap();
        let by_handle = fs.getattr(Target::ByHandle(&handle)).unwrap();
        fs.release(handle).unwrap();

        assert_eq!(by_path.ino, by_handle.ino);
        assert_eq!(by_path.size, 5);
        assert_eq!(by_handle.size, 5);
    }

    #[test]
    fn test_getattr_follows_symlinks() {
        let (fs, dir) = setup();
        std::fs::write(dir.path().join("target"), b"abc").unwrap();
        std::os::unix::fs::symlink(dir.path().join("target"), dir.path().join("link")).unwrap();

        let stat = fs.getattr(Target::ByPath("/link")).unwrap();
        assert_eq!(stat.size, 3);
        assert_eq!(stat.mode & S_IFMT, 0o100000);
    }

    #[test]
    fn test_mkdir_and_readdir() {
        let (fs, _dir) = setup();

        fs.mkdir("/subdir", 0o755).unwrap();
        write_file(&fs, "/subdir/file.txt", b"");
        write_file(&fs, "/root.txt", b"");

        let mut names = Vec::new();
        fs.readdir("/", |name| {
            names.push(name.to_string());
            true
        })
        .unwrap();
        names.sort();
        assert_eq!(names, ["root.txt", "subdir"]);
    }

    #[test]
    fn test_readdir_missing_directory() {
        let (fs, _dir) = setup();
        let err = fs.readdir("/nope", |_| true).unwrap_err();
        assert_eq!(err, FsError::NotFound);
    }

    #[test]
    fn test_unlink_and_rmdir() {
        let (fs, dir) = setup();
        fs.mkdir("/d", 0o755).unwrap();
        write_file(&fs, "/d/f", b"x");

        assert_eq!(fs.rmdir("/d"), Err(FsError::DirectoryNotEmpty));
        fs.unlink("/d/f").unwrap();
        fs.rmdir("/d").unwrap();
        assert!(!dir.path().join("d").exists());
    }

    #[test]
    fn test_unlink_missing_has_no_side_effect() {
        let (fs, dir) = setup();
        write_file(&fs, "/keep", b"x");

        assert_eq!(fs.unlink("/missing"), Err(FsError::NotFound));
        assert!(dir.path().join("keep").exists());
    }

    #[test]
    fn test_rename() {
        let (fs, _dir) = setup();
        write_file(&fs, "/old.txt", b"content");

        fs.rename("/old.txt", "/new.txt").unwrap();

        assert_eq!(fs.getattr(Target::ByPath("/old.txt")).unwrap_err(), FsError::NotFound);
        assert_eq!(read_file(&fs, "/new.txt"), b"content");
    }

    #[test]
    fn test_hard_link() {
        let (fs, _dir) = setup();
        write_file(&fs, "/original.txt", b"shared content");

        fs.link("/original.txt", "/linked.txt").unwrap();

        assert_eq!(read_file(&fs, "/linked.txt"), b"shared content");
        let stat = fs.getattr(Target::ByPath("/original.txt")).unwrap();
        assert_eq!(stat.nlink, 2);
    }

    #[test]
    fn test_symlink_target_resolved_under_root() {
        let (fs, dir) = setup();
        write_file(&fs, "/target.txt", b"content");

        fs.symlink("/target.txt", "/link.txt").unwrap();

        let target = fs.readlink("/link.txt").unwrap();
        assert_eq!(Path::new(&target), dir.path().join("target.txt"));
        assert_eq!(read_file(&fs, "/link.txt"), b"content");
    }

    #[test]
    fn test_readlink_on_regular_file() {
        let (fs, _dir) = setup();
        write_file(&fs, "/f", b"");
        assert_eq!(fs.readlink("/f"), Err(FsError::InvalidArgument));
    }

    #[test]
    fn test_mknod_fifo() {
        let (fs, dir) = setup();
        fs.mknod("/pipe", 0o010644, 0).unwrap();

        let meta = std::fs::symlink_metadata(dir.path().join("pipe")).unwrap();
        assert!(std::os::unix::fs::FileTypeExt::is_fifo(&meta.file_type()));
    }

    #[test]
    fn test_mknod_without_type_bits_is_regular() {
        let (fs, dir) = setup();
        fs.mknod("/plain", 0o644, 0).unwrap();
        assert!(std::fs::metadata(dir.path().join("plain")).unwrap().is_file());
    }

    #[test]
    fn test_chmod() {
        let (fs, dir) = setup();
        write_file(&fs, "/f", b"");

        fs.chmod("/f", 0o640).unwrap();
        let meta = std::fs::metadata(dir.path().join("f")).unwrap();
        assert_eq!(meta.permissions().mode() & 0o7777, 0o640);
    }

    #[test]
    fn test_chown_to_current_owner() {
        let (fs, dir) = setup();
        write_file(&fs, "/f", b"");
        let meta = std::fs::metadata(dir.path().join("f")).unwrap();

        fs.chown("/f", meta.uid(), meta.gid()).unwrap();
        fs.chown("/f", u32::MAX, u32::MAX).unwrap();
        fs.chown("/f", u32::MAX, meta.gid()).unwrap();
        let after = std::fs::metadata(dir.path().join("f")).unwrap();
        assert_eq!((after.uid(), after.gid()), (meta.uid(), meta.gid()));

        assert_eq!(fs.chown("/missing", meta.uid(), meta.gid()), Err(FsError::NotFound));
    }

    #[test]
    fn test_utimens_sets_both_times() {
        let (fs, dir) = setup();
        write_file(&fs, "/f", b"");

        fs.utimens("/f", &[Timespec::new(1000, 0), Timespec::new(2000, 500)])
            .unwrap();

        let meta = std::fs::metadata(dir.path().join("f")).unwrap();
        assert_eq!((meta.atime(), meta.atime_nsec()), (1000, 0));
        assert_eq!((meta.mtime(), meta.mtime_nsec()), (2000, 500));
    }

    #[test]
    fn test_access() {
        let (fs, _dir) = setup();
        write_file(&fs, "/f", b"");

        fs.access("/f", 0).unwrap();
        assert_eq!(fs.access("/missing", 0), Err(FsError::NotFound));
    }

    #[test]
    fn test_truncate_by_path_and_handle() {
        let (fs, _dir) = setup();
        write_file(&fs, "/f", b"hello world");

        fs.truncate(Target::ByPath("/f"), 5).unwrap();
        assert_eq!(read_file(&fs, "/f"), b"hello");

        let handle = fs.open("/f", OFlags::RDWR.bits() as i32).unwrap();
        fs.truncate(Target::ByHandle(&handle), 2).unwrap();
        fs.release(handle).unwrap();
        assert_eq!(read_file(&fs, "/f"), b"he");
    }

    #[test]
    fn test_truncate_fifo_by_path() {
        let (fs, _dir) = setup();
        fs.mknod("/p", 0o010644, 0).unwrap();
        assert_eq!(fs.truncate(Target::ByPath("/p"), 0), Err(FsError::InvalidArgument));
    }

    #[test]
    fn test_truncate_missing_by_path() {
        let (fs, _dir) = setup();
        assert_eq!(fs.truncate(Target::ByPath("/missing"), 0), Err(FsError::NotFound));
    }

    #[test]
    fn test_truncate_directory() {
        let (fs, _dir) = setup();
        fs.mkdir("/d", 0o755).unwrap();
        assert_eq!(fs.truncate(Target::ByPath("/d"), 0), Err(FsError::IsADirectory));
    }

    #[test]
    fn test_write_on_read_only_handle() {
        let (fs, _dir) = setup();
        write_file(&fs, "/f", b"x");

        let handle = fs.open("/f", OFlags::RDONLY.bits() as i32).unwrap();
        assert_eq!(fs.write(&handle, b"y", 0), Err(FsError::BadHandle));
        fs.release(handle).unwrap();
    }

    #[test]
    fn test_fsync() {
        let (fs, _dir) = setup();
        let handle = fs.create("/f", 0o644).unwrap();
        fs.write(&handle, b"data", 0).unwrap();

        fs.fsync(&handle, false).unwrap();
        fs.fsync(&handle, true).unwrap();
        fs.release(handle).unwrap();
    }

    #[test]
    fn test_opendir_on_file() {
        let (fs, _dir) = setup();
        write_file(&fs, "/f", b"");
        assert_eq!(fs.opendir("/f").unwrap_err(), FsError::NotADirectory);

        fs.mkdir("/d", 0o755).unwrap();
        let handle = fs.opendir("/d").unwrap();
        fs.releasedir(handle).unwrap();
    }

    #[test]
    fn test_statfs() {
        let (fs, _dir) = setup();
        let statfs = fs.statfs("/").unwrap();
        assert!(statfs.bsize > 0);
        assert!(statfs.namemax > 0);
    }
}

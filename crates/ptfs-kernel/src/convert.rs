//! Native status structures → host layouts.
//!
//! Field-for-field copies. The casts only widen or re-sign; native field
//! types differ between architectures and libc backends.

use ptfs_types::{Stat, Statfs, Timespec};
use rustix::fs::{Stat as NativeStat, StatVfs};

pub(crate) fn stat_from_native(st: &NativeStat) -> Stat {
    Stat {
        dev: st.st_dev as u64,
        ino: st.st_ino as u64,
        mode: st.st_mode as u32,
        nlink: st.st_nlink as u32,
        uid: st.st_uid as u32,
        gid: st.st_gid as u32,
        rdev: st.st_rdev as u64,
        size: st.st_size as i64,
        atim: Timespec::new(st.st_atime as i64, st.st_atime_nsec as i64),
        mtim: Timespec::new(st.st_mtime as i64, st.st_mtime_nsec as i64),
        ctim: Timespec::new(st.st_ctime as i64, st.st_ctime_nsec as i64),
        blksize: st.st_blksize as i64,
        blocks: st.st_blocks as i64,
    }
}

pub(crate) fn statfs_from_native(st: &StatVfs) -> Statfs {
    Statfs {
        bsize: st.f_bsize,
        frsize: st.f_frsize,
        blocks: st.f_blocks,
        bfree: st.f_bfree,
        bavail: st.f_bavail,
        files: st.f_files,
        ffree: st.f_ffree,
        favail: st.f_favail,
        fsid: st.f_fsid,
        flag: st.f_flag.bits(),
        namemax: st.f_namemax,
    }
}

/// Host timespec → native timespec. `nsec` markers pass through.
pub(crate) fn timespec_to_native(ts: Timespec) -> rustix::fs::Timespec {
    rustix::fs::Timespec {
        tv_sec: ts.sec as _,
        tv_nsec: ts.nsec as _,
    }
}

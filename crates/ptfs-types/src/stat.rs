//! File and filesystem status layouts.
//!
//! Field names follow the host's layout, not any one platform's `struct stat`.
//! Values are copied verbatim from the native call; nothing here interprets
//! them.

use serde::{Deserialize, Serialize};

use crate::Timespec;

/// File status, as filled by `getattr`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    /// Device containing the file.
    pub dev: u64,
    /// Inode number.
    pub ino: u64,
    /// File type and permission bits.
    pub mode: u32,
    /// Number of hard links.
    pub nlink: u32,
    /// Owner user ID.
    pub uid: u32,
    /// Owner group ID.
    pub gid: u32,
    /// Device ID, for character and block special files.
    pub rdev: u64,
    /// Size in bytes.
    pub size: i64,
    /// Last access time.
    pub atim: Timespec,
    /// Last modification time.
    pub mtim: Timespec,
    /// Last status change time.
    pub ctim: Timespec,
    /// Preferred I/O block size.
    pub blksize: i64,
    /// Number of 512-byte blocks allocated.
    pub blocks: i64,
}

/// Filesystem status, as filled by `statfs`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statfs {
    /// Block size.
    pub bsize: u64,
    /// Fragment size.
    pub frsize: u64,
    /// Total blocks, in `frsize` units.
    pub blocks: u64,
    /// Free blocks.
    pub bfree: u64,
    /// Free blocks available to unprivileged users.
    pub bavail: u64,
    /// Total inodes.
    pub files: u64,
    /// Free inodes.
    pub ffree: u64,
    /// Free inodes available to unprivileged users.
    pub favail: u64,
    /// Filesystem ID.
    pub fsid: u64,
    /// Mount flags.
    pub flag: u64,
    /// Maximum filename length.
    pub namemax: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_json_shape() {
        let stat = Stat {
            ino: 42,
            mode: 0o100644,
            size: 11,
            mtim: Timespec::new(2000, 500),
            ..Default::default()
        };

        let json = serde_json::to_value(stat).unwrap();
        assert_eq!(json["ino"], 42);
        assert_eq!(json["mode"], 0o100644);
        assert_eq!(json["mtim"]["sec"], 2000);
        assert_eq!(json["mtim"]["nsec"], 500);
    }
}

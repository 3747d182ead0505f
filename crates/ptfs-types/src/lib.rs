//! Cross-platform structures exchanged with the filesystem host.
//!
//! The host speaks one layout on every platform; the native side speaks
//! whatever `stat(2)` and `statvfs(3)` return there. This crate holds the
//! host's side of that boundary. It has **no internal ptfs dependencies**,
//! so a host implementation can depend on it without pulling in the adapter.
//!
//! # Key Types
//!
//! |---------------|-------------------------------------------------|
//! | Type          | Purpose                                         |
//! |---------------|-------------------------------------------------|
//! | [`Stat`]      | File status (what `getattr` fills)              |
//! | [`Statfs`]    | Filesystem status (what `statfs` fills)         |
//! | [`Timespec`]  | Seconds + nanoseconds, used by `Stat`/`utimens` |
//! | [`NO_HANDLE`] | Sentinel handle: "no open file, use the path"   |
//! |---------------|-------------------------------------------------|

mod stat;
mod timespec;

pub use stat::{Stat, Statfs};
pub use timespec::Timespec;

/// Handle value meaning "no handle supplied".
///
/// Operations that accept either a path or a handle fall back to the path
/// when they receive this value. Open-class operations return it alongside
/// a negative error code when they fail.
pub const NO_HANDLE: u64 = u64::MAX;

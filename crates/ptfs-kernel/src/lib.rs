//! Passthrough filesystem adapter.
//!
//! Exposes a native directory tree through the filesystem operation
//! interface a userspace-filesystem host calls into. Key components:
//!
//! - [`FileSystemOps`] - The operation interface, in the host's integer ABI
//! - [`Passthrough`] - Maps each operation onto native syscalls under a root
//! - [`FsError`] - Native errno values as an enum, with a lossless projection
//!   back to `-errno`
//! - [`Traced`] - Logs every call that goes through it
//!
//! ## Design Decisions
//!
//! - **Stateless**: the adapter holds only its root. Handles are native
//!   descriptors, so the host's handle table is the only table.
//! - **Synchronous**: each operation is a bounded number of blocking
//!   syscalls on the calling host thread. No buffering between calls.
//! - **Two layers**: [`Passthrough`]'s inherent methods speak `FsResult`
//!   and move-only [`FileHandle`]s; its [`FileSystemOps`] impl turns those
//!   into the host's `i32` codes and `u64` handles.
//! - **No sandboxing**: virtual paths are joined lexically, so `..` can
//!   leave the root. The host is expected to hand over clean paths.

mod config;
mod convert;
mod dir;
mod error;
mod handle;
mod ops;
mod passthrough;
pub mod path;
mod trace;

pub use config::PassthroughConfig;
pub use dir::DirStream;
pub use error::{FsError, FsResult, errc};
pub use handle::{FileHandle, Target};
pub use ops::{FileSystemOps, FillDir};
pub use passthrough::Passthrough;
pub use trace::Traced;

pub use ptfs_types::{NO_HANDLE, Stat, Statfs, Timespec};

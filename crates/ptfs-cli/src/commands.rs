//! One subcommand per host call (or short sequence of calls).
//!
//! Everything goes through `&dyn FileSystemOps`, so the adapter sees exactly
//! the integer ABI a mounted host would drive.

use std::io::{Read, Write};
use std::time::SystemTime;

use anyhow::{Result, anyhow};
use clap::Subcommand;
use ptfs_kernel::{FileSystemOps, FsError, NO_HANDLE, Stat, Statfs, Timespec};

/// `O_RDONLY` is zero on every platform the adapter runs on.
const O_RDONLY: i32 = 0;

const CHUNK: usize = 64 * 1024;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show file attributes (getattr)
    Stat {
        path: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show filesystem statistics
    Statfs {
        #[arg(default_value = "/")]
        path: String,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List directory entries
    Ls {
        #[arg(default_value = "/")]
        path: String,
    },

    /// Print file contents
    Cat { path: String },

    /// Print a symlink's target
    Readlink { path: String },

    /// Create or truncate a file and fill it from stdin
    Write {
        path: String,
        /// Permission bits, octal
        #[arg(long, default_value = "644", value_parser = parse_mode)]
        mode: u32,
    },

    /// Create a directory
    Mkdir {
        path: String,
        /// Permission bits, octal
        #[arg(long, default_value = "755", value_parser = parse_mode)]
        mode: u32,
    },

    /// Remove a file
    Rm { path: String },

    /// Remove an empty directory
    Rmdir { path: String },

    /// Rename a file or directory
    Mv { from: String, to: String },

    /// Create a hard link, or a symlink with -s
    Ln {
        target: String,
        link: String,
        #[arg(short, long)]
        symbolic: bool,
    },

    /// Change permission bits
    Chmod {
        #[arg(value_parser = parse_mode)]
        mode: u32,
        path: String,
    },

    /// Create a file if missing and set both times to now
    Touch { path: String },
}

fn parse_mode(s: &str) -> Result<u32, String> {
    let digits = s.strip_prefix("0o").unwrap_or(s);
    u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode {s:?}: {e}"))
}

/// Turn a negative ABI result into an error naming the call.
fn check(op: &str, path: &str, errc: i64) -> Result<u64> {
    if errc >= 0 {
        return Ok(errc as u64);
    }
    let error = errc
        .checked_neg()
        .and_then(|raw| i32::try_from(raw).ok())
        .map_or(FsError::Io, FsError::from_raw_os_error);
    Err(anyhow!("{op} {path}: {error}"))
}

fn check_code(op: &str, path: &str, errc: i32) -> Result<()> {
    check(op, path, i64::from(errc)).map(drop)
}

/// Run one command against `fs`, reading from `input` and printing to `out`.
pub fn run(
    fs: &dyn FileSystemOps,
    command: Command,
    input: &mut dyn Read,
    out: &mut dyn Write,
) -> Result<()> {
    match command {
        Command::Stat { path, json } => {
            let mut stat = Stat::default();
            check_code("getattr", &path, fs.getattr(&path, &mut stat, NO_HANDLE))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&stat)?)?;
            } else {
                print_stat(out, &path, &stat)?;
            }
        }
        Command::Statfs { path, json } => {
            let mut statfs = Statfs::default();
            check_code("statfs", &path, fs.statfs(&path, &mut statfs))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&statfs)?)?;
            } else {
                print_statfs(out, &statfs)?;
            }
        }
        Command::Ls { path } => {
            let mut names = Vec::new();
            let mut fill = |name: &str, _: Option<&Stat>, _: i64| {
                names.push(name.to_owned());
                true
            };
            check_code("readdir", &path, fs.readdir(&path, &mut fill, 0, NO_HANDLE))?;
            names.sort();
            for name in names {
                writeln!(out, "{name}")?;
            }
        }
        Command::Cat { path } => {
            let (errc, fh) = fs.open(&path, O_RDONLY);
            check_code("open", &path, errc)?;
            let copied = copy_out(fs, &path, fh, out);
            let released = check_code("release", &path, fs.release(&path, fh));
            copied.and(released)?;
        }
        Command::Readlink { path } => {
            let (errc, target) = fs.readlink(&path);
            check_code("readlink", &path, errc)?;
            writeln!(out, "{target}")?;
        }
        Command::Write { path, mode } => {
            let mut data = Vec::new();
            input.read_to_end(&mut data)?;
            let (errc, fh) = fs.create(&path, mode);
            check_code("create", &path, errc)?;
            let written = write_all(fs, &path, fh, &data);
            let released = check_code("release", &path, fs.release(&path, fh));
            written.and(released)?;
            tracing::debug!(path = %path, bytes = data.len(), "wrote file");
        }
        Command::Mkdir { path, mode } => {
            check_code("mkdir", &path, fs.mkdir(&path, mode))?;
        }
        Command::Rm { path } => {
            check_code("unlink", &path, fs.unlink(&path))?;
        }
        Command::Rmdir { path } => {
            check_code("rmdir", &path, fs.rmdir(&path))?;
        }
        Command::Mv { from, to } => {
            check_code("rename", &from, fs.rename(&from, &to))?;
        }
        Command::Ln {
            target,
            link,
            symbolic,
        } => {
            if symbolic {
                check_code("symlink", &link, fs.symlink(&target, &link))?;
            } else {
                check_code("link", &link, fs.link(&target, &link))?;
            }
        }
        Command::Chmod { mode, path } => {
            check_code("chmod", &path, fs.chmod(&path, mode))?;
        }
        Command::Touch { path } => {
            let mut stat = Stat::default();
            let errc = fs.getattr(&path, &mut stat, NO_HANDLE);
            if errc == FsError::NotFound.code() {
                let (errc, fh) = fs.create(&path, 0o644);
                check_code("create", &path, errc)?;
                check_code("release", &path, fs.release(&path, fh))?;
            } else {
                check_code("getattr", &path, errc)?;
            }
            let now = Timespec::from(SystemTime::now());
            check_code("utimens", &path, fs.utimens(&path, &[now, now]))?;
        }
    }
    Ok(())
}

fn copy_out(fs: &dyn FileSystemOps, path: &str, fh: u64, out: &mut dyn Write) -> Result<()> {
    let mut buf = vec![0; CHUNK];
    let mut offset = 0i64;
    loop {
        let n = check("read", path, fs.read(path, &mut buf, offset, fh) as i64)? as usize;
        if n == 0 {
            break;
        }
        out.write_all(&buf[..n])?;
        offset += n as i64;
    }
    out.flush()?;
    Ok(())
}

fn write_all(fs: &dyn FileSystemOps, path: &str, fh: u64, mut data: &[u8]) -> Result<()> {
    let mut offset = 0i64;
    while !data.is_empty() {
        let n = check("write", path, fs.write(path, data, offset, fh) as i64)? as usize;
        if n == 0 {
            return Err(anyhow!("write {path}: no progress at offset {offset}"));
        }
        data = &data[n..];
        offset += n as i64;
    }
    Ok(())
}

fn print_stat(out: &mut dyn Write, path: &str, stat: &Stat) -> Result<()> {
    writeln!(out, "  File: {path}")?;
    writeln!(
        out,
        "  Size: {}\tBlocks: {}\tIO Block: {}",
        stat.size, stat.blocks, stat.blksize
    )?;
    writeln!(out, "Device: {}\tInode: {}\tLinks: {}", stat.dev, stat.ino, stat.nlink)?;
    writeln!(
        out,
        "  Mode: {:06o}\tUid: {}\tGid: {}",
        stat.mode, stat.uid, stat.gid
    )?;
    writeln!(out, "Access: {}.{:09}", stat.atim.sec, stat.atim.nsec)?;
    writeln!(out, "Modify: {}.{:09}", stat.mtim.sec, stat.mtim.nsec)?;
    writeln!(out, "Change: {}.{:09}", stat.ctim.sec, stat.ctim.nsec)?;
    Ok(())
}

fn print_statfs(out: &mut dyn Write, st: &Statfs) -> Result<()> {
    writeln!(out, "Block size: {}\tFragment size: {}", st.bsize, st.frsize)?;
    writeln!(
        out,
        "Blocks: Total: {}\tFree: {}\tAvailable: {}",
        st.blocks, st.bfree, st.bavail
    )?;
    writeln!(
        out,
        "Inodes: Total: {}\tFree: {}\tAvailable: {}",
        st.files, st.ffree, st.favail
    )?;
    writeln!(out, "Max name: {}\tFsid: {:x}\tFlags: {:#x}", st.namemax, st.fsid, st.flag)?;
    Ok(())
}

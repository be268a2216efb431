//! Buffered streaming copy.
//!
//! - 1 MiB read/write buffers to keep syscall counts low on large files.
//! - The caller picks whether the destination may already exist.
//! - `Durability::Full` fsyncs the written file before returning.
//!
//! Snapshot semantics: the source is read once from start to EOF; bytes appended
//! concurrently are not included.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

pub(super) const BUF_SIZE: usize = 1024 * 1024;

/// Post-write flush behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Durability {
    /// Flush to the OS page cache only.
    Data,
    /// `sync_all` the destination.
    Full,
}

/// How the destination file is opened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum Target {
    /// create + truncate: an existing file is overwritten in place.
    Overwrite,
    /// create_new: fails with AlreadyExists instead of clobbering.
    Fresh,
}

/// Copy `src` -> `dst`, returning the number of bytes written.
pub(super) fn copy_streaming(
    src: &Path,
    dst: &Path,
    target: Target,
    durability: Durability,
) -> io::Result<u64> {
    let src_f = File::open(src)?;

    let mut opts = OpenOptions::new();
    opts.write(true);
    match target {
        Target::Overwrite => opts.create(true).truncate(true),
        Target::Fresh => opts.create_new(true),
    };
    let dst_f = opts.open(dst)?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer)?;
    writer.flush()?;

    if durability == Durability::Full {
        writer.get_ref().sync_all()?;
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copies_small_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.txt");
        let dst = dir.path().join("dst.txt");
        fs::write(&src, b"hello world").unwrap();

        let n = copy_streaming(&src, &dst, Target::Fresh, Durability::Data).unwrap();
        assert_eq!(n, 11);
        assert_eq!(fs::read(&dst).unwrap(), b"hello world");
    }

    #[test]
    fn zero_length_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty");
        let dst = dir.path().join("out");
        File::create(&src).unwrap();
        let n = copy_streaming(&src, &dst, Target::Overwrite, Durability::Full).unwrap();
        assert_eq!(n, 0);
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[test]
    fn fresh_target_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::write(&src, b"data").unwrap();
        fs::write(&dst, b"x").unwrap();
        let err = copy_streaming(&src, &dst, Target::Fresh, Durability::Data).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[test]
    fn overwrite_truncates_longer_previous_content() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src");
        let dst = dir.path().join("dst");
        fs::write(&src, b"new").unwrap();
        fs::write(&dst, b"much longer old content").unwrap();
        copy_streaming(&src, &dst, Target::Overwrite, Durability::Data).unwrap();
        assert_eq!(fs::read(&dst).unwrap(), b"new");
    }

    #[test]
    fn crosses_buffer_boundaries() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.bin");
        let dst = dir.path().join("big.out");
        let data: Vec<u8> = (0..2 * BUF_SIZE + 123).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        let n = copy_streaming(&src, &dst, Target::Fresh, Durability::Full).unwrap();
        assert_eq!(n as usize, data.len());
        assert_eq!(fs::read(&dst).unwrap(), data);
    }
}

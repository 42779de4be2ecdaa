//! Storage collaborator interface.
//!
//! The pipeline only ever needs a POSIX-like view of the card:
//! exists/open/read/seek/close, plus a directory listing for the slideshow.
//! The card (or host filesystem, or an in-memory map in tests) supplies it.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::error::DecodeError;

/// A mounted storage volume holding bitmap files.
pub trait Storage {
    type File: StorageFile;

    /// Whether `path` names an existing file.
    fn exists(&self, path: &str) -> bool;

    /// Open `path` read-only.
    fn open(&mut self, path: &str) -> Result<Self::File, DecodeError>;

    /// List the files (not directories) directly under `dir`, as full paths.
    fn list(&mut self, dir: &str) -> Result<Vec<String>, DecodeError>;
}

/// An open read-only file handle.
///
/// Handles are exclusively owned by one render call and consumed by
/// [`close`](StorageFile::close), so release is visible in the type system.
pub trait StorageFile {
    /// Read up to `buf.len()` bytes; returns the number read. Zero means EOF.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError>;

    /// Seek to an absolute byte offset from the start of the file.
    fn seek(&mut self, offset: u64) -> Result<(), DecodeError>;

    /// Release the handle.
    fn close(self) -> Result<(), DecodeError>;
}

// ── In-memory storage ───────────────────────────────────────────────

/// Map-backed storage for host-side tests and simulators.
///
/// Tracks how many handles have been closed so the pipeline's
/// close-exactly-once discipline is observable from tests.
#[derive(Default)]
pub struct MemStorage {
    files: Vec<(String, Rc<[u8]>)>,
    closes: Rc<Cell<usize>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a file at `path`.
    pub fn insert(&mut self, path: &str, data: Vec<u8>) {
        self.files.retain(|(p, _)| p != path);
        self.files.push((String::from(path), data.into()));
    }

    /// Remove the file at `path`; returns whether it existed.
    pub fn remove(&mut self, path: &str) -> bool {
        let before = self.files.len();
        self.files.retain(|(p, _)| p != path);
        self.files.len() != before
    }

    /// Number of handles closed so far.
    pub fn close_count(&self) -> usize {
        self.closes.get()
    }
}

impl Storage for MemStorage {
    type File = MemFile;

    fn exists(&self, path: &str) -> bool {
        self.files.iter().any(|(p, _)| p == path)
    }

    fn open(&mut self, path: &str) -> Result<MemFile, DecodeError> {
        let data = self
            .files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, d)| Rc::clone(d))
            .ok_or_else(|| DecodeError::OpenFailed(String::from(path)))?;
        Ok(MemFile {
            data,
            pos: 0,
            closes: Rc::clone(&self.closes),
        })
    }

    fn list(&mut self, dir: &str) -> Result<Vec<String>, DecodeError> {
        let mut out: Vec<String> = self
            .files
            .iter()
            .map(|(p, _)| p.as_str())
            .filter(|p| match p.rsplit_once('/') {
                Some((parent, _)) => parent == dir,
                None => dir.is_empty(),
            })
            .map(String::from)
            .collect();
        if out.is_empty() && !dir.is_empty() {
            // `bitmaps-old/x` must not make a missing `bitmaps` look present.
            let prefix = format!("{dir}/");
            if !self.files.iter().any(|(p, _)| p.starts_with(&prefix)) {
                return Err(DecodeError::NotFound(String::from(dir)));
            }
        }
        out.sort();
        Ok(out)
    }
}

/// Handle into a [`MemStorage`] file.
pub struct MemFile {
    data: Rc<[u8]>,
    pos: usize,
    closes: Rc<Cell<usize>>,
}

impl StorageFile for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
        let available = self.data.len().saturating_sub(self.pos);
        let n = buf.len().min(available);
        if n > 0 {
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        }
        self.pos += n;
        Ok(n)
    }

    fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
        // Seeking past EOF is allowed; the next read simply returns 0.
        self.pos = usize::try_from(offset)
            .map_err(|_| DecodeError::Storage(String::from("seek offset overflow")))?;
        Ok(())
    }

    fn close(self) -> Result<(), DecodeError> {
        self.closes.set(self.closes.get() + 1);
        Ok(())
    }
}

// ── Filesystem storage (std) ────────────────────────────────────────

#[cfg(feature = "std")]
pub mod fs {
    use std::fs::File;
    use std::io::{Read, Seek, SeekFrom};
    use std::path::PathBuf;
    use std::string::{String, ToString};
    use std::vec::Vec;

    use super::{Storage, StorageFile};
    use crate::error::DecodeError;

    /// Storage rooted at a host directory, e.g. a mounted SD card.
    pub struct FsStorage {
        root: PathBuf,
    }

    impl FsStorage {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        fn resolve(&self, path: &str) -> PathBuf {
            self.root.join(path)
        }
    }

    impl Storage for FsStorage {
        type File = FsFile;

        fn exists(&self, path: &str) -> bool {
            self.resolve(path).is_file()
        }

        fn open(&mut self, path: &str) -> Result<FsFile, DecodeError> {
            let file = File::open(self.resolve(path))
                .map_err(|e| DecodeError::OpenFailed(e.to_string()))?;
            Ok(FsFile { inner: file })
        }

        fn list(&mut self, dir: &str) -> Result<Vec<String>, DecodeError> {
            let entries = std::fs::read_dir(self.resolve(dir))
                .map_err(|e| DecodeError::NotFound(e.to_string()))?;
            let mut out = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|e| DecodeError::Storage(e.to_string()))?;
                if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    out.push(format!("{dir}/{}", entry.file_name().to_string_lossy()));
                }
            }
            out.sort();
            Ok(out)
        }
    }

    /// Handle into an [`FsStorage`] file.
    pub struct FsFile {
        inner: File,
    }

    impl StorageFile for FsFile {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, DecodeError> {
            self.inner
                .read(buf)
                .map_err(|e| DecodeError::Storage(e.to_string()))
        }

        fn seek(&mut self, offset: u64) -> Result<(), DecodeError> {
            self.inner
                .seek(SeekFrom::Start(offset))
                .map(|_| ())
                .map_err(|e| DecodeError::Storage(e.to_string()))
        }

        fn close(self) -> Result<(), DecodeError> {
            drop(self.inner);
            Ok(())
        }
    }
}

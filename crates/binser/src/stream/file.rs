//! File-backed stream with position-explicit I/O.
//!
//! Every read and write passes its offset to the OS explicitly, so the
//! logical cursor held by [`FileStream`] is authoritative and the OS file
//! pointer is never relied upon.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::StreamError;
use crate::stream::{StreamBase, StreamOrigin, StreamReader, StreamWriter, resolve_seek};

/// How a [`FileStream`] opens its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileMode {
    /// Read from an existing file.
    ReadOnly,
    /// Create the file, or truncate it if it exists, and write to it.
    WriteOnly,
    /// Read and write an existing file without truncating it.
    ReadWrite,
}

impl FileMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            FileMode::ReadOnly => {
                options.read(true);
            }
            FileMode::WriteOnly => {
                options.write(true).create(true).truncate(true);
            }
            FileMode::ReadWrite => {
                options.read(true).write(true);
            }
        }
        options
    }
}

/// A stream over a file on disk.
#[derive(Debug)]
pub struct FileStream {
    file: File,
    path: PathBuf,
    mode: FileMode,
    pos: u64,
}

impl FileStream {
    /// Opens `path` in the given mode with the cursor at byte 0.
    pub fn open(path: impl AsRef<Path>, mode: FileMode) -> Result<Self, StreamError> {
        let path = path.as_ref().to_path_buf();
        let file = mode
            .options()
            .open(&path)
            .map_err(|source| StreamError::Open {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), ?mode, "opened file stream");
        Ok(Self {
            file,
            path,
            mode,
            pos: 0,
        })
    }

    /// Returns the path this stream was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the open mode.
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Truncates or extends the file to exactly `len` bytes.
    ///
    /// The cursor is left where it was, even if it now lies past the end.
    pub fn resize(&mut self, len: u64) -> Result<(), StreamError> {
        self.file.set_len(len)?;
        debug!(path = %self.path.display(), len, "resized file stream");
        Ok(())
    }

    /// Flushes data and metadata to the storage device.
    pub fn sync(&mut self) -> Result<(), StreamError> {
        self.file.sync_all()?;
        trace!(path = %self.path.display(), "synced file stream");
        Ok(())
    }
}

impl StreamReader for FileStream {
    fn read(&mut self, out: &mut [u8]) -> Result<usize, StreamError> {
        let mut filled = 0;
        while filled < out.len() {
            match read_at(&self.file, &mut out[filled..], self.pos + filled as u64) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        self.pos += filled as u64;
        Ok(filled)
    }

    fn read_exact(&mut self, out: &mut [u8]) -> Result<(), StreamError> {
        let available = self.length()?.saturating_sub(self.pos);
        let requested = out.len();
        let underflow = |available: u64| StreamError::Underflow {
            requested,
            available: usize::try_from(available).unwrap_or(usize::MAX),
        };
        if out.len() as u64 > available {
            return Err(underflow(available));
        }
        let start = self.pos;
        let n = self.read(out)?;
        if n < out.len() {
            // the file shrank underneath us
            self.pos = start;
            return Err(underflow(n as u64));
        }
        Ok(())
    }

    fn stream_size(&self) -> Result<u64, StreamError> {
        self.length()
    }

    fn is_end_of_stream(&self) -> Result<bool, StreamError> {
        Ok(self.pos >= self.length()?)
    }
}

impl StreamWriter for FileStream {
    fn write(&mut self, bytes: &[u8]) -> Result<usize, StreamError> {
        let mut written = 0;
        while written < bytes.len() {
            match write_at(&self.file, &bytes[written..], self.pos + written as u64) {
                Ok(0) => {
                    self.pos += written as u64;
                    return Err(StreamError::Io(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "file accepted zero bytes",
                    )));
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.pos += written as u64;
                    return Err(e.into());
                }
            }
        }
        self.pos += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> Result<(), StreamError> {
        self.file.flush()?;
        Ok(())
    }
}

impl StreamBase for FileStream {
    fn seek(&mut self, offset: i64, origin: StreamOrigin) -> Result<u64, StreamError> {
        let length = self.length()?;
        if origin == StreamOrigin::End && offset > 0 {
            return Err(StreamError::SeekOutOfRange {
                offset,
                origin,
                length,
            });
        }
        // Seeking past the end is allowed; a later write extends the file.
        let target = resolve_seek(offset, origin, self.pos, length, i64::MAX as u64)?;
        trace!(offset, ?origin, target, "seek");
        self.pos = target;
        Ok(target)
    }

    fn tell(&self) -> u64 {
        self.pos
    }

    fn length(&self) -> Result<u64, StreamError> {
        Ok(self.file.metadata()?.len())
    }
}

#[cfg(unix)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(unix)]
fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.write_at(buf, offset)
}

#[cfg(windows)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}

#[cfg(windows)]
fn write_at(file: &File, buf: &[u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_write(buf, offset)
}

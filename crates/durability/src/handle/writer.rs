//! Write handle and crash-safe file publication
//!
//! File-backed writes use the write-fsync-rename pattern:
//! 1. Write to a temporary file next to the destination (`.<name>.XXXXXX.tmp`)
//! 2. fsync the temporary file
//! 3. Atomic rename over the destination
//! 4. fsync the parent directory
//!
//! Either the complete new file is visible at the destination or the
//! previous file is. If [`WriteHandle::commit`] is never reached (early
//! error return, panic, or [`WriteHandle::abandon`]) the temporary file is
//! deleted when the handle is dropped.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use simstore_core::{Encoding, Error, FormatVersion, Result, CURRENT_FORMAT_VERSION};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::codec::{Record, Scalar};

/// Output side of a traversal.
pub struct WriteHandle<W: Write> {
    sink: W,
    encoding: Encoding,
    version: FormatVersion,
    at_line_start: bool,
}

impl<W: Write> WriteHandle<W> {
    /// Wrap an already-open sink.
    pub fn new(sink: W, encoding: Encoding) -> Self {
        WriteHandle {
            sink,
            encoding,
            version: CURRENT_FORMAT_VERSION,
            at_line_start: true,
        }
    }

    /// Encoding of the sink
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Format version being written
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Set the format version being written
    pub fn set_version(&mut self, version: FormatVersion) {
        self.version = version;
    }

    /// Encode one scalar (no trailing newline).
    pub fn put<T: Scalar>(&mut self, value: &T) -> Result<()> {
        T::write(self, value, false)
    }

    /// Encode one record.
    pub fn record<T: Record>(&mut self, value: &T) -> Result<()> {
        value.write(self)
    }

    /// Token separator. Text only; no-op in binary.
    pub fn space(&mut self) -> Result<()> {
        match self.encoding {
            Encoding::Text => self.write_raw(b" "),
            Encoding::Binary => Ok(()),
        }
    }

    /// End the current line. Text only, and never emits an empty line.
    pub fn newline(&mut self) -> Result<()> {
        match self.encoding {
            Encoding::Text if !self.at_line_start => self.write_raw(b"\n"),
            _ => Ok(()),
        }
    }

    /// Write bytes verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.sink.write_all(bytes).map_err(Error::write)?;
        if let Some(last) = bytes.last() {
            self.at_line_start = *last == b'\n';
        }
        Ok(())
    }

    /// Flush buffered output to the sink.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush().map_err(Error::write)
    }

    /// Give back the underlying sink
    pub fn into_inner(self) -> W {
        self.sink
    }

    pub(crate) fn sink_mut(&mut self) -> &mut W {
        &mut self.sink
    }
}

impl WriteHandle<AtomicFile> {
    /// Start a crash-safe write of `final_path`.
    ///
    /// Nothing is visible at `final_path` until [`WriteHandle::commit`].
    pub fn create(final_path: impl AsRef<Path>, encoding: Encoding) -> Result<Self> {
        let file = AtomicFile::create(final_path)?;
        Ok(WriteHandle::new(file, encoding))
    }

    /// Destination path
    pub fn final_path(&self) -> &Path {
        self.sink.final_path()
    }

    /// Atomically publish everything written so far at the destination.
    pub fn commit(self) -> Result<PathBuf> {
        self.sink.commit()
    }

    /// Discard the write; the destination is left untouched.
    pub fn abandon(self) {
        drop(self);
    }
}

/// Temporary file that replaces its destination on commit.
pub struct AtomicFile {
    final_path: PathBuf,
    temp: Option<BufWriter<NamedTempFile>>,
}

impl AtomicFile {
    /// Create the temporary file in the destination's directory.
    ///
    /// Same directory means same filesystem, so the final rename is atomic.
    pub fn create(final_path: impl AsRef<Path>) -> Result<Self> {
        let final_path = final_path.as_ref();
        let file_name = final_path.file_name().ok_or_else(|| {
            Error::InvalidPath(format!("{:?} does not name a file", final_path))
        })?;
        let dir = parent_dir(final_path);

        let prefix = format!(".{}.", file_name.to_string_lossy());
        let temp = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(".tmp")
            .tempfile_in(&dir)
            .map_err(|e| Error::open(final_path, e))?;

        debug!(
            target: "simstore::io",
            path = %final_path.display(),
            temp = %temp.path().display(),
            "Started atomic write"
        );

        Ok(AtomicFile {
            final_path: final_path.to_path_buf(),
            temp: Some(BufWriter::new(temp)),
        })
    }

    /// Destination path
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }

    /// Path of the temporary file, while the write is pending
    pub fn temp_path(&self) -> Option<&Path> {
        self.temp.as_ref().map(|t| t.get_ref().path())
    }

    /// Flush, fsync, rename over the destination, fsync the directory.
    pub fn commit(mut self) -> Result<PathBuf> {
        let buffered = self
            .temp
            .take()
            .ok_or_else(|| Error::WriteFailed("write already finished".to_string()))?;
        let temp = buffered
            .into_inner()
            .map_err(|e| Error::write(e.into_error()))?;

        temp.as_file().sync_all().map_err(Error::write)?;
        temp.persist(&self.final_path)
            .map_err(|e| Error::write(e.error))?;
        sync_dir(&parent_dir(&self.final_path))?;

        debug!(target: "simstore::io", path = %self.final_path.display(), "Committed atomic write");
        Ok(self.final_path.clone())
    }

    fn pending(&mut self) -> io::Result<&mut BufWriter<NamedTempFile>> {
        self.temp
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "write already finished"))
    }
}

impl Write for AtomicFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.pending()?.flush()
    }
}

impl Drop for AtomicFile {
    fn drop(&mut self) {
        if let Some(temp) = self.temp.take() {
            warn!(
                target: "simstore::io",
                path = %self.final_path.display(),
                "Discarding uncommitted write"
            );
            // NamedTempFile removes the file on drop
            drop(temp);
        }
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> Result<()> {
    File::open(dir)
        .and_then(|d| d.sync_all())
        .map_err(Error::write)
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

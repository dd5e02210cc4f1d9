//! Read handle and text tokenizer
//!
//! A [`ReadHandle`] wraps a buffered source together with the encoding the
//! caller selected and the format version of the file being read. The text
//! encoding is read token by token: ASCII whitespace separates tokens and
//! line structure carries no meaning.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use simstore_core::{Encoding, Error, FormatVersion, Result, CURRENT_FORMAT_VERSION};
use tracing::debug;

use crate::codec::{Record, Scalar};

/// Input side of a traversal.
pub struct ReadHandle<R> {
    source: R,
    encoding: Encoding,
    version: FormatVersion,
}

impl ReadHandle<BufReader<File>> {
    /// Open `path` for reading in the given encoding.
    ///
    /// The version starts at the current format version and is replaced
    /// by the header's version once the header is decoded.
    pub fn open(path: impl AsRef<Path>, encoding: Encoding) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(Error::InvalidPath("empty file name".to_string()));
        }
        let file = File::open(path).map_err(|e| Error::open(path, e))?;
        debug!(target: "simstore::io", path = %path.display(), %encoding, "Opened file for reading");
        Ok(ReadHandle::new(BufReader::new(file), encoding))
    }
}

impl<R: BufRead> ReadHandle<R> {
    /// Wrap an already-open source.
    pub fn new(source: R, encoding: Encoding) -> Self {
        ReadHandle {
            source,
            encoding,
            version: CURRENT_FORMAT_VERSION,
        }
    }

    /// Encoding of the source
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Format version of the file being read
    pub fn version(&self) -> FormatVersion {
        self.version
    }

    /// Override the format version used for version-gated fields
    pub fn set_version(&mut self, version: FormatVersion) {
        self.version = version;
    }

    /// Decode one scalar in the handle's encoding.
    pub fn get<T: Scalar>(&mut self) -> Result<T> {
        T::read(self)
    }

    /// Decode one record in the handle's encoding.
    pub fn record<T: Record>(&mut self) -> Result<T> {
        T::read(self)
    }

    /// Give back the underlying source
    pub fn into_inner(self) -> R {
        self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut R {
        &mut self.source
    }

    fn peek(&mut self) -> Result<Option<u8>> {
        Ok(self.source.fill_buf().map_err(Error::read)?.first().copied())
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(byte) = self.peek()? {
            if !is_space(byte) {
                break;
            }
            self.source.consume(1);
        }
        Ok(())
    }

    /// Next non-whitespace byte.
    pub fn next_char(&mut self) -> Result<u8> {
        self.skip_whitespace()?;
        let byte = self.peek()?.ok_or_else(end_of_input)?;
        self.source.consume(1);
        Ok(byte)
    }

    /// Next whitespace-delimited token.
    pub fn next_token(&mut self) -> Result<String> {
        self.skip_whitespace()?;
        let mut token = Vec::new();
        while let Some(byte) = self.peek()? {
            if is_space(byte) {
                break;
            }
            token.push(byte);
            self.source.consume(1);
        }
        if token.is_empty() {
            return Err(end_of_input());
        }
        into_utf8(token)
    }

    /// Next text value: a double-quoted run (which may contain whitespace)
    /// or a bare token with a stray trailing quote stripped.
    pub fn next_text(&mut self) -> Result<String> {
        self.skip_whitespace()?;
        if self.peek()? != Some(b'"') {
            let mut token = self.next_token()?;
            if token.ends_with('"') {
                token.pop();
            }
            return Ok(token);
        }

        self.source.consume(1);
        let mut text = Vec::new();
        loop {
            match self.peek()? {
                Some(b'"') => {
                    self.source.consume(1);
                    break;
                }
                Some(byte) => {
                    text.push(byte);
                    self.source.consume(1);
                }
                None => return Err(Error::ReadFailed("unterminated quoted text".to_string())),
            }
        }
        into_utf8(text)
    }

    /// Exactly `len` raw bytes.
    pub fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        (&mut self.source)
            .take(len as u64)
            .read_to_end(&mut bytes)
            .map_err(Error::read)?;
        if bytes.len() != len {
            return Err(Error::ReadFailed(format!(
                "expected {} bytes, found {}",
                len,
                bytes.len()
            )));
        }
        Ok(bytes)
    }
}

/// C `isspace` set: space, \t, \n, \v, \f, \r
pub(crate) fn is_space(byte: u8) -> bool {
    byte.is_ascii_whitespace() || byte == 0x0b
}

fn end_of_input() -> Error {
    Error::ReadFailed("unexpected end of input".to_string())
}

fn into_utf8(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::ReadFailed(format!("invalid UTF-8: {}", e)))
}

//! Schema sources.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Something that yields one introspection document.
pub trait SchemaSource {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// Reads the whole document.
    ///
    /// # Errors
    /// Returns the underlying IO error.
    fn read(&mut self) -> io::Result<Vec<u8>>;
}

impl<S: SchemaSource + ?Sized> SchemaSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        (**self).read()
    }
}

/// A document stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    name: String,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SchemaSource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

/// A document read from any reader, such as stdin.
#[derive(Debug)]
pub struct ReaderSource<R> {
    name: String,
    reader: R,
}

impl<R: Read> ReaderSource<R> {
    /// Creates a named reader source.
    pub fn new(name: impl Into<String>, reader: R) -> Self {
        Self {
            name: name.into(),
            reader,
        }
    }
}

impl ReaderSource<io::Stdin> {
    /// Reads the document from standard input.
    #[must_use]
    pub fn stdin() -> Self {
        Self::new("<stdin>", io::stdin())
    }
}

impl<R: Read> SchemaSource for ReaderSource<R> {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.reader.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

//! Output sinks for generated text.
//!
//! A [`CodeGenerator`] hands out [`OutputFile`] handles. A generation pass
//! opens exactly one handle, appends every function to it through an
//! [`Emitter`], and closes it once.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use indexmap::IndexMap;

use crate::{Error, Result};

/// Location of a generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSpec {
    /// Package of the generated file; empty for the root package.
    pub package: String,
    /// File name without extension.
    pub file_name: String,
    pub extension: String,
}

impl FileSpec {
    pub fn new(package: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            file_name: file_name.into(),
            extension: "kt".to_string(),
        }
    }

    /// Path relative to the output root (`com/example/GeneratedFunctions.kt`).
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(format!("{}.{}", self.file_name, self.extension));
        path
    }
}

impl Default for FileSpec {
    fn default() -> Self {
        Self::new("", "GeneratedFunctions")
    }
}

/// An open output handle.
pub trait OutputFile {
    /// Append text to the file.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Flush and release the handle.
    fn close(self: Box<Self>) -> Result<()>;
}

/// Creates output files.
pub trait CodeGenerator {
    fn create_new_file(&mut self, spec: &FileSpec) -> Result<Box<dyn OutputFile + '_>>;
}

/// Writes generated files below a root directory.
#[derive(Debug)]
pub struct FileSystemCodeGenerator {
    root: PathBuf,
    generated: Vec<PathBuf>,
}

impl FileSystemCodeGenerator {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            generated: Vec::new(),
        }
    }

    /// Paths of files that were closed successfully.
    pub fn generated(&self) -> &[PathBuf] {
        &self.generated
    }
}

impl CodeGenerator for FileSystemCodeGenerator {
    fn create_new_file(&mut self, spec: &FileSpec) -> Result<Box<dyn OutputFile + '_>> {
        let path = self.root.join(spec.relative_path());
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let file = File::create(&path).map_err(|e| Error::io(&path, e))?;
        tracing::debug!(path = %path.display(), "created output file");

        Ok(Box::new(FileOutput {
            path,
            writer: BufWriter::new(file),
            generated: &mut self.generated,
        }))
    }
}

struct FileOutput<'a> {
    path: PathBuf,
    writer: BufWriter<File>,
    generated: &'a mut Vec<PathBuf>,
}

impl OutputFile for FileOutput<'_> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| Error::io(&self.path, e))
    }

    fn close(mut self: Box<Self>) -> Result<()> {
        self.writer.flush().map_err(|e| Error::io(&self.path, e))?;
        self.generated.push(self.path.clone());
        Ok(())
    }
}

/// Keeps generated files in memory. Used for previews and tests.
#[derive(Debug, Default)]
pub struct MemoryCodeGenerator {
    files: IndexMap<PathBuf, String>,
    opened: usize,
    closed: usize,
}

impl MemoryCodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed files by relative path, in creation order.
    pub fn files(&self) -> &IndexMap<PathBuf, String> {
        &self.files
    }

    /// Content of a closed file.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// Number of handles handed out.
    pub fn opened(&self) -> usize {
        self.opened
    }

    /// Number of handles closed.
    pub fn closed(&self) -> usize {
        self.closed
    }
}

impl CodeGenerator for MemoryCodeGenerator {
    fn create_new_file(&mut self, spec: &FileSpec) -> Result<Box<dyn OutputFile + '_>> {
        self.opened += 1;
        Ok(Box::new(MemoryOutput {
            path: spec.relative_path(),
            buffer: String::new(),
            owner: self,
        }))
    }
}

struct MemoryOutput<'a> {
    path: PathBuf,
    buffer: String,
    owner: &'a mut MemoryCodeGenerator,
}

impl OutputFile for MemoryOutput<'_> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.buffer.push_str(text);
        Ok(())
    }

    fn close(self: Box<Self>) -> Result<()> {
        let MemoryOutput {
            path,
            buffer,
            owner,
        } = *self;
        owner.closed += 1;
        owner.files.insert(path, buffer);
        Ok(())
    }
}

/// Appends function texts to the pass's single output handle.
pub struct Emitter<'a> {
    file: Box<dyn OutputFile + 'a>,
    written: usize,
}

impl<'a> Emitter<'a> {
    /// Open the pass's output file.
    pub fn open(codegen: &'a mut dyn CodeGenerator, spec: &FileSpec) -> Result<Self> {
        Ok(Self {
            file: codegen.create_new_file(spec)?,
            written: 0,
        })
    }

    pub fn emit(&mut self, text: &str) -> Result<()> {
        self.file.write(text)?;
        self.written += text.len();
        Ok(())
    }

    /// Close the handle, returning the number of bytes written.
    pub fn close(self) -> Result<usize> {
        self.file.close()?;
        Ok(self.written)
    }
}

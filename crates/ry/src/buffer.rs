//! # Buffers
//!
//! ## Overview
//!
//! A [Buffer] is a named list of lines along with the names of the modes that are active for it,
//! and [Buffers] is the registry that owns every open buffer.
//!
//! Buffers are created from the content returned by a [BufferLoader], which is responsible for
//! reading files and deciding what to call them.
//!
//! ## Example
//!
//! ```
//! use ry::buffer::{Buffer, Buffers};
//!
//! let mut buffers = Buffers::default();
//! buffers.add(Buffer::new("foo", "/home/user/foo", vec!["hello".into()]));
//!
//! assert_eq!(buffers.find("foo").unwrap().line(0), Some("hello"));
//! assert!(buffers.remove("foo").is_some());
//! assert!(buffers.find("foo").is_none());
//! ```
use std::path::{Path, PathBuf};

/// The text that a [BufferLoader] found at a path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Content {
    /// The lines of a readable file.
    File(Vec<String>),
    /// The path is a directory.
    Directory,
    /// The path doesn't exist or couldn't be read.
    Missing,
}

impl Content {
    /// The lines a buffer should start with for this content.
    ///
    /// Directories become a single `dir` line, and missing files a single empty line.
    pub fn into_lines(self) -> Vec<String> {
        match self {
            Content::File(lines) => lines,
            Content::Directory => vec!["dir".to_string()],
            Content::Missing => vec![String::new()],
        }
    }
}

/// What a [BufferLoader] returns for a path.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loaded {
    /// The name to show for the buffer.
    pub name: String,

    /// The resolved path.
    pub path: PathBuf,

    /// What was found there.
    pub content: Content,
}

/// Reads the initial content of buffers.
pub trait BufferLoader {
    /// Load whatever is at a path.
    fn load(&self, path: &Path) -> Loaded;
}

/// A named text container.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Buffer {
    name: String,
    path: PathBuf,
    lines: Vec<String>,
    modes: Vec<String>,
}

impl Buffer {
    /// Create a new buffer without any local modes.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Buffer { name: name.into(), path: path.into(), lines, modes: vec![] }
    }

    /// The name to show for this buffer.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Where this buffer's content came from.
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Activate a mode for this buffer. Modes are checked in the order they were added.
    pub fn add_mode(&mut self, mode: impl Into<String>) {
        self.modes.push(mode.into());
    }

    /// Deactivate the first occurrence of a mode for this buffer.
    pub fn remove_mode(&mut self, mode: &str) -> bool {
        if let Some(idx) = self.modes.iter().position(|m| m == mode) {
            self.modes.remove(idx);
            return true;
        }

        return false;
    }

    /// The names of the modes active for this buffer.
    pub fn modes(&self) -> &[String] {
        self.modes.as_slice()
    }

    /// The lines of this buffer.
    pub fn lines(&self) -> &[String] {
        self.lines.as_slice()
    }

    /// The lines of this buffer, for modification.
    pub fn lines_mut(&mut self) -> &mut Vec<String> {
        &mut self.lines
    }

    /// Get a single line of this buffer.
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// The number of lines in this buffer.
    pub fn len_lines(&self) -> usize {
        self.lines.len()
    }

    /// The number of characters on a line, or zero if it doesn't exist.
    pub fn line_len(&self, idx: usize) -> usize {
        self.line(idx).map(|l| l.chars().count()).unwrap_or(0)
    }
}

/// The registry of open buffers, in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct Buffers {
    buffers: Vec<Buffer>,
}

impl Buffers {
    /// Add a buffer to the end of the registry.
    ///
    /// Names are not checked for uniqueness here; lookups only ever find the first buffer with
    /// a given name.
    pub fn add(&mut self, buffer: Buffer) {
        self.buffers.push(buffer);
    }

    /// Load a buffer from a path, and add it to the registry.
    pub fn open(&mut self, loader: &dyn BufferLoader, path: &Path) -> &mut Buffer {
        let Loaded { name, path, content } = loader.load(path);
        let idx = self.buffers.len();

        tracing::debug!(name = %name, path = %path.display(), "opened buffer");

        self.add(Buffer::new(name, path, content.into_lines()));

        return &mut self.buffers[idx];
    }

    /// Find the first buffer with a given name.
    pub fn find(&self, name: &str) -> Option<&Buffer> {
        self.buffers.iter().find(|b| b.name == name)
    }

    /// Find the first buffer with a given name, for modification.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Buffer> {
        self.buffers.iter_mut().find(|b| b.name == name)
    }

    /// Remove the first buffer with a given name.
    pub fn remove(&mut self, name: &str) -> Option<Buffer> {
        let idx = self.buffers.iter().position(|b| b.name == name)?;

        Some(self.buffers.remove(idx))
    }

    /// Get the buffer at a position in the registry.
    pub fn get(&self, idx: usize) -> Option<&Buffer> {
        self.buffers.get(idx)
    }

    /// The position of the first buffer with a given name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.buffers.iter().position(|b| b.name == name)
    }

    /// Iterate over the buffers in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Buffer> {
        self.buffers.iter()
    }

    /// The number of buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Whether there are no buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedLoader(Content);

    impl BufferLoader for FixedLoader {
        fn load(&self, path: &Path) -> Loaded {
            Loaded {
                name: path.display().to_string(),
                path: Path::new("/work").join(path),
                content: self.0.clone(),
            }
        }
    }

    fn buffer(name: &str) -> Buffer {
        Buffer::new(name, format!("/tmp/{}", name), vec![String::new()])
    }

    #[test]
    fn test_add_find_remove() {
        let mut bufs = Buffers::default();
        assert!(bufs.is_empty());

        bufs.add(buffer("a"));
        bufs.add(buffer("b"));
        assert_eq!(bufs.len(), 2);
        assert_eq!(bufs.find("a"), Some(&buffer("a")));
        assert_eq!(bufs.position("b"), Some(1));

        assert_eq!(bufs.remove("a"), Some(buffer("a")));
        assert_eq!(bufs.find("a"), None);
        assert_eq!(bufs.len(), 1);

        assert_eq!(bufs.remove("a"), None);
        assert_eq!(bufs.len(), 1);
    }

    #[test]
    fn test_duplicate_names() {
        let mut bufs = Buffers::default();
        let mut first = buffer("dup");
        first.add_mode("first");

        bufs.add(first);
        bufs.add(buffer("dup"));
        assert_eq!(bufs.len(), 2);
        assert_eq!(bufs.find("dup").unwrap().modes(), &["first".to_string()]);

        bufs.remove("dup");
        assert_eq!(bufs.len(), 1);
        assert!(bufs.find("dup").unwrap().modes().is_empty());
    }

    #[test]
    fn test_iter_order() {
        let mut bufs = Buffers::default();
        bufs.add(buffer("c"));
        bufs.add(buffer("a"));
        bufs.add(buffer("b"));

        let names = bufs.iter().map(Buffer::name).collect::<Vec<_>>();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_open() {
        let mut bufs = Buffers::default();

        let loader = FixedLoader(Content::File(vec!["one".into(), "two".into()]));
        let b = bufs.open(&loader, Path::new("notes.txt"));
        assert_eq!(b.name(), "notes.txt");
        assert_eq!(b.path(), Path::new("/work/notes.txt"));
        assert_eq!(b.lines(), &["one".to_string(), "two".to_string()]);

        let loader = FixedLoader(Content::Directory);
        assert_eq!(bufs.open(&loader, Path::new("src")).lines(), &["dir".to_string()]);

        let loader = FixedLoader(Content::Missing);
        assert_eq!(bufs.open(&loader, Path::new("*scratch*")).lines(), &[String::new()]);

        assert_eq!(bufs.len(), 3);
    }

    #[test]
    fn test_modes() {
        let mut b = buffer("a");
        b.add_mode("lisp");
        b.add_mode("spell");
        b.add_mode("lisp");
        assert_eq!(b.modes(), &["lisp", "spell", "lisp"].map(String::from));

        assert!(b.remove_mode("lisp"));
        assert_eq!(b.modes(), &["spell", "lisp"].map(String::from));
        assert!(!b.remove_mode("rust"));
    }

    #[test]
    fn test_lines() {
        let b = Buffer::new("a", "/a", vec!["héllo".into(), String::new()]);

        assert_eq!(b.len_lines(), 2);
        assert_eq!(b.line_len(0), 5);
        assert_eq!(b.line_len(1), 0);
        assert_eq!(b.line_len(7), 0);
        assert_eq!(b.line(2), None);
    }
}

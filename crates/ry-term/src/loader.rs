//! Loading buffers from the file system.
use std::path::{Path, PathBuf};

use ry::buffer::{BufferLoader, Content, Loaded};

/// Reads buffers from files, and names them by their path relative to the working or home
/// directory.
#[derive(Clone, Debug, Default)]
pub struct FsLoader {
    cwd: Option<PathBuf>,
    home: Option<PathBuf>,
}

impl FsLoader {
    /// Create a loader for the current process's working directory and user.
    pub fn new() -> Self {
        FsLoader::with_dirs(std::env::current_dir().ok(), dirs::home_dir())
    }

    /// Create a loader with specific working and home directories.
    pub fn with_dirs(cwd: Option<PathBuf>, home: Option<PathBuf>) -> Self {
        FsLoader { cwd, home }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.cwd {
            Some(cwd) if path.is_relative() => cwd.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// A short name for a path: relative to the working directory if it's inside of it, or
    /// else with the home directory written as `~`.
    pub fn short_path(&self, path: &Path) -> String {
        if let Some(rel) = self.cwd.as_deref().and_then(|cwd| path.strip_prefix(cwd).ok()) {
            if rel.as_os_str().is_empty() {
                return ".".to_string();
            }

            return rel.display().to_string();
        }

        if let Some(rel) = self.home.as_deref().and_then(|home| path.strip_prefix(home).ok()) {
            return Path::new("~").join(rel).display().to_string();
        }

        return path.display().to_string();
    }
}

impl BufferLoader for FsLoader {
    fn load(&self, path: &Path) -> Loaded {
        let path = self.resolve(path);
        let name = self.short_path(&path);

        let content = if path.is_dir() {
            Content::Directory
        } else {
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    let mut lines: Vec<String> = text.lines().map(String::from).collect();

                    if lines.is_empty() {
                        lines.push(String::new());
                    }

                    Content::File(lines)
                },
                Err(e) => {
                    tracing::debug!(path = %path.display(), err = %e, "unable to read file");
                    Content::Missing
                },
            }
        };

        Loaded { name, path, content }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    fn loader(dir: &TempDir) -> FsLoader {
        FsLoader::with_dirs(Some(dir.path().join("work")), Some(dir.path().to_path_buf()))
    }

    #[test]
    fn test_short_path() {
        let loader = FsLoader::with_dirs(Some("/home/u/src".into()), Some("/home/u".into()));

        assert_eq!(loader.short_path(Path::new("/home/u/src/main.rs")), "main.rs");
        assert_eq!(loader.short_path(Path::new("/home/u/src")), ".");
        assert_eq!(loader.short_path(Path::new("/home/u/notes.txt")), "~/notes.txt");
        assert_eq!(loader.short_path(Path::new("/etc/hosts")), "/etc/hosts");

        let loader = FsLoader::with_dirs(None, None);
        assert_eq!(loader.short_path(Path::new("/etc/hosts")), "/etc/hosts");
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("work")).unwrap();
        std::fs::write(dir.path().join("work/a.txt"), "one\ntwo\n").unwrap();
        std::fs::write(dir.path().join("b.txt"), "").unwrap();

        let loaded = loader(&dir).load(Path::new("a.txt"));
        assert_eq!(loaded.name, "a.txt");
        assert_eq!(loaded.path, dir.path().join("work/a.txt"));
        assert_eq!(loaded.content, Content::File(vec!["one".into(), "two".into()]));

        let loaded = loader(&dir).load(&dir.path().join("b.txt"));
        assert_eq!(loaded.name, "~/b.txt");
        assert_eq!(loaded.content, Content::File(vec![String::new()]));
    }

    #[test]
    fn test_load_dir_and_missing() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("work/src")).unwrap();

        let loaded = loader(&dir).load(Path::new("src"));
        assert_eq!(loaded.name, "src");
        assert_eq!(loaded.content, Content::Directory);

        let loaded = loader(&dir).load(Path::new("nope.txt"));
        assert_eq!(loaded.name, "nope.txt");
        assert_eq!(loaded.content, Content::Missing);
    }
}

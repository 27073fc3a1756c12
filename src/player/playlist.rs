//! Ordered list of converted files with wrapping navigation.

use std::fs;
use std::path::{Path, PathBuf};

use super::PlayerError;

#[derive(Debug, Clone)]
pub struct Playlist {
    items: Vec<PathBuf>,
    index: usize,
}

impl Playlist {
    /// Build a playlist from explicit paths, starting at the first.
    pub fn new(items: Vec<PathBuf>) -> Self {
        Self { items, index: 0 }
    }

    /// Every file in `dir` with `extension` (case-insensitive), sorted by name.
    ///
    /// # Errors
    /// [`PlayerError::Read`] when the directory cannot be listed,
    /// [`PlayerError::NoItems`] when nothing matches.
    pub fn scan(dir: &Path, extension: &str) -> Result<Self, PlayerError> {
        let entries = fs::read_dir(dir).map_err(|source| PlayerError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut items: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_extension(path, extension))
            .collect();
        items.sort();

        if items.is_empty() {
            return Err(PlayerError::NoItems {
                dir: dir.to_path_buf(),
                extension: extension.to_string(),
            });
        }

        log::info!("Found {} item(s) in {}", items.len(), dir.display());
        Ok(Self::new(items))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Path of the current item, if there is one.
    pub fn current(&self) -> Option<&Path> {
        self.items.get(self.index).map(PathBuf::as_path)
    }

    /// Move to the next item, wrapping to the first.
    pub fn next(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
    }

    /// Move to the previous item, wrapping to the last.
    pub fn prev(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + self.items.len() - 1) % self.items.len();
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist(names: &[&str]) -> Playlist {
        Playlist::new(names.iter().map(PathBuf::from).collect())
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let mut list = playlist(&["a.ascii", "b.ascii", "c.ascii"]);
        assert_eq!(list.current(), Some(Path::new("a.ascii")));

        list.prev();
        assert_eq!(list.current(), Some(Path::new("c.ascii")));
        list.next();
        list.next();
        assert_eq!(list.current(), Some(Path::new("b.ascii")));
    }

    #[test]
    fn test_empty_playlist() {
        let mut list = playlist(&[]);
        list.next();
        list.prev();
        assert!(list.is_empty());
        assert_eq!(list.current(), None);
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("x.ascii"), "ascii"));
        assert!(has_extension(Path::new("x.ASCII"), "ascii"));
        assert!(!has_extension(Path::new("x.png"), "ascii"));
        assert!(!has_extension(Path::new("ascii"), "ascii"));
    }
}

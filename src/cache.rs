use crate::{Error, Result};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Titles that have already been handed to the downloader.
///
/// Backed by a newline-delimited file that is only ever appended to. The
/// file is read once on open, and every append is mirrored in memory, so
/// lookups see titles added earlier in the same run.
///
/// Nothing locks the file: two runs sharing one cache can interleave.
#[derive(Debug)]
pub struct SeenSet {
    path: PathBuf,
    titles: HashSet<String>,
}

impl SeenSet {
    /// Loads the cache. The file must already exist; it is never created here.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|e| cache_err(&path, e))?;
        let titles = content.split('\n').map(str::to_string).collect();
        Ok(SeenSet { path, titles })
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.contains(title)
    }

    /// Appends `title` to the file before returning.
    pub fn insert(&mut self, title: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| cache_err(&self.path, e))?;
        writeln!(file, "{}", title).map_err(|e| cache_err(&self.path, e))?;
        self.titles.insert(title.to_string());
        Ok(())
    }
}

fn cache_err(path: &Path, source: std::io::Error) -> Error {
    Error::Cache {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;
    use tempfile::tempdir;

    // Not covered here: two runs sharing one cache file. Nothing locks it, so
    // their appends can interleave and leave duplicate or lost titles.

    #[test]
    fn missing_file_is_not_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rss-link-dl");
        match SeenSet::open(&path) {
            Err(Error::Cache { source, .. }) => assert_eq!(source.kind(), ErrorKind::NotFound),
            other => panic!("expected cache error, got {:?}", other),
        }
        assert!(!path.exists());
    }

    #[test]
    fn exact_line_match() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen");
        fs::write(&path, "Episode 1\nEpisode 2\n").unwrap();

        let seen = SeenSet::open(&path).unwrap();
        assert!(seen.contains("Episode 1"));
        assert!(seen.contains("Episode 2"));
        assert!(!seen.contains("Episode"));
        assert!(!seen.contains("episode 1"));
        assert!(!seen.contains("Episode 1 "));
    }

    #[test]
    fn last_line_without_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen");
        fs::write(&path, "A\nB").unwrap();
        let seen = SeenSet::open(&path).unwrap();
        assert!(seen.contains("B"));
    }

    #[test]
    fn insert_appends_and_is_visible() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen");
        fs::write(&path, "A\n").unwrap();

        let mut seen = SeenSet::open(&path).unwrap();
        seen.insert("B").unwrap();
        assert!(seen.contains("B"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "A\nB\n");

        let reopened = SeenSet::open(&path).unwrap();
        assert!(reopened.contains("A"));
        assert!(reopened.contains("B"));
    }

    #[test]
    fn insert_after_file_removed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seen");
        fs::write(&path, "").unwrap();
        let mut seen = SeenSet::open(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(matches!(seen.insert("A"), Err(Error::Cache { .. })));
        assert!(!seen.contains("A"));
    }
}

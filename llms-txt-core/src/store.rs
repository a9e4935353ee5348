use std::fs;
use std::path::Path;

use crate::contract::ContentStore;

/// [`ContentStore`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl ContentStore for FsStore {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        fs::create_dir_all(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_creates_parent_directories() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("a/b/c.md");
        FsStore.write(&target, "hello").unwrap();
        assert!(FsStore.exists(&target));
        assert_eq!(FsStore.read_to_string(&target).unwrap(), "hello");
    }
}

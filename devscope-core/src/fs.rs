//! Filesystem abstractions used for artifact storage.

use std::path::Path;

use crate::error::Result;

/// Abstraction over filesystem access for testability.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Read a file into a string.
    fn read_to_string(&self, path: &Path) -> Result<String>;
    /// Write a string to a file, replacing any existing contents.
    fn write_string(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Default filesystem implementation backed by `std::fs`.
#[derive(Debug, Default, Clone)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Create a new standard filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(std::fs::write(path, contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::StdFileSystem;
    use crate::fs::FileSystem;
    use std::path::PathBuf;

    #[test]
    fn std_filesystem_writes_and_reads_files() {
        let root = std::env::temp_dir().join(unique_dir_name());
        let file_path = root.join("artifacts").join("profile.json");

        let fs = StdFileSystem::new();
        fs.write_string(&file_path, "{\"hello\":\"devscope\"}")
            .expect("write test file");

        let contents = fs.read_to_string(&file_path).expect("read file");
        assert_eq!(contents, "{\"hello\":\"devscope\"}");

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[test]
    fn read_missing_file_surfaces_io_error() {
        let fs = StdFileSystem::new();
        let missing = std::env::temp_dir().join(unique_dir_name()).join("nope.json");
        assert!(fs.read_to_string(&missing).is_err());
    }

    fn unique_dir_name() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        PathBuf::from(format!("devscope_core_test_{nanos}"))
    }
}

use crate::core::Storage;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Writes documents under a root directory. The root must already exist.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Creates the root directory. Called once by the binaries before a run.
    pub async fn ensure_root(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.base_path).await?;
        Ok(())
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        tokio::fs::write(self.full_path(path), data).await?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        self.full_path(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_file_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        storage.write_file("team.yaml", b"first version, longer").await.unwrap();
        storage.write_file("team.yaml", b"second").await.unwrap();

        let content = std::fs::read(temp_dir.path().join("team.yaml")).unwrap();
        assert_eq!(content, b"second");
    }

    #[tokio::test]
    async fn test_write_file_without_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("missing"));

        assert!(storage.write_file("team.yaml", b"x").await.is_err());

        storage.ensure_root().await.unwrap();
        assert!(storage.write_file("team.yaml", b"x").await.is_ok());
        assert!(storage.location("team.yaml").ends_with("team.yaml"));
    }
}

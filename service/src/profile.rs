use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;

use common::util::random::generate_30_alphanumeric;

/// A throwaway Chromium user data directory, one per launched browser.
///
/// Chromium refuses to share a profile between running instances, so
/// concurrent renders each need their own.
#[derive(Debug, Clone)]
pub struct TempProfileDir {
    directory: PathBuf,
}

impl TempProfileDir {
    pub async fn build(root: &Path) -> Result<TempProfileDir, &'static str> {
        let directory = root.join(format!("html2pdf-{}", generate_30_alphanumeric()));
        fs::create_dir_all(&directory).await.map_err(|_| "Could not create browser profile directory.")?;
        Ok(TempProfileDir { directory })
    }

    pub fn path(&self) -> &Path {
        &self.directory
    }

    pub async fn clean_up(&self) {
        if let Err(err) = fs::remove_dir_all(&self.directory).await {
            warn!("Error occured, while deleting browser profile {}: {}", self.directory.display(), &err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn profile_dirs_are_unique_and_removed() {
        let root = std::env::temp_dir();
        let first = TempProfileDir::build(&root).await.unwrap();
        let second = TempProfileDir::build(&root).await.unwrap();
        assert_ne!(first.path(), second.path());
        assert!(first.path().is_dir());

        first.clean_up().await;
        second.clean_up().await;
        assert!(!first.path().exists());
        assert!(!second.path().exists());
    }
}

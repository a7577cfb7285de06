use crate::Result;
use std::path::Path;
use tempfile::TempDir;

/// Throwaway Chrome user-data directory, removed when dropped
pub struct SessionProfile {
    dir: TempDir,
}

impl SessionProfile {
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("pagelens-profile-").tempdir()?;
        tracing::debug!("Created session profile at {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_removed_on_drop() {
        let profile = SessionProfile::temporary().unwrap();
        let path = profile.path().to_path_buf();

        assert!(path.is_dir());
        assert!(
            path.file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with("pagelens-profile-")
        );

        std::fs::write(path.join("Local State"), "{}").unwrap();
        drop(profile);

        assert!(!path.exists());
    }
}

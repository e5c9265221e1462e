//! Scratch storage for per-line audio clips.

use super::AudioClip;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::debug;

/// A per-run directory holding synthesized clips until they are assembled.
///
/// [`ScratchDir::remove`] deletes the clips and the directory and reports
/// I/O failures. If the handle is dropped instead (an earlier step failed),
/// the directory is removed on a best-effort basis.
pub struct ScratchDir {
    dir: TempDir,
    clips: Vec<PathBuf>,
}

impl ScratchDir {
    /// Create a fresh scratch directory under `base`.
    pub fn create_in(base: &Path) -> Result<Self> {
        std::fs::create_dir_all(base)?;
        let dir = tempfile::Builder::new().prefix("run-").tempdir_in(base)?;
        debug!("Created scratch directory {}", dir.path().display());

        Ok(Self {
            dir,
            clips: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// File name for a clip, keyed by speaker and dialogue position.
    pub fn clip_path(&self, speaker: &str, index: usize) -> PathBuf {
        self.dir.path().join(format!("{}_{}.mp3", speaker, index))
    }

    /// Persist one synthesized clip.
    pub async fn write_clip(&mut self, index: usize, speaker: &str, audio: &[u8]) -> Result<AudioClip> {
        let path = self.clip_path(speaker, index);
        tokio::fs::write(&path, audio).await?;
        self.clips.push(path.clone());

        Ok(AudioClip {
            index,
            speaker: speaker.to_string(),
            path,
        })
    }

    /// Delete every clip and then the directory itself.
    pub fn remove(self) -> Result<()> {
        for clip in &self.clips {
            std::fs::remove_file(clip)?;
        }
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        debug!("Removed scratch directory {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_clip_naming() {
        let base = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create_in(base.path()).unwrap();

        let clip = scratch.write_clip(3, "HOST2", b"abc").await.unwrap();
        assert_eq!(clip.path.file_name().unwrap(), "HOST2_3.mp3");
        assert_eq!(std::fs::read(&clip.path).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_remove_deletes_clips_and_directory() {
        let base = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create_in(&base.path().join("nested")).unwrap();
        let dir = scratch.path().to_path_buf();

        let a = scratch.write_clip(0, "HOST1", b"a").await.unwrap();
        let b = scratch.write_clip(1, "HOST2", b"b").await.unwrap();
        std::fs::write(dir.join("combined.mp3"), b"ab").unwrap();

        scratch.remove().unwrap();
        assert!(!a.path.exists());
        assert!(!b.path.exists());
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn test_remove_reports_missing_clip() {
        let base = tempfile::tempdir().unwrap();
        let mut scratch = ScratchDir::create_in(base.path()).unwrap();
        let clip = scratch.write_clip(0, "HOST1", b"a").await.unwrap();
        std::fs::remove_file(&clip.path).unwrap();

        assert!(scratch.remove().is_err());
    }
}

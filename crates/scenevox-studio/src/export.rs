//! WAV export

use crate::error::{StudioError, StudioResult};
use scenevox_speech::WavFile;
use std::path::{Path, PathBuf};

/// Write `wav` to `dir/file_name`, creating `dir` if needed.
pub async fn write_wav(dir: &Path, file_name: &str, wav: &WavFile) -> StudioResult<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| StudioError::io(dir, e))?;

    let path = dir.join(file_name);
    tokio::fs::write(&path, wav.bytes())
        .await
        .map_err(|e| StudioError::io(&path, e))?;

    log::info!("Saved {} ({} bytes)", path.display(), wav.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenevox_speech::codec::build_wav_file;

    #[tokio::test]
    async fn test_write_wav_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let wav = build_wav_file(&[1, 0, 2, 0], 24000);

        let path = write_wav(&target, "C3.wav", &wav).await.unwrap();

        assert_eq!(path, target.join("C3.wav"));
        assert_eq!(std::fs::read(&path).unwrap(), wav.bytes());

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 24000);
        assert_eq!(reader.len(), 2);
    }

    #[tokio::test]
    async fn test_write_wav_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the directory should be.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"x").unwrap();

        let err = write_wav(&blocker, "1.wav", &build_wav_file(&[], 24000))
            .await
            .unwrap_err();
        match err {
            StudioError::Io { path, .. } => assert_eq!(path, blocker),
            other => panic!("Expected StudioError::Io, got {other:?}"),
        }
    }
}

use crate::api::ImageGeneration;
use crate::error::Result;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default directory frames are written to.
pub const DEFAULT_FRAMES_DIR: &str = "frames";
/// Default resolution requested from the image backend.
pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

const FRAME_PREFIX: &str = "frame_";
const FRAME_EXTENSION: &str = "png";

/// Directory holding one numbered image file per frame.
///
/// The directory is created lazily on first write and never cleared, so
/// reruns overwrite frames that land on the same index.
#[derive(Debug, Clone)]
pub struct FrameStore {
    dir: PathBuf,
}

impl FrameStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn ensure_dir(&self) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Count files already following the frame naming pattern.
    async fn existing_frame_count(&self) -> Result<usize> {
        let mut count = 0;
        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            if let Some(name) = name.to_str() {
                if name.starts_with(FRAME_PREFIX) && name.ends_with(FRAME_EXTENSION) {
                    count += 1;
                }
            }
        }
        Ok(count)
    }

    /// Determine the path of the next frame file, optionally using a
    /// provided 1-based index.
    ///
    /// Without an explicit index the position falls back to appending after
    /// whatever is already on disk, which is only safe for a single writer.
    async fn next_frame_path(&self, index: Option<usize>) -> Result<PathBuf> {
        self.ensure_dir().await?;
        let number = match index {
            Some(index) if index > 0 => index,
            _ => self.existing_frame_count().await? + 1,
        };
        let filename = format!("{}{:03}.{}", FRAME_PREFIX, number, FRAME_EXTENSION);
        Ok(self.dir.join(filename))
    }
}

/// Generate an image for the scene and save it to the frame store.
///
/// Returns the raw image bytes that were written to disk. The base64
/// payload is decoded in full before anything touches the filesystem, so a
/// malformed payload leaves no partial frame behind.
pub async fn render_frame(
    scene_text: &str,
    index: Option<usize>,
    size: &str,
    client: &impl ImageGeneration,
    store: &FrameStore,
) -> Result<Vec<u8>> {
    let frame_path = store.next_frame_path(index).await?;

    let b64_data = client.generate_image(scene_text, size).await?;
    let image_bytes = STANDARD.decode(b64_data.as_bytes())?;

    tokio::fs::write(&frame_path, &image_bytes).await?;
    info!("Frame saved to: {}", frame_path.display());

    Ok(image_bytes)
}

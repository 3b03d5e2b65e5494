/// Selected image: loading and validation
///
/// A file is accepted when its declared type is an image type and it is no
/// larger than `MAX_IMAGE_BYTES`. The size is checked from file metadata
/// before any bytes are read, and again against the bytes actually read.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use image::ImageFormat;

use crate::error::SelectionError;

/// Upload limit (10 MiB)
pub const MAX_IMAGE_BYTES: u64 = 10 * 1024 * 1024;

/// Extensions offered by the file dialog filter
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp", "tif", "tiff"];

/// An accepted image, held in memory until it is uploaded or discarded
#[derive(Clone, PartialEq)]
pub struct SelectedImage {
    /// File name only (e.g., "cathedral.jpg")
    pub name: String,
    pub size_bytes: u64,
    /// Declared MIME type (e.g., "image/jpeg")
    pub mime_type: String,
    /// Raw file contents
    pub bytes: Arc<[u8]>,
}

impl SelectedImage {
    /// Size in MiB with two decimals, as shown under the preview
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size_bytes as f64 / 1024.0 / 1024.0)
    }
}

// Keep the byte buffer out of log output
impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("name", &self.name)
            .field("size_bytes", &self.size_bytes)
            .field("mime_type", &self.mime_type)
            .finish()
    }
}

/// Metadata known about a candidate file before it is accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size_bytes: u64,
    /// None when the type could not be determined
    pub mime_type: Option<String>,
}

/// Accept or reject a candidate file
pub fn validate(info: &FileInfo) -> Result<(), SelectionError> {
    let is_image = info
        .mime_type
        .as_deref()
        .is_some_and(|mime| mime.starts_with("image/"));

    if !is_image {
        return Err(SelectionError::NotAnImage);
    }

    if info.size_bytes > MAX_IMAGE_BYTES {
        return Err(SelectionError::TooLarge);
    }

    Ok(())
}

/// Declared MIME type from the file extension
pub fn mime_from_path(path: &Path) -> Option<String> {
    ImageFormat::from_path(path)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// MIME type sniffed from the file contents
fn mime_from_bytes(bytes: &[u8]) -> Option<String> {
    image::guess_format(bytes)
        .ok()
        .map(|format| format.to_mime_type().to_string())
}

/// Load a candidate file from disk and validate it
///
/// Runs on the iced tokio executor. Extension-less files are typed by
/// sniffing their contents once the size check has passed.
pub async fn load_image(path: PathBuf) -> Result<SelectedImage, SelectionError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| SelectionError::Unreadable(e.to_string()))?;

    if !metadata.is_file() {
        return Err(SelectionError::Unreadable(format!(
            "{} is not a file",
            path.display()
        )));
    }

    let name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let mut info = FileInfo {
        name,
        size_bytes: metadata.len(),
        mime_type: mime_from_path(&path),
    };

    // Size first: an oversize file is never read into memory
    if info.size_bytes > MAX_IMAGE_BYTES {
        return Err(SelectionError::TooLarge);
    }

    let declared_by_extension = info.mime_type.is_some();
    if declared_by_extension {
        validate(&info)?;
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| SelectionError::Unreadable(e.to_string()))?;

    if !declared_by_extension {
        info.mime_type = mime_from_bytes(&bytes);
    }
    accept(info, bytes)
}

/// Final check against the bytes actually read; the file may have changed
/// since its metadata was taken
fn accept(mut info: FileInfo, bytes: Vec<u8>) -> Result<SelectedImage, SelectionError> {
    info.size_bytes = bytes.len() as u64;
    validate(&info)?;

    log::debug!(
        "Loaded {} ({} bytes, {:?})",
        info.name,
        info.size_bytes,
        info.mime_type
    );

    Ok(SelectedImage {
        name: info.name,
        size_bytes: info.size_bytes,
        mime_type: info.mime_type.unwrap_or_default(),
        bytes: Arc::from(bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn info(mime: Option<&str>, size_bytes: u64) -> FileInfo {
        FileInfo {
            name: "photo".to_string(),
            size_bytes,
            mime_type: mime.map(str::to_string),
        }
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::RgbImage::new(4, 4);
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_accepts_image_at_limit() {
        assert_eq!(validate(&info(Some("image/jpeg"), MAX_IMAGE_BYTES)), Ok(()));
        assert_eq!(MAX_IMAGE_BYTES, 10_485_760);
    }

    #[test]
    fn test_rejects_oversize() {
        assert_eq!(
            validate(&info(Some("image/png"), MAX_IMAGE_BYTES + 1)),
            Err(SelectionError::TooLarge)
        );
    }

    #[test]
    fn test_rejects_non_image() {
        assert_eq!(
            validate(&info(Some("application/pdf"), 100)),
            Err(SelectionError::NotAnImage)
        );
        assert_eq!(validate(&info(None, 100)), Err(SelectionError::NotAnImage));
    }

    #[test]
    fn test_accept_checks_size_of_read_bytes() {
        // Metadata said small, but the file grew before it was read
        let stale = info(Some("image/png"), 10);
        let bytes = vec![0u8; MAX_IMAGE_BYTES as usize + 1];
        assert_eq!(accept(stale, bytes), Err(SelectionError::TooLarge));

        let stale = info(Some("image/png"), MAX_IMAGE_BYTES);
        let image = accept(stale, vec![0u8; 16]).unwrap();
        assert_eq!(image.size_bytes, 16);
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_path(Path::new("a.JPG")).as_deref(), Some("image/jpeg"));
        assert_eq!(mime_from_path(Path::new("b.png")).as_deref(), Some("image/png"));
        assert_eq!(mime_from_path(Path::new("notes.txt")), None);
    }

    #[test]
    fn test_size_label_two_decimals() {
        let image = SelectedImage {
            name: "a.jpg".to_string(),
            size_bytes: 1_572_864,
            mime_type: "image/jpeg".to_string(),
            bytes: Arc::from(Vec::new()),
        };
        assert_eq!(image.size_label(), "1.50 MB");
    }

    #[tokio::test]
    async fn test_load_png_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("facade.png");
        let png = tiny_png();
        std::fs::write(&path, &png).unwrap();

        let image = load_image(path).await.unwrap();
        assert_eq!(image.name, "facade.png");
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.size_bytes, png.len() as u64);
        assert_eq!(&*image.bytes, png.as_slice());
    }

    #[tokio::test]
    async fn test_load_sniffs_extensionless_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("facade");
        std::fs::write(&path, tiny_png()).unwrap();

        let image = load_image(path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_load_rejects_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"not an image").unwrap();

        assert_eq!(load_image(path).await, Err(SelectionError::NotAnImage));
    }

    #[tokio::test]
    async fn test_load_rejects_oversize_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("huge.jpg");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_IMAGE_BYTES + 1).unwrap();

        assert_eq!(load_image(path).await, Err(SelectionError::TooLarge));
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let result = load_image(PathBuf::from("/nonexistent/path.jpg")).await;
        assert!(matches!(result, Err(SelectionError::Unreadable(_))));
    }
}

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use inspira_core::ImageAttachment;

pub(crate) fn read_image(path: &Path) -> Result<ImageAttachment> {
    let data = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        anyhow::bail!("{} does not look like an image ({mime})", path.display());
    }
    Ok(ImageAttachment::new(mime.essence_str(), data))
}

pub(crate) fn read_images(paths: &[PathBuf]) -> Result<Vec<ImageAttachment>> {
    paths.iter().map(|p| read_image(p)).collect()
}

/// Write `images` into `dir` as `{stem}-{n}.{ext}` and return the paths.
pub(crate) fn save_images(dir: &Path, stem: &str, images: &[ImageAttachment]) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let mut written = Vec::with_capacity(images.len());
    for (n, image) in images.iter().enumerate() {
        let path = dir.join(format!("{stem}-{}.{}", n + 1, image.extension()));
        std::fs::write(&path, &image.data)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_image_guesses_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = read_image(&path).unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data.len(), 4);
    }

    #[test]
    fn read_image_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        assert!(read_image(&path).is_err());
    }

    #[test]
    fn save_images_numbers_files() {
        let dir = tempfile::tempdir().unwrap();
        let images = vec![
            ImageAttachment::new("image/png", vec![1]),
            ImageAttachment::new("image/jpeg", vec![2]),
        ];

        let paths = save_images(dir.path(), "reply", &images).unwrap();
        assert_eq!(paths[0].file_name().unwrap(), "reply-1.png");
        assert_eq!(paths[1].file_name().unwrap(), "reply-2.jpg");
        assert_eq!(std::fs::read(&paths[1]).unwrap(), vec![2]);
    }
}

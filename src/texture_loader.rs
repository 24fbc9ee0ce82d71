use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("failed to upload texture for {path}: {message}")]
    Upload { path: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fix {
    RotateCw,
    RotateCcw,
    FlipHorizontal,
    FlipVertical,
}

// EXIF orientation tag -> operations that bring the pixels upright
fn orientation_fixes(orientation: u16) -> &'static [Fix] {
    match orientation {
        2 => &[Fix::FlipHorizontal],
        3 => &[Fix::RotateCw, Fix::RotateCw],
        4 => &[Fix::FlipVertical],
        5 => &[Fix::RotateCw, Fix::FlipHorizontal], // transpose
        6 => &[Fix::RotateCw],
        7 => &[Fix::RotateCcw, Fix::FlipHorizontal], // transverse
        8 => &[Fix::RotateCcw],
        _ => &[],
    }
}

fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            // Not fatal: the image is shown as stored
            warn!(path = %image_path.display(), error = %e, "could not read EXIF data");
            1
        }
    }
}

/// Loads an image, applies its EXIF orientation and uploads it to the GPU.
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, TextureError> {
    let file_bytes = fs::read(image_path).map_err(|source| TextureError::Read {
        path: image_path.to_path_buf(),
        source,
    })?;

    let extension = image_path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    // EXIF is only reliable in JPEG containers
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes).map_err(|e| {
        TextureError::Decode {
            path: image_path.to_path_buf(),
            message: e.to_string(),
        }
    })?;

    for fix in orientation_fixes(orientation) {
        match fix {
            Fix::RotateCw => image.rotate_cw(),
            Fix::RotateCcw => image.rotate_ccw(),
            Fix::FlipHorizontal => image.flip_horizontal(),
            Fix::FlipVertical => image.flip_vertical(),
        }
    }
    if orientation != 1 {
        debug!(path = %image_path.display(), orientation, "applied EXIF orientation");
    }

    rl.load_texture_from_image(thread, &image).map_err(|e| TextureError::Upload {
        path: image_path.to_path_buf(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_images_need_no_fix() {
        assert!(orientation_fixes(1).is_empty());
        assert!(orientation_fixes(0).is_empty());
        assert!(orientation_fixes(42).is_empty());
    }

    #[test]
    fn rotated_orientations_map_to_turns() {
        assert_eq!(orientation_fixes(3), [Fix::RotateCw, Fix::RotateCw]);
        assert_eq!(orientation_fixes(6), [Fix::RotateCw]);
        assert_eq!(orientation_fixes(8), [Fix::RotateCcw]);
    }

    #[test]
    fn mirrored_orientations_include_a_flip() {
        for orientation in [2, 4, 5, 7] {
            let fixes = orientation_fixes(orientation);
            assert!(fixes.iter().any(|fix| matches!(fix, Fix::FlipHorizontal | Fix::FlipVertical)));
        }
    }
}

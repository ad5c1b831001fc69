use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use exif::{In, Reader, Tag, Value};
use image::DynamicImage;

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::{CompositeError, CompositeResult};

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let entry = entry.context("Failed to read directory entry")?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("No image files found in directory: {}", dir_path.display());
    }
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

// --- Load Image, Apply EXIF Rotation ---
pub fn load_image_with_exif_rotation(image_path: &Path) -> CompositeResult<DynamicImage> {
    let file_bytes = fs::read(image_path).map_err(|source| CompositeError::Read {
        path: image_path.to_path_buf(),
        source,
    })?;

    let orientation = read_orientation(image_path, &file_bytes);

    let image = image::load_from_memory(&file_bytes).map_err(|source| CompositeError::Decode {
        path: image_path.to_path_buf(),
        source,
    })?;

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips and are left alone.
    let image = match orientation {
        3 => image.rotate180(),
        6 => image.rotate90(),
        8 => image.rotate270(),
        _ => image,
    };
    Ok(image)
}

/// EXIF orientation tag, only looked up for JPEG files. Defaults to 1.
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    let extension = image_path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_lowercase();
    if extension != "jpg" && extension != "jpeg" {
        return 1;
    }

    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        log::debug!("{} EXIF orientation: {}", image_path.display(), orientation);
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            log::warn!("Could not read EXIF data for {}: {}", image_path.display(), e);
            1
        }
    }
}

use std::collections::HashSet;
use std::path::PathBuf;
use rand::Rng;
use rand::seq::IndexedRandom;

/// One frame and one photo, chosen together for a single cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePair {
    pub frame: PathBuf,
    pub photo: PathBuf,
}

/// Picks an unused photo and any frame, both uniformly at random.
///
/// Returns `None` once every photo in the catalog is in `used`. The caller
/// records the photo as used only after the composite was displayed.
pub fn pick<R: Rng + ?Sized>(
    photos: &[PathBuf],
    frames: &[PathBuf],
    used: &HashSet<PathBuf>,
    rng: &mut R,
) -> Option<ImagePair> {
    let candidates: Vec<&PathBuf> = photos.iter().filter(|p| !used.contains(*p)).collect();

    let photo = candidates.choose(rng)?;
    let frame = frames.choose(rng)?;

    Some(ImagePair {
        frame: frame.clone(),
        photo: (*photo).clone(),
    })
}

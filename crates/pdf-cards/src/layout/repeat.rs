//! Card repetition and back alignment
//!
//! Fronts are multiplied by their repeat counts; backs are then stretched
//! to the expanded front length so every printed front has a back.

use crate::counts::RepeatCounts;
use std::path::Path;

/// Expand a sorted list of front images by their repeat counts.
///
/// Each image appears `counts.count_for(image)` times in a row, looked up
/// by base filename, case-insensitively. Images missing from the map, or
/// every image when `counts` is `None`, appear once.
pub fn expand<P>(images: &[P], counts: Option<&RepeatCounts>) -> Vec<P>
where
    P: AsRef<Path> + Clone,
{
    let Some(counts) = counts else {
        return images.to_vec();
    };

    let mut expanded = Vec::with_capacity(images.len());
    for image in images {
        let copies = counts.count_for(image.as_ref());
        expanded.extend(std::iter::repeat_n(image, copies).cloned());
    }
    expanded
}

/// Pad `backs` with its last element until it is as long as `fronts`.
///
/// An empty `backs` means single-sided output and is returned unchanged.
/// Nothing is ever truncated.
pub fn align_backs<F, T: Clone>(fronts: &[F], mut backs: Vec<T>) -> Vec<T> {
    if let Some(last) = backs.last().cloned() {
        if fronts.len() > backs.len() {
            backs.resize(fronts.len(), last);
        }
    }
    backs
}

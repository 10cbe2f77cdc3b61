use crate::contour::{build_contour_paths_with_progress, trace_contours};
use crate::mask::Mask;
use crate::primitive::VectorPrimitive;
use crate::progress::{ProgressObserver, Stage};

use super::MaskVectorizer;

/// Raw outlines: one closed path per outer contour, points exactly as traced.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContourVectorizer;

impl MaskVectorizer for ContourVectorizer {
    fn vectorize(&self, mask: &Mask, progress: &mut dyn ProgressObserver) -> Vec<VectorPrimitive> {
        let contours = trace_contours(mask);
        progress.on_progress(Stage::Tracing, contours.len(), contours.len());

        build_contour_paths_with_progress(&contours, progress)
            .into_iter()
            .map(VectorPrimitive::Path)
            .collect()
    }
}

use crate::config::PolygonOptions;
use crate::contour::trace_gray_contours;
use crate::mask::{Mask, blur_mask};
use crate::primitive::VectorPrimitive;
use crate::progress::{ProgressObserver, Stage};
use crate::simplify::simplify_contours_with_progress;

use super::MaskVectorizer;

/// Simplified outlines: blur, trace, decimate, merge.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolygonVectorizer {
    options: PolygonOptions,
}

impl PolygonVectorizer {
    pub fn new(options: PolygonOptions) -> Self {
        Self { options }
    }
}

impl MaskVectorizer for PolygonVectorizer {
    fn vectorize(&self, mask: &Mask, progress: &mut dyn ProgressObserver) -> Vec<VectorPrimitive> {
        let blurred = blur_mask(mask, self.options.blur_kernel_size);
        let contours = trace_gray_contours(&blurred);
        progress.on_progress(Stage::Tracing, contours.len(), contours.len());

        simplify_contours_with_progress(&contours, &self.options, progress)
            .into_iter()
            .map(VectorPrimitive::Path)
            .collect()
    }
}

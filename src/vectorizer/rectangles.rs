use crate::mask::Mask;
use crate::primitive::VectorPrimitive;
use crate::progress::ProgressObserver;
use crate::tiling::tile_with_progress;

use super::MaskVectorizer;

/// Exact pixel tiling: every foreground pixel ends up in exactly one rectangle.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleVectorizer;

impl MaskVectorizer for RectangleVectorizer {
    fn vectorize(&self, mask: &Mask, progress: &mut dyn ProgressObserver) -> Vec<VectorPrimitive> {
        tile_with_progress(mask, progress)
            .into_iter()
            .map(VectorPrimitive::Rectangle)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Rectangle;
    use crate::progress::NoProgress;

    #[test]
    fn preserves_tiling_order() {
        let mask = Mask::from_rows(&["#.#", "###"]);
        let primitives = RectangleVectorizer.vectorize(&mask, &mut NoProgress);
        let rects: Vec<Rectangle> = primitives
            .iter()
            .filter_map(VectorPrimitive::as_rectangle)
            .copied()
            .collect();
        assert_eq!(
            rects,
            vec![
                Rectangle::new(0, 0, 1, 2),
                Rectangle::new(2, 0, 1, 2),
                Rectangle::new(1, 1, 1, 1),
            ]
        );
    }
}

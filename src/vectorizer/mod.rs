use tracing::info;

use crate::config::PolygonOptions;
use crate::mask::Mask;
use crate::primitive::VectorPrimitive;
use crate::progress::{NoProgress, ProgressObserver};

pub mod contours;
pub mod polygons;
pub mod rectangles;

pub use contours::ContourVectorizer;
pub use polygons::PolygonVectorizer;
pub use rectangles::RectangleVectorizer;

/// An algorithm that turns a mask into an ordered list of vector primitives.
pub trait MaskVectorizer {
    fn vectorize(&self, mask: &Mask, progress: &mut dyn ProgressObserver) -> Vec<VectorPrimitive>;
}

/// The conversion strategy; exactly one runs per conversion.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Strategy {
    /// Exact tiling of the foreground with rectangles.
    #[default]
    Rectangles,
    /// One raw outline per outer contour.
    Contours,
    /// Blurred, decimated and merged outlines.
    Polygons(PolygonOptions),
}

impl Strategy {
    /// Human-readable name used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Rectangles => "PIXEL RECTANGLES",
            Strategy::Contours => "CONTOUR PATHS",
            Strategy::Polygons(_) => "SMART POLYGONS",
        }
    }

    /// What a single emitted primitive is called, e.g. in "Created 12 SVG rectangles".
    pub fn primitive_name(&self) -> &'static str {
        match self {
            Strategy::Rectangles => "SVG rectangles",
            Strategy::Contours => "SVG paths",
            Strategy::Polygons(_) => "smart polygons",
        }
    }
}

impl MaskVectorizer for Strategy {
    fn vectorize(&self, mask: &Mask, progress: &mut dyn ProgressObserver) -> Vec<VectorPrimitive> {
        let primitives = match self {
            Strategy::Rectangles => RectangleVectorizer.vectorize(mask, progress),
            Strategy::Contours => ContourVectorizer.vectorize(mask, progress),
            Strategy::Polygons(options) => PolygonVectorizer::new(*options).vectorize(mask, progress),
        };
        info!(
            strategy = self.label(),
            width = mask.width(),
            height = mask.height(),
            primitives = primitives.len(),
            "converted mask"
        );
        primitives
    }
}

/// Convert `mask` with the selected strategy.
pub fn convert(mask: &Mask, strategy: &Strategy) -> Vec<VectorPrimitive> {
    strategy.vectorize(mask, &mut NoProgress)
}

/// [`convert`] with progress checkpoints.
pub fn convert_with_progress(
    mask: &Mask,
    strategy: &Strategy,
    progress: &mut dyn ProgressObserver,
) -> Vec<VectorPrimitive> {
    strategy.vectorize(mask, progress)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::Rectangle;
    use crate::progress::Stage;
    use crate::progress::tests::Recorder;

    fn blob_mask() -> Mask {
        let mut rows = vec!["............................"; 4];
        rows.extend(vec!["....####################...."; 20]);
        rows.extend(vec!["............................"; 4]);
        Mask::from_rows(&rows)
    }

    mod convert {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn default_strategy_is_rectangles() {
                assert_eq!(Strategy::default(), Strategy::Rectangles);
            }

            #[test]
            fn rectangles_produce_only_rectangles() {
                let primitives = convert(&blob_mask(), &Strategy::Rectangles);
                assert_eq!(
                    primitives,
                    vec![VectorPrimitive::Rectangle(Rectangle::new(4, 4, 20, 20))]
                );
            }

            #[test]
            fn contours_produce_only_paths() {
                let primitives = convert(&blob_mask(), &Strategy::Contours);
                assert_eq!(primitives.len(), 1);
                assert!(primitives.iter().all(|p| p.as_path().is_some()));
            }

            #[test]
            fn polygons_produce_only_paths() {
                let mask = Mask::from_fn(40, 40, |x, y| {
                    let (dx, dy) = (x as f64 - 20.0, y as f64 - 20.0);
                    dx * dx + dy * dy <= 144.0
                });
                let primitives = convert(&mask, &Strategy::Polygons(PolygonOptions::default()));
                assert_eq!(primitives.len(), 1);
                assert!(primitives.iter().all(|p| p.as_path().is_some()));
            }

            #[test]
            fn empty_mask_converts_to_nothing_for_every_strategy() {
                let mask = Mask::new(10, 10);
                for strategy in [
                    Strategy::Rectangles,
                    Strategy::Contours,
                    Strategy::Polygons(PolygonOptions::default()),
                ] {
                    assert!(convert(&mask, &strategy).is_empty(), "{strategy:?}");
                }
            }

            #[test]
            fn rectangles_report_scan_progress() {
                let mut recorder = Recorder::default();
                convert_with_progress(&blob_mask(), &Strategy::Rectangles, &mut recorder);
                assert!(recorder.events.iter().all(|e| e.0 == Stage::Scanning));
                assert_eq!(recorder.events.last(), Some(&(Stage::Scanning, 28, 28)));
            }

            #[test]
            fn contour_strategies_report_tracing_then_paths() {
                let mut recorder = Recorder::default();
                convert_with_progress(&blob_mask(), &Strategy::Contours, &mut recorder);
                assert_eq!(recorder.events.first(), Some(&(Stage::Tracing, 1, 1)));
                assert_eq!(recorder.events.last(), Some(&(Stage::Building, 1, 1)));
            }

            #[test]
            fn polygons_report_tracing_then_simplifying() {
                let mut recorder = Recorder::default();
                let strategy = Strategy::Polygons(PolygonOptions::default());
                convert_with_progress(&blob_mask(), &strategy, &mut recorder);
                assert_eq!(recorder.events.first(), Some(&(Stage::Tracing, 1, 1)));
                assert_eq!(recorder.events.last(), Some(&(Stage::Simplifying, 1, 1)));
            }

            #[test]
            fn labels_are_distinct() {
                let labels = [
                    Strategy::Rectangles.label(),
                    Strategy::Contours.label(),
                    Strategy::Polygons(PolygonOptions::default()).label(),
                ];
                assert_ne!(labels[0], labels[1]);
                assert_ne!(labels[1], labels[2]);
            }
        }
    }
}

/// Coarse phase of a conversion, reported to a [`ProgressObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Row scan of the rectangle tiler; units are rows.
    Scanning,
    /// Contour tracing of the mask; reported once with the contour count.
    Tracing,
    /// Per-contour path building of raw outlines; units are contours.
    Building,
    /// Per-contour decimation and merging; units are contours.
    Simplifying,
}

impl Stage {
    pub fn label(self) -> &'static str {
        match self {
            Stage::Scanning => "Analyzing pixels",
            Stage::Tracing => "Finding contours",
            Stage::Building => "Building paths",
            Stage::Simplifying => "Simplifying polygons",
        }
    }
}

/// Receives checkpoints from the conversion loops.
///
/// Called between scan steps only, never from inside the pixel probes.
pub trait ProgressObserver {
    fn on_progress(&mut self, stage: Stage, completed: usize, total: usize);
}

/// Observer that ignores every checkpoint.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _stage: Stage, _completed: usize, _total: usize) {}
}

/// Reports every 1/20th of `total` plus the final step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Milestones {
    stage: Stage,
    total: usize,
    step: usize,
}

impl Milestones {
    pub(crate) fn new(stage: Stage, total: usize) -> Self {
        Self {
            stage,
            total,
            step: (total / 20).max(1),
        }
    }

    pub(crate) fn reach(&self, completed: usize, observer: &mut dyn ProgressObserver) {
        if completed % self.step == 0 || completed == self.total {
            observer.on_progress(self.stage, completed, self.total);
        }
    }
}

use indicatif::{ProgressBar, ProgressStyle};
use pixvec::{ProgressObserver, Stage};

/// Renders conversion checkpoints on a terminal progress bar.
pub struct BarProgress {
    bar: ProgressBar,
    stage: Option<Stage>,
}

impl BarProgress {
    pub fn new(quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(0)
        };
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{msg:>18} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Self { bar, stage: None }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&mut self, stage: Stage, completed: usize, total: usize) {
        if self.stage != Some(stage) {
            self.stage = Some(stage);
            self.bar.set_message(stage.label());
            self.bar.set_length(total as u64);
        }
        self.bar.set_position(completed as u64);
    }
}

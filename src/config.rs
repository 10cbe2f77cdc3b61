use crate::{PixvecError, PixvecResult};

/// Scale value at which the raster keeps its decoded size.
pub const NEUTRAL_SCALE: u32 = 5;

/// Options controlling how the decoded raster becomes a [`Mask`](crate::Mask)
/// and how large the resulting document is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterSettings {
    /// Pixels brighter than this value (after optional inversion) are foreground.
    pub threshold: u8,
    /// Resize factor in fifths: 5 keeps the size, 10 doubles it, 1 shrinks to a fifth.
    pub scale: u32,
    /// Invert the grayscale raster before thresholding, so dark pixels become foreground.
    pub negative: bool,
    /// Output document size as a percentage of the mask size.
    pub resolution: u32,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            threshold: 128,
            scale: NEUTRAL_SCALE,
            negative: true,
            resolution: 100,
        }
    }
}

impl RasterSettings {
    /// Set the binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the resize factor (in fifths).
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Enable or disable inversion before thresholding.
    pub fn with_negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Set the output resolution percentage.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self
    }

    /// Check every field against its documented range.
    pub fn validate(&self) -> PixvecResult<()> {
        if self.threshold == 0 {
            return Err(invalid("threshold", self.threshold, "a value in 1-255"));
        }
        if !(1..=10).contains(&self.scale) {
            return Err(invalid("scale", self.scale, "a value in 1-10"));
        }
        if !(100..=1000).contains(&self.resolution) || self.resolution % 100 != 0 {
            return Err(invalid(
                "resolution",
                self.resolution,
                "a multiple of 100 in 100-1000",
            ));
        }
        Ok(())
    }

    /// Target dimensions after applying the scale factor, or `None` when no resize is needed.
    pub fn scaled_dimensions(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        if self.scale == NEUTRAL_SCALE {
            return None;
        }
        // floor(dim * scale / 5)
        let scale_dim = |dim: u32| {
            let scaled = u64::from(dim) * u64::from(self.scale) / u64::from(NEUTRAL_SCALE);
            (scaled as u32).max(1)
        };
        Some((scale_dim(width), scale_dim(height)))
    }
}

/// Largest accepted blur kernel side.
pub const MAX_BLUR_KERNEL_SIZE: usize = 15;

/// Options for the simplified-polygon strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonOptions {
    /// Douglas-Peucker tolerance in pixels. Values `<= 0` disable decimation.
    pub epsilon: f64,
    /// Points closer than this to the last kept point are dropped.
    pub merge_threshold: f64,
    /// Side of the square gaussian kernel applied to the mask before tracing.
    /// Odd; 1 disables the blur.
    pub blur_kernel_size: usize,
    /// Contours with fewer traced points than this are skipped.
    pub min_points: usize,
}

impl Default for PolygonOptions {
    fn default() -> Self {
        Self {
            epsilon: 2.5,
            merge_threshold: 2.0,
            blur_kernel_size: 3,
            min_points: 5,
        }
    }
}

impl PolygonOptions {
    /// Set the decimation tolerance.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the close-point merge distance.
    pub fn with_merge_threshold(mut self, merge_threshold: f64) -> Self {
        self.merge_threshold = merge_threshold;
        self
    }

    /// Set the side of the blur kernel.
    pub fn with_blur_kernel_size(mut self, blur_kernel_size: usize) -> Self {
        self.blur_kernel_size = blur_kernel_size;
        self
    }

    /// Check the options for values the pipeline cannot use.
    pub fn validate(&self) -> PixvecResult<()> {
        if !self.epsilon.is_finite() {
            return Err(invalid("epsilon", self.epsilon, "a finite number"));
        }
        if !self.merge_threshold.is_finite() || self.merge_threshold < 0.0 {
            return Err(invalid(
                "merge threshold",
                self.merge_threshold,
                "a finite non-negative number",
            ));
        }
        if self.blur_kernel_size % 2 == 0 || self.blur_kernel_size > MAX_BLUR_KERNEL_SIZE {
            return Err(invalid(
                "blur kernel size",
                self.blur_kernel_size,
                "an odd number in 1-15",
            ));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, value: impl ToString, expected: &'static str) -> PixvecError {
    PixvecError::InvalidSetting {
        name,
        value: value.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod raster_settings {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn defaults_are_valid() {
                let settings = RasterSettings::default();
                assert!(settings.validate().is_ok());
                assert_eq!(settings.threshold, 128);
                assert_eq!(settings.scale, 5);
                assert!(settings.negative);
                assert_eq!(settings.resolution, 100);
            }

            #[test]
            fn zero_threshold_rejected() {
                let err = RasterSettings::default()
                    .with_threshold(0)
                    .validate()
                    .unwrap_err();
                match err {
                    PixvecError::InvalidSetting { name, value, .. } => {
                        assert_eq!(name, "threshold");
                        assert_eq!(value, "0");
                    }
                    other => panic!("unexpected error: {other:?}"),
                }
            }

            #[test]
            fn scale_out_of_range_rejected() {
                assert!(RasterSettings::default().with_scale(0).validate().is_err());
                assert!(RasterSettings::default().with_scale(11).validate().is_err());
                assert!(RasterSettings::default().with_scale(10).validate().is_ok());
            }

            #[test]
            fn resolution_must_be_hundreds() {
                let base = RasterSettings::default();
                assert!(base.with_resolution(150).validate().is_err());
                assert!(base.with_resolution(0).validate().is_err());
                assert!(base.with_resolution(1100).validate().is_err());
                assert!(base.with_resolution(500).validate().is_ok());
            }

            #[test]
            fn neutral_scale_needs_no_resize() {
                assert_eq!(RasterSettings::default().scaled_dimensions(40, 30), None);
            }

            #[test]
            fn scale_ten_doubles() {
                let settings = RasterSettings::default().with_scale(10);
                assert_eq!(settings.scaled_dimensions(40, 30), Some((80, 60)));
            }

            #[test]
            fn scale_truncates_and_never_reaches_zero() {
                let settings = RasterSettings::default().with_scale(1);
                // 7 * 0.2 = 1.4 -> 1, 3 * 0.2 = 0.6 -> 0 -> clamped to 1
                assert_eq!(settings.scaled_dimensions(7, 3), Some((1, 1)));
            }
        }
    }

    mod polygon_options {
        use super::*;

        mod unit {
            use super::*;

            #[test]
            fn defaults_match_smart_pipeline() {
                let opts = PolygonOptions::default();
                assert!((opts.epsilon - 2.5).abs() < f64::EPSILON);
                assert!((opts.merge_threshold - 2.0).abs() < f64::EPSILON);
                assert_eq!(opts.min_points, 5);
                assert!(opts.validate().is_ok());
            }

            #[test]
            fn negative_merge_threshold_rejected() {
                let opts = PolygonOptions::default().with_merge_threshold(-1.0);
                assert!(opts.validate().is_err());
            }

            #[test]
            fn nan_epsilon_rejected() {
                let opts = PolygonOptions::default().with_epsilon(f64::NAN);
                assert!(opts.validate().is_err());
            }

            #[test]
            fn default_blur_is_three_by_three() {
                assert_eq!(PolygonOptions::default().blur_kernel_size, 3);
            }

            #[test]
            fn even_or_oversized_kernel_rejected() {
                let base = PolygonOptions::default();
                assert!(base.with_blur_kernel_size(0).validate().is_err());
                assert!(base.with_blur_kernel_size(4).validate().is_err());
                assert!(base.with_blur_kernel_size(17).validate().is_err());
                assert!(base.with_blur_kernel_size(1).validate().is_ok());
                assert!(base.with_blur_kernel_size(15).validate().is_ok());
            }

            #[test]
            fn zero_epsilon_allowed() {
                let opts = PolygonOptions::default().with_epsilon(0.0);
                assert!(opts.validate().is_ok());
            }
        }
    }
}

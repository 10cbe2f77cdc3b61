pub mod config;
pub mod contour;
pub mod document;
pub mod error;
pub mod mask;
pub mod primitive;
pub mod progress;
pub mod simplify;
pub mod tiling;
pub mod vectorizer;

pub use config::{PolygonOptions, RasterSettings};
pub use document::SvgWriter;
pub use error::{PixvecError, PixvecResult};
pub use mask::Mask;
pub use primitive::{ClosedPath, Point, Rectangle, VectorPrimitive};
pub use progress::{NoProgress, ProgressObserver, Stage};
pub use vectorizer::{MaskVectorizer, Strategy};

use std::path::Path;

use image::GrayImage;
use tracing::debug;

use crate::document::output_size;
use crate::mask::{decode_grayscale, prepare_mask};

/// Entry point for configuring and running a raster to vector conversion.
#[derive(Debug, Clone, Default)]
pub struct Pixvec {
    settings: RasterSettings,
}

impl Pixvec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all raster settings at once.
    pub fn with_settings(mut self, settings: RasterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the binarization threshold.
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.settings = self.settings.with_threshold(threshold);
        self
    }

    /// Set the resize factor, in fifths of the decoded size.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.settings = self.settings.with_scale(scale);
        self
    }

    /// Enable or disable inversion before thresholding.
    pub fn with_negative(mut self, negative: bool) -> Self {
        self.settings = self.settings.with_negative(negative);
        self
    }

    /// Set the output resolution percentage.
    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.settings = self.settings.with_resolution(resolution);
        self
    }

    /// Get a reference to the raster settings.
    pub fn settings(&self) -> &RasterSettings {
        &self.settings
    }

    /// Decode the image at `image_path` and binarize it, returning a handle to the mask.
    ///
    /// Settings are validated before the file is touched.
    pub fn for_image(&self, image_path: impl AsRef<Path>) -> PixvecResult<MaskHandle> {
        self.settings.validate()?;
        let path = image_path.as_ref();
        let gray = decode_grayscale(path)?;
        debug!(
            path = %path.display(),
            width = gray.width(),
            height = gray.height(),
            "decoded raster"
        );
        Ok(self.binarize(&gray))
    }

    /// Binarize an already decoded grayscale raster.
    pub fn from_gray(&self, gray: &GrayImage) -> PixvecResult<MaskHandle> {
        self.settings.validate()?;
        Ok(self.binarize(gray))
    }

    fn binarize(&self, gray: &GrayImage) -> MaskHandle {
        let mask = prepare_mask(gray, &self.settings);
        debug!(
            width = mask.width(),
            height = mask.height(),
            foreground = mask.foreground_count(),
            "prepared mask"
        );
        MaskHandle {
            mask,
            resolution: self.settings.resolution,
        }
    }
}

/// A binarized mask ready to be vectorized.
#[derive(Debug, Clone)]
pub struct MaskHandle {
    mask: Mask,
    resolution: u32,
}

impl MaskHandle {
    /// Wrap an existing mask, rendering documents at `resolution` percent.
    pub fn new(mask: Mask, resolution: u32) -> Self {
        Self { mask, resolution }
    }

    /// Get a reference to the mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Consume the handle and return the mask.
    pub fn into_mask(self) -> Mask {
        self.mask
    }

    /// Save the mask as a PNG, foreground white.
    pub fn save(&self, path: impl AsRef<Path>) -> PixvecResult<()> {
        self.mask.to_gray_image().save(path)?;
        Ok(())
    }

    /// Convert the mask with the selected strategy.
    pub fn vectorize(&self, strategy: &Strategy) -> PixvecResult<VectorDrawing> {
        self.vectorize_with_progress(strategy, &mut NoProgress)
    }

    /// [`MaskHandle::vectorize`] reporting coarse checkpoints to `progress`.
    pub fn vectorize_with_progress(
        &self,
        strategy: &Strategy,
        progress: &mut dyn ProgressObserver,
    ) -> PixvecResult<VectorDrawing> {
        if let Strategy::Polygons(options) = strategy {
            options.validate()?;
        }
        let primitives = strategy.vectorize(&self.mask, progress);
        Ok(VectorDrawing {
            primitives,
            width: self.mask.width() as u32,
            height: self.mask.height() as u32,
            resolution: self.resolution,
        })
    }
}

/// The ordered primitives of one conversion, with the pixel space they live in.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDrawing {
    primitives: Vec<VectorPrimitive>,
    width: u32,
    height: u32,
    resolution: u32,
}

impl VectorDrawing {
    pub fn primitives(&self) -> &[VectorPrimitive] {
        &self.primitives
    }

    pub fn into_primitives(self) -> Vec<VectorPrimitive> {
        self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Pixel space of the mask, used as the view box.
    pub fn view_box(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Rendered document size after applying the resolution percentage.
    pub fn output_size(&self) -> (u32, u32) {
        output_size(self.width, self.height, self.resolution)
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Build the SVG document for the drawing.
    pub fn to_writer(&self) -> SvgWriter {
        let mut writer = SvgWriter::new(self.width, self.height, self.resolution);
        writer.extend(&self.primitives);
        writer
    }

    pub fn to_svg_string(&self) -> String {
        self.to_writer().to_svg_string()
    }

    /// Save the drawing as an SVG file.
    pub fn save(&self, path: impl AsRef<Path>) -> PixvecResult<()> {
        self.to_writer().save(path)
    }
}

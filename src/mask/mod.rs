//! Binary edge/foreground mask consumed by every accumulator.
//!
//! An `EdgeMask` is an immutable-by-convention `h × w` grid of booleans in
//! row-major order. It is produced by an edge source adapter (thresholding,
//! [`crate::edges::detect_edge_mask`], or any caller-supplied buffer) and
//! borrowed by the detectors for the duration of one run.
//!
//! Coordinates follow the image convention: `x` is the column, `y` the row.
//! Signed lookups ([`EdgeMask::is_set`]) return `false` outside the grid so
//! projections that leave the image contribute nothing.

mod resample;

pub use resample::Downsampled;

use crate::error::{HoughError, HoughResult};
use crate::image::{ImageU8, ImageView};
use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology;
use serde::{Deserialize, Serialize};

/// Which side of the threshold counts as foreground.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    /// Pixels strictly above the threshold are foreground.
    #[default]
    Bright,
    /// Pixels strictly below the threshold are foreground.
    Dark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EdgeMask {
    w: usize,
    h: usize,
    data: Vec<bool>,
}

impl EdgeMask {
    /// All-background mask of size `w × h`.
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![false; w * h],
        }
    }

    /// Wrap a row-major boolean buffer.
    pub fn from_vec(w: usize, h: usize, data: Vec<bool>) -> HoughResult<Self> {
        let expected = w * h;
        if data.len() != expected {
            return Err(HoughError::MaskSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    /// Interpret a packed 0/255 (or any non-zero) byte buffer as a mask.
    pub fn from_bytes(w: usize, h: usize, bytes: &[u8]) -> HoughResult<Self> {
        let expected = w * h;
        if bytes.len() != expected {
            return Err(HoughError::MaskSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        Ok(Self {
            w,
            h,
            data: bytes.iter().map(|&b| b != 0).collect(),
        })
    }

    /// Binary threshold of a grayscale view.
    pub fn from_gray(gray: &ImageU8<'_>, threshold: u8, polarity: Polarity) -> Self {
        let mut data = Vec::with_capacity(gray.w * gray.h);
        for row in gray.rows() {
            data.extend(row.iter().map(|&px| match polarity {
                Polarity::Bright => px > threshold,
                Polarity::Dark => px < threshold,
            }));
        }
        Self {
            w: gray.w,
            h: gray.h,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.w
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.h
    }

    /// True when the mask has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    /// Fails with [`HoughError::EmptyMask`] for zero-area masks.
    pub fn ensure_non_empty(&self) -> HoughResult<()> {
        if self.is_empty() {
            return Err(HoughError::EmptyMask {
                width: self.w,
                height: self.h,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x]
    }

    /// Bounds-checked lookup; anything outside the grid is background.
    #[inline]
    pub fn is_set(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        let (x, y) = (x as usize, y as usize);
        x < self.w && y < self.h && self.data[y * self.w + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: bool) {
        self.data[y * self.w + x] = value;
    }

    /// Sets `(x, y)` when it lies inside the grid; ignores it otherwise.
    #[inline]
    pub fn set_checked(&mut self, x: i32, y: i32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.data[y as usize * self.w + x as usize] = true;
        }
    }

    #[inline]
    pub fn row(&self, y: usize) -> &[bool] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }

    /// Number of foreground pixels.
    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    /// Foreground pixel coordinates as `(x, y)` in row-major scan order.
    pub fn foreground(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let w = self.w.max(1);
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(move |(i, _)| (i % w, i / w))
    }

    /// Foreground at 255 as an `image` buffer, for the `imageproc` operators.
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.w as u32, self.h as u32, |x, y| {
            Luma([if self.get(x as usize, y as usize) { 255 } else { 0 }])
        })
    }

    /// Any non-zero pixel of `image` is foreground.
    pub fn from_gray_image(image: &GrayImage) -> Self {
        Self {
            w: image.width() as usize,
            h: image.height() as usize,
            data: image.as_raw().iter().map(|&v| v != 0).collect(),
        }
    }

    /// Morphological dilation with a `(2r+1) × (2r+1)` square element.
    ///
    /// Radii above 255 are clamped to 255.
    pub fn dilate(&self, radius: usize) -> Self {
        if radius == 0 || self.is_empty() {
            return self.clone();
        }
        let k = u8::try_from(radius).unwrap_or(u8::MAX);
        Self::from_gray_image(&morphology::dilate(&self.to_gray_image(), Norm::LInf, k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gray_respects_polarity() {
        let data = [10u8, 150, 250, 90];
        let view = ImageU8::packed(2, 2, &data);
        let bright = EdgeMask::from_gray(&view, 100, Polarity::Bright);
        assert_eq!(bright.as_slice(), &[false, true, true, false]);
        let dark = EdgeMask::from_gray(&view, 100, Polarity::Dark);
        assert_eq!(dark.as_slice(), &[true, false, false, true]);
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = EdgeMask::from_vec(3, 3, vec![false; 8]).unwrap_err();
        assert_eq!(
            err,
            HoughError::MaskSizeMismatch {
                expected: 9,
                actual: 8
            }
        );
    }

    #[test]
    fn zero_area_mask_fails_validation() {
        let mask = EdgeMask::new(0, 10);
        assert!(mask.is_empty());
        assert!(matches!(
            mask.ensure_non_empty(),
            Err(HoughError::EmptyMask { width: 0, height: 10 })
        ));
    }

    #[test]
    fn signed_lookup_outside_is_background() {
        let mut mask = EdgeMask::new(4, 4);
        mask.set(3, 0, true);
        assert!(mask.is_set(3, 0));
        assert!(!mask.is_set(-1, 0));
        assert!(!mask.is_set(4, 0));
        assert!(!mask.is_set(3, 7));
    }

    #[test]
    fn foreground_yields_scan_order() {
        let mut mask = EdgeMask::new(3, 2);
        mask.set(2, 0, true);
        mask.set(0, 1, true);
        let pts: Vec<_> = mask.foreground().collect();
        assert_eq!(pts, vec![(2, 0), (0, 1)]);
        assert_eq!(mask.count(), 2);
    }

    #[test]
    fn dilate_grows_square_neighbourhood() {
        let mut mask = EdgeMask::new(5, 5);
        mask.set(2, 2, true);
        let grown = mask.dilate(1);
        assert_eq!(grown.count(), 9);
        assert!(grown.get(1, 1) && grown.get(3, 3));
        assert!(!grown.get(0, 0));

        let mut corner = EdgeMask::new(5, 5);
        corner.set(0, 0, true);
        assert_eq!(corner.dilate(1).count(), 4);
        assert_eq!(corner.dilate(300).count(), 25);
    }

    #[test]
    fn gray_image_conversion_keeps_foreground() {
        let mut mask = EdgeMask::new(4, 3);
        mask.set(3, 2, true);
        let img = mask.to_gray_image();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.get_pixel(3, 2).0, [255]);
        assert_eq!(EdgeMask::from_gray_image(&img), mask);
    }
}

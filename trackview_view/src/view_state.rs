// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};
use trackview_coords::CoordinateConvention;

/// Integer pixel dimensions of a viewport or image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PixelSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PixelSize {
    /// Creates a new pixel size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` if either dimension is zero.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Converts to a floating-point [`Size`].
    #[must_use]
    pub fn to_size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// The rectangle `(0, 0)..(width, height)`.
    #[must_use]
    pub fn to_rect(self) -> Rect {
        self.to_size().to_rect()
    }
}

/// Immutable description of what is on screen and how it is framed.
///
/// A `ViewState` is a plain value: every setter returns a new state and
/// leaves the receiver untouched. Gestures and layout changes produce new
/// states; a [`crate::Transform`] is derived from one with
/// [`crate::Transform::build`].
///
/// - Zoom is a positive multiplier on top of the fit-to-viewport scale, so
///   zoom `1.0` with zero pan shows the whole content centered.
/// - Pan is a screen-space offset in pixels, applied last.
/// - Optional state (image, source resolution, data extent) is explicit:
///   absent fields fall back to documented defaults rather than being probed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    zoom: f64,
    pan: Vec2,
    viewport: PixelSize,
    image_size: Option<PixelSize>,
    source_size: Option<Size>,
    content_extent: Option<Rect>,
    flip_y: bool,
    convention: CoordinateConvention,
}

impl ViewState {
    /// Creates a state for `viewport` with zoom `1.0`, zero pan, no image and
    /// the canonical convention.
    #[must_use]
    pub fn new(viewport: PixelSize) -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            viewport,
            image_size: None,
            source_size: None,
            content_extent: None,
            flip_y: false,
            convention: CoordinateConvention::CANONICAL,
        }
    }

    /// Current zoom factor (always positive).
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Current pan offset in screen pixels.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.pan
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> PixelSize {
        self.viewport
    }

    /// Background image size, if an image is loaded.
    #[must_use]
    pub fn image_size(&self) -> Option<PixelSize> {
        self.image_size
    }

    /// Resolution the point data was authored at, if it differs from the image.
    #[must_use]
    pub fn source_size(&self) -> Option<Size> {
        self.source_size
    }

    /// Data-space extent used for fitting when no image is loaded.
    #[must_use]
    pub fn content_extent(&self) -> Option<Rect> {
        self.content_extent
    }

    /// Whether the view is mirrored vertically about the content frame.
    #[must_use]
    pub fn flip_y(&self) -> bool {
        self.flip_y
    }

    /// The display convention this state presents data in.
    #[must_use]
    pub fn convention(&self) -> CoordinateConvention {
        self.convention
    }

    /// Returns a state with the given zoom.
    ///
    /// Non-positive or non-finite values are ignored.
    #[must_use]
    pub fn with_zoom(mut self, zoom: f64) -> Self {
        if zoom.is_finite() && zoom > 0.0 {
            self.zoom = zoom;
        }
        self
    }

    /// Returns a state with the given pan offset. Non-finite offsets are ignored.
    #[must_use]
    pub fn with_pan(mut self, pan: Vec2) -> Self {
        if pan.is_finite() {
            self.pan = pan;
        }
        self
    }

    /// Returns a state panned by `delta` screen pixels.
    #[must_use]
    pub fn panned_by(self, delta: Vec2) -> Self {
        let pan = self.pan + delta;
        self.with_pan(pan)
    }

    /// Returns a state for a resized viewport.
    ///
    /// An empty size is accepted here; it is rejected when a transform is
    /// built from the state.
    #[must_use]
    pub fn with_viewport(mut self, viewport: PixelSize) -> Self {
        self.viewport = viewport;
        self
    }

    /// Returns a state with the given background image size. Empty sizes
    /// count as no image.
    #[must_use]
    pub fn with_image_size(mut self, image: Option<PixelSize>) -> Self {
        self.image_size = image.filter(|s| !s.is_empty());
        self
    }

    /// Returns a state with the given data authoring resolution.
    #[must_use]
    pub fn with_source_size(mut self, source: Option<Size>) -> Self {
        self.source_size = source.filter(|s| s.is_finite() && s.width > 0.0 && s.height > 0.0);
        self
    }

    /// Returns a state with the given data extent.
    #[must_use]
    pub fn with_content_extent(mut self, extent: Option<Rect>) -> Self {
        self.content_extent = extent.filter(|r| r.is_finite()).map(|r| r.abs());
        self
    }

    /// Returns a state with the vertical flip set explicitly.
    #[must_use]
    pub fn with_flip_y(mut self, flip_y: bool) -> Self {
        self.flip_y = flip_y;
        self
    }

    /// Returns a state presenting data in `convention`.
    ///
    /// This also sets the flip flag: conventions whose Y axis runs opposite to
    /// the canonical one are displayed mirrored.
    #[must_use]
    pub fn with_convention(mut self, convention: CoordinateConvention) -> Self {
        self.convention = convention;
        self.flip_y = convention.flips_canonical();
        self
    }

    /// Returns a state with zoom `1.0` and zero pan: the content fitted and
    /// centered in the viewport.
    #[must_use]
    pub fn reset(mut self) -> Self {
        self.zoom = 1.0;
        self.pan = Vec2::ZERO;
        self
    }

    /// Returns `true` if a transform can be built from this state.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.viewport.is_empty()
    }

    /// The data-space rectangle that is fitted into the viewport at zoom `1.0`.
    ///
    /// In order of preference:
    /// 1. The image frame, expressed in source (data) units.
    /// 2. The data extent, when it has area.
    /// 3. A viewport-sized frame, centered on the data extent if there is one.
    #[must_use]
    pub fn content_frame(&self) -> Rect {
        if let Some(image) = self.image_size {
            let size = self.source_size.unwrap_or_else(|| image.to_size());
            return size.to_rect();
        }
        let viewport = self.viewport.to_size();
        match self.content_extent {
            Some(extent) if extent.width() > 0.0 && extent.height() > 0.0 => extent,
            Some(extent) => Rect::from_center_size(extent.center(), viewport),
            None => Rect::from_origin_size(Point::ORIGIN, viewport),
        }
    }

    /// Scale from data units to image pixels along each axis.
    ///
    /// This is `image_size / source_size` when both are known and `1.0`
    /// otherwise.
    #[must_use]
    pub fn image_scale(&self) -> Vec2 {
        match (self.image_size, self.source_size) {
            (Some(image), Some(source)) => {
                let image = image.to_size();
                Vec2::new(image.width / source.width, image.height / source.height)
            }
            _ => Vec2::new(1.0, 1.0),
        }
    }
}

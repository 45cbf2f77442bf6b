// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::error::ViewError;
use crate::view_state::ViewState;

/// Immutable data ↔ screen mapping derived from a [`ViewState`].
///
/// The forward mapping is a fixed composition of five stages:
///
/// 1. vertical flip about the content frame (only when the state asks for it),
/// 2. image scale (data units → image pixels),
/// 3. base scale (fit-to-viewport scale times zoom),
/// 4. centering offset (centers the scaled content in the viewport),
/// 5. pan offset.
///
/// [`Transform::screen_to_data`] undoes the same stages in reverse order.
/// The order matters: applying the pan before the scale makes the pan
/// zoom-dependent, and every zoom gesture would then shift the content.
///
/// All arithmetic stays in `f64`; nothing is rounded to whole pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    view: ViewState,
    flip: bool,
    flip_axis: f64,
    image_scale: Vec2,
    fit_scale: f64,
    base_scale: f64,
    center: Vec2,
    pan: Vec2,
}

impl Transform {
    /// Builds the transform for `view`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::InvalidViewport`] if either viewport dimension is
    /// zero.
    pub fn build(view: &ViewState) -> Result<Self, ViewError> {
        let viewport = view.viewport();
        if viewport.is_empty() {
            return Err(ViewError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let viewport = viewport.to_size();
        let frame = view.content_frame();
        let image_scale = view.image_scale();

        // Content frame in image pixels.
        let content_w = frame.width() * image_scale.x;
        let content_h = frame.height() * image_scale.y;
        let fit_scale = (viewport.width / content_w.max(f64::MIN_POSITIVE))
            .min(viewport.height / content_h.max(f64::MIN_POSITIVE));
        let base_scale = fit_scale * view.zoom();

        let origin = Vec2::new(frame.x0 * image_scale.x, frame.y0 * image_scale.y);
        let center = Vec2::new(
            (viewport.width - content_w * base_scale) * 0.5,
            (viewport.height - content_h * base_scale) * 0.5,
        ) - origin * base_scale;

        Ok(Self {
            view: *view,
            flip: view.flip_y(),
            flip_axis: frame.y0 + frame.y1,
            image_scale,
            fit_scale,
            base_scale,
            center,
            pan: view.pan(),
        })
    }

    /// The state this transform was built from.
    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Maps a data-space point to screen pixels.
    #[must_use]
    pub fn data_to_screen(&self, p: Point) -> Point {
        let y = if self.flip { self.flip_axis - p.y } else { p.y };
        let x = p.x * self.image_scale.x;
        let y = y * self.image_scale.y;
        let x = x * self.base_scale;
        let y = y * self.base_scale;
        Point::new(x, y) + self.center + self.pan
    }

    /// Maps a screen-pixel point back to data space.
    #[must_use]
    pub fn screen_to_data(&self, p: Point) -> Point {
        let p = p - self.pan - self.center;
        let x = p.x / self.base_scale;
        let y = p.y / self.base_scale;
        let x = x / self.image_scale.x;
        let y = y / self.image_scale.y;
        let y = if self.flip { self.flip_axis - y } else { y };
        Point::new(x, y)
    }

    /// Maps a data-space rectangle to the screen-space rectangle bounding it.
    #[must_use]
    pub fn data_rect_to_screen(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.data_to_screen(rect.origin()),
            self.data_to_screen(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Maps a screen-space rectangle to the data-space rectangle bounding it.
    #[must_use]
    pub fn screen_rect_to_data(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.screen_to_data(rect.origin()),
            self.screen_to_data(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Data-space rectangle currently covered by the viewport.
    #[must_use]
    pub fn visible_data_rect(&self) -> Rect {
        self.screen_rect_to_data(self.view.viewport().to_rect())
    }

    /// Screen pixels per data unit along each axis.
    #[must_use]
    pub fn pixels_per_unit(&self) -> Vec2 {
        Vec2::new(
            self.base_scale * self.image_scale.x,
            self.base_scale * self.image_scale.y,
        )
    }

    /// Scale that fits the content into the viewport, before zoom.
    #[must_use]
    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    /// Fit scale multiplied by zoom.
    #[must_use]
    pub fn base_scale(&self) -> f64 {
        self.base_scale
    }

    /// Centering offset in screen pixels.
    #[must_use]
    pub fn center_offset(&self) -> Vec2 {
        self.center
    }

    /// The forward mapping as an affine matrix, for renderers.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        let flip = if self.flip {
            Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, self.flip_axis])
        } else {
            Affine::IDENTITY
        };
        let s = self.pixels_per_unit();
        Affine::translate(self.center + self.pan) * Affine::scale_non_uniform(s.x, s.y) * flip
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};

    use super::Transform;
    use crate::error::ViewError;
    use crate::view_state::{PixelSize, ViewState};

    fn close(a: Point, b: Point, eps: f64) -> bool {
        (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
    }

    #[test]
    fn default_state_is_identity() {
        let t = Transform::build(&ViewState::new(PixelSize::new(800, 600))).unwrap();
        let p = Point::new(12.5, -7.0);
        assert_eq!(t.data_to_screen(p), p);
        assert_eq!(t.screen_to_data(p), p);
    }

    #[test]
    fn empty_viewport_is_rejected() {
        let err = Transform::build(&ViewState::new(PixelSize::new(0, 600))).unwrap_err();
        assert_eq!(
            err,
            ViewError::InvalidViewport {
                width: 0,
                height: 600
            }
        );
    }

    #[test]
    fn image_is_fitted_and_centered() {
        // 1000x500 image in an 800x600 viewport: width-limited, scale 0.8.
        let view = ViewState::new(PixelSize::new(800, 600))
            .with_image_size(Some(PixelSize::new(1000, 500)));
        let t = Transform::build(&view).unwrap();
        assert!((t.fit_scale() - 0.8).abs() < 1e-12);
        assert!(close(t.data_to_screen(Point::ORIGIN), Point::new(0.0, 100.0), 1e-9));
        assert!(close(
            t.data_to_screen(Point::new(1000.0, 500.0)),
            Point::new(800.0, 500.0),
            1e-9
        ));
    }

    #[test]
    fn pan_is_applied_after_scale() {
        let view = ViewState::new(PixelSize::new(800, 600))
            .with_zoom(4.0)
            .with_pan(Vec2::new(10.0, 20.0));
        let t = Transform::build(&view).unwrap();
        let zero_pan = Transform::build(&view.with_pan(Vec2::ZERO)).unwrap();
        let p = Point::new(3.0, 4.0);
        // The pan shifts the screen position by exactly the pan, whatever the zoom.
        assert!(close(
            t.data_to_screen(p),
            zero_pan.data_to_screen(p) + Vec2::new(10.0, 20.0),
            1e-9
        ));
    }

    #[test]
    fn flip_mirrors_about_content_frame() {
        let view = ViewState::new(PixelSize::new(100, 100))
            .with_image_size(Some(PixelSize::new(100, 100)))
            .with_flip_y(true);
        let t = Transform::build(&view).unwrap();
        assert!(close(t.data_to_screen(Point::new(10.0, 0.0)), Point::new(10.0, 100.0), 1e-9));
        assert!(close(t.data_to_screen(Point::new(10.0, 100.0)), Point::new(10.0, 0.0), 1e-9));
        assert!(close(t.screen_to_data(Point::new(10.0, 25.0)), Point::new(10.0, 75.0), 1e-9));
    }

    #[test]
    fn source_resolution_scales_into_image() {
        // Data tracked at 4K, proxy image at 1080p, viewport matches the proxy.
        let view = ViewState::new(PixelSize::new(1920, 1080))
            .with_image_size(Some(PixelSize::new(1920, 1080)))
            .with_source_size(Some(Size::new(3840.0, 2160.0)));
        let t = Transform::build(&view).unwrap();
        assert!(close(
            t.data_to_screen(Point::new(3840.0, 2160.0)),
            Point::new(1920.0, 1080.0),
            1e-9
        ));
        assert_eq!(t.pixels_per_unit(), Vec2::new(0.5, 0.5));
    }

    #[test]
    fn affine_matches_stagewise_mapping() {
        let view = ViewState::new(PixelSize::new(640, 480))
            .with_image_size(Some(PixelSize::new(1920, 1080)))
            .with_flip_y(true)
            .with_zoom(2.5)
            .with_pan(Vec2::new(-33.0, 17.5));
        let t = Transform::build(&view).unwrap();
        let a = t.to_affine();
        for p in [Point::new(0.0, 0.0), Point::new(960.0, 540.0), Point::new(-5.0, 2000.0)] {
            assert!(close(a * p, t.data_to_screen(p), 1e-9));
            assert!(close(a.inverse() * t.data_to_screen(p), p, 1e-9));
        }
    }

    #[test]
    fn visible_rect_covers_content_at_fit() {
        let view = ViewState::new(PixelSize::new(800, 600))
            .with_content_extent(Some(Rect::new(-50.0, -25.0, 50.0, 25.0)));
        let t = Transform::build(&view).unwrap();
        let visible = t.visible_data_rect();
        assert!(visible.x0 <= -50.0 + 1e-9 && visible.x1 >= 50.0 - 1e-9);
        assert!(visible.y0 <= -25.0 + 1e-9 && visible.y1 >= 25.0 - 1e-9);
    }

    #[test]
    fn rect_mapping_normalizes_under_flip() {
        let view = ViewState::new(PixelSize::new(100, 100))
            .with_image_size(Some(PixelSize::new(100, 100)))
            .with_flip_y(true);
        let t = Transform::build(&view).unwrap();
        let r = t.data_rect_to_screen(Rect::new(0.0, 0.0, 10.0, 20.0));
        assert!(r.y0 < r.y1);
        assert!((r.y0 - 80.0).abs() < 1e-9 && (r.y1 - 100.0).abs() < 1e-9);
    }
}

// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use kurbo::{Point, Rect, Size, Vec2};
use trackview_cache::TransformCache;
use trackview_controller::{GestureState, ZoomPanController};
use trackview_coords::{
    AmbiguousConvention, CoordinateConvention, CoordinateService, PointId, PointSet, TrackedPoint,
};
use trackview_index::PointIndex;
use trackview_view::{PixelSize, Transform, ViewError, ViewState};

use crate::config::EngineConfig;

/// Outcome of [`Engine::load_points`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoadReport {
    /// Storage convention the points were read in.
    pub convention: CoordinateConvention,
    /// Frame the convention's origin refers to (image size, or inferred).
    pub frame: Size,
    /// Number of points loaded.
    pub count: usize,
    /// Set when the convention was a fallback rather than detected.
    pub warning: Option<AmbiguousConvention>,
}

#[derive(Clone, Copy, Debug)]
struct Source {
    convention: CoordinateConvention,
    frame: Size,
}

/// The collaborator-facing engine: one view, one point set, one index.
///
/// The engine owns the current [`ViewState`] and the last good
/// [`Transform`]. Every input either produces a new state that is adopted
/// together with its transform, or fails and leaves both untouched.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    cache: Arc<TransformCache>,
    coords: CoordinateService,
    controller: ZoomPanController,
    view: ViewState,
    current: Arc<Transform>,
    points: PointSet,
    source: Option<Source>,
    index: PointIndex,
}

impl Engine {
    /// Creates an engine with its own transform cache.
    ///
    /// # Errors
    ///
    /// Fails with [`ViewError::InvalidViewport`] for an empty viewport.
    pub fn new(viewport: PixelSize, config: EngineConfig) -> Result<Self, ViewError> {
        let cache = Arc::new(TransformCache::new(config.cache));
        Self::with_cache(viewport, config, cache)
    }

    /// Creates an engine sharing `cache` with other owners, such as a loader
    /// thread that pre-warms transforms for incoming images.
    ///
    /// # Errors
    ///
    /// Fails with [`ViewError::InvalidViewport`] for an empty viewport.
    pub fn with_cache(
        viewport: PixelSize,
        config: EngineConfig,
        cache: Arc<TransformCache>,
    ) -> Result<Self, ViewError> {
        let view = ViewState::new(viewport).with_convention(config.display.convention);
        let current = cache.get_or_build(&view)?;
        Ok(Self {
            config,
            cache,
            coords: CoordinateService::new().with_fallback(config.display.fallback_convention),
            controller: ZoomPanController::new(config.zoom),
            view,
            current,
            points: PointSet::new(),
            source: None,
            index: PointIndex::new(config.index),
        })
    }

    /// The configuration this engine was created with.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The shared transform cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<TransformCache> {
        &self.cache
    }

    /// The current view state.
    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// The loaded points, in canonical coordinates.
    #[must_use]
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    /// The spatial index, for diagnostics.
    #[must_use]
    pub fn index(&self) -> &PointIndex {
        &self.index
    }

    /// Whether a pan drag is in progress.
    #[must_use]
    pub fn gesture_state(&self) -> GestureState {
        self.controller.state()
    }

    /// The transform of the current view.
    #[must_use]
    pub fn current_transform(&self) -> Arc<Transform> {
        Arc::clone(&self.current)
    }

    /// Maps a canonical data point to viewport pixels.
    #[must_use]
    pub fn to_screen(&self, data: Point) -> Point {
        self.current.data_to_screen(data)
    }

    /// Maps viewport pixels to a canonical data point.
    #[must_use]
    pub fn to_data(&self, screen: Point) -> Point {
        self.current.screen_to_data(screen)
    }

    /// The part of data space currently visible.
    #[must_use]
    pub fn visible_data_rect(&self) -> Rect {
        self.current.visible_data_rect()
    }

    /// Zoom factor relative to fit-to-viewport.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.view.zoom()
    }

    /// Zoom factor as a percentage, for a UI label.
    #[must_use]
    pub fn zoom_percent(&self) -> f64 {
        self.view.zoom() * 100.0
    }

    /// Pan offset in screen pixels.
    #[must_use]
    pub fn pan(&self) -> Vec2 {
        self.view.pan()
    }

    /// Replaces the point set with `raw` points stored in `hint`, or in a
    /// detected convention when no hint is given.
    ///
    /// Points are normalized once into the canonical convention. The view is
    /// refitted to the new data and, depending on [`DisplayConfig`], switched
    /// to display the data's convention.
    ///
    /// [`DisplayConfig`]: crate::DisplayConfig
    ///
    /// # Errors
    ///
    /// Only fails if the refitted view cannot produce a transform; the points
    /// are loaded regardless.
    pub fn load_points(
        &mut self,
        raw: &[TrackedPoint],
        hint: Option<CoordinateConvention>,
    ) -> Result<LoadReport, ViewError> {
        let known_frame = self.reference_frame();
        let detection = self.coords.detect(raw, hint, known_frame);
        let convention = detection.convention;
        let frame = known_frame.unwrap_or_else(|| self.coords.infer_frame(raw, convention));
        let normalized = self.coords.normalize(raw, convention, frame);

        self.points.replace(normalized);
        self.index.clear();
        self.source = Some(Source { convention, frame });
        tracing::debug!(
            count = self.points.len(),
            ?convention,
            revision = self.points.revision(),
            "points loaded"
        );

        let display = if self.config.display.follow_data_convention {
            convention
        } else {
            self.config.display.convention
        };
        let next = self
            .view
            .with_content_extent(self.points.bounds())
            .with_convention(display)
            .reset();
        self.publish(next)?;

        Ok(LoadReport {
            convention,
            frame,
            count: self.points.len(),
            warning: detection.ambiguity,
        })
    }

    /// The points converted back to `convention`, or to the convention they
    /// were loaded in.
    #[must_use]
    pub fn export_points(&self, convention: Option<CoordinateConvention>) -> Vec<TrackedPoint> {
        let (loaded, frame) = match self.source {
            Some(s) => (s.convention, s.frame),
            None => (CoordinateConvention::CANONICAL, Size::ZERO),
        };
        self.coords.denormalize(
            self.points.as_slice(),
            convention.unwrap_or(loaded),
            frame,
        )
    }

    /// Adds or replaces a point given in canonical coordinates.
    pub fn insert_point(&mut self, point: TrackedPoint) -> Option<TrackedPoint> {
        self.points.insert(point)
    }

    /// Removes a point.
    pub fn remove_point(&mut self, id: PointId) -> Option<TrackedPoint> {
        self.points.remove(id)
    }

    /// Moves a point so that it appears at `screen`.
    ///
    /// The index is updated in place when possible; otherwise the next query
    /// rebuilds it. Returns `false` for an unknown id.
    pub fn move_point(&mut self, id: PointId, screen: Point) -> bool {
        let data = self.current.screen_to_data(screen);
        let previous = self.points.revision();
        if self.points.set_position(id, data).is_none() {
            return false;
        }
        if !self
            .index
            .apply_move(id, &self.points, &self.current, previous)
        {
            tracing::trace!(%id, "point move deferred to index rebuild");
        }
        true
    }

    /// The point within the hit radius of `screen`, closest first, lowest id
    /// on ties.
    pub fn hit_test(&mut self, screen: Point) -> Option<PointId> {
        self.index.hit_test(&self.points, &self.current, screen)
    }

    /// Points inside a screen rectangle, sorted by id.
    pub fn range_query(&mut self, rect: Rect) -> Vec<PointId> {
        self.index.query_range(&self.points, &self.current, rect)
    }

    /// Resizes the viewport.
    ///
    /// # Errors
    ///
    /// An empty size is rejected and the previous view stays in effect.
    pub fn set_viewport(&mut self, viewport: PixelSize) -> Result<(), ViewError> {
        self.publish(self.view.with_viewport(viewport))
    }

    /// Sets or clears the background image size.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn set_image_size(&mut self, image: Option<PixelSize>) -> Result<(), ViewError> {
        self.publish(self.view.with_image_size(image))
    }

    /// Sets or clears the resolution the data was authored at.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn set_source_size(&mut self, source: Option<Size>) -> Result<(), ViewError> {
        self.publish(self.view.with_source_size(source))
    }

    /// Applies a wheel step at `cursor`.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn wheel(&mut self, cursor: Point, delta: f64) -> Result<(), ViewError> {
        let next = self
            .controller
            .zoom_at(&self.view, &self.current, cursor, delta)?;
        self.publish(next)
    }

    /// Multiplies the zoom by `factor` around the viewport center.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn zoom_by(&mut self, factor: f64) -> Result<(), ViewError> {
        let next = self.controller.zoom_by(&self.view, &self.current, factor)?;
        self.publish(next)
    }

    /// Pans by a screen delta.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn pan_by(&mut self, delta: Vec2) -> Result<(), ViewError> {
        self.publish(self.controller.pan_by(&self.view, delta))
    }

    /// Fits the content again.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn reset_view(&mut self) -> Result<(), ViewError> {
        self.publish(self.controller.reset(&self.view))
    }

    /// Pans so that a point is at the viewport center. Returns `false` for an
    /// unknown id.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn center_on_point(&mut self, id: PointId) -> Result<bool, ViewError> {
        let Some(pos) = self.points.position(id) else {
            return Ok(false);
        };
        self.publish(self.controller.center_on(&self.view, &self.current, pos))?;
        Ok(true)
    }

    /// Starts a pan drag.
    pub fn drag_start(&mut self, at: Point) {
        self.controller.begin_pan(at);
    }

    /// Continues a pan drag. Returns `false` when no drag is active.
    ///
    /// # Errors
    ///
    /// Propagates transform build failures; the previous view stays in effect.
    pub fn drag_move(&mut self, at: Point) -> Result<bool, ViewError> {
        let Some(next) = self.controller.drag_pan(&self.view, at) else {
            return Ok(false);
        };
        self.publish(next)?;
        Ok(true)
    }

    /// Ends a pan drag. Returns `true` if one was active.
    pub fn drag_end(&mut self) -> bool {
        self.controller.end_pan()
    }

    fn reference_frame(&self) -> Option<Size> {
        self.view
            .source_size()
            .or_else(|| self.view.image_size().map(PixelSize::to_size))
    }

    fn publish(&mut self, next: ViewState) -> Result<(), ViewError> {
        match self.cache.get_or_build(&next) {
            Ok(transform) => {
                self.view = next;
                self.current = transform;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%err, "view change rejected; keeping previous view");
                Err(err)
            }
        }
    }
}

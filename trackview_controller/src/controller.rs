// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};
use trackview_view::{Transform, ViewError, ViewState};

use crate::config::ZoomConfig;
use crate::drag::DragState;

/// Whether a pan drag is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureState {
    /// No gesture active. Zoom steps happen here and return here.
    Idle,
    /// The pan button is held.
    Panning,
}

/// Computes the next [`ViewState`] for zoom and pan gestures.
///
/// Every operation takes the current state and returns a new one; nothing is
/// published until the caller adopts the result. The controller itself only
/// remembers the pan drag in progress.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoomPanController {
    config: ZoomConfig,
    drag: DragState,
}

impl ZoomPanController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            drag: DragState::default(),
        }
    }

    /// Zoom limits and wheel response.
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Current gesture state.
    #[must_use]
    pub fn state(&self) -> GestureState {
        if self.drag.is_dragging() {
            GestureState::Panning
        } else {
            GestureState::Idle
        }
    }

    /// Applies a wheel step at `cursor`, keeping the data point under the
    /// cursor fixed on screen.
    ///
    /// `current` must be the transform of `view`. Fails only if the viewport
    /// cannot produce a transform; the caller then keeps `view`.
    pub fn zoom_at(
        &self,
        view: &ViewState,
        current: &Transform,
        cursor: Point,
        wheel_delta: f64,
    ) -> Result<ViewState, ViewError> {
        let factor = self.config.wheel_factor(wheel_delta);
        self.zoom_to(view, current, cursor, view.zoom() * factor)
    }

    /// Sets the zoom to `target` (clamped), anchored at `anchor`.
    ///
    /// The anchor's data point is taken from `current`, the staged state's
    /// transform is built directly, and a single pan correction moves the
    /// point back under the anchor. The staged state is never returned.
    pub fn zoom_to(
        &self,
        view: &ViewState,
        current: &Transform,
        anchor: Point,
        target: f64,
    ) -> Result<ViewState, ViewError> {
        if !anchor.is_finite() || !target.is_finite() {
            return Ok(*view);
        }
        let under_cursor = current.screen_to_data(anchor);
        let zoom = self.config.clamp(target);
        if (zoom - view.zoom()).abs() < f64::EPSILON {
            return Ok(*view);
        }

        let staged = view.with_zoom(zoom);
        let projected = Transform::build(&staged)?.data_to_screen(under_cursor);
        let next = staged.panned_by(anchor - projected);
        tracing::debug!(
            from = view.zoom(),
            to = zoom,
            anchor_x = anchor.x,
            anchor_y = anchor.y,
            "zoom at anchor"
        );
        Ok(next)
    }

    /// Multiplies the zoom by `factor`, anchored at the viewport center.
    pub fn zoom_by(
        &self,
        view: &ViewState,
        current: &Transform,
        factor: f64,
    ) -> Result<ViewState, ViewError> {
        if !(factor.is_finite() && factor > 0.0) {
            return Ok(*view);
        }
        let center = view.viewport().to_rect().center();
        self.zoom_to(view, current, center, view.zoom() * factor)
    }

    /// Enters [`GestureState::Panning`] with the pointer at `at`.
    pub fn begin_pan(&mut self, at: Point) {
        tracing::trace!(x = at.x, y = at.y, "pan started");
        self.drag.start(at);
    }

    /// Pans by the pointer movement since the last event.
    ///
    /// Pan offsets are screen pixels, so the delta is applied unchanged at
    /// every zoom level. Returns `None` when idle.
    pub fn drag_pan(&mut self, view: &ViewState, at: Point) -> Option<ViewState> {
        let delta = self.drag.update(at)?;
        Some(view.panned_by(delta))
    }

    /// Leaves [`GestureState::Panning`]. Returns `true` if a pan was active.
    pub fn end_pan(&mut self) -> bool {
        let was_panning = self.drag.is_dragging();
        self.drag.end();
        was_panning
    }

    /// Pans by a fixed screen delta, e.g. for keyboard nudges.
    #[must_use]
    pub fn pan_by(&self, view: &ViewState, delta: Vec2) -> ViewState {
        view.panned_by(delta)
    }

    /// Pans so that `data` appears at the viewport center. Zoom is kept.
    #[must_use]
    pub fn center_on(&self, view: &ViewState, current: &Transform, data: Point) -> ViewState {
        if !data.is_finite() {
            return *view;
        }
        let center = view.viewport().to_rect().center();
        view.panned_by(center - current.data_to_screen(data))
    }

    /// Fits the content again: zoom `1.0`, no pan.
    #[must_use]
    pub fn reset(&self, view: &ViewState) -> ViewState {
        view.reset()
    }
}

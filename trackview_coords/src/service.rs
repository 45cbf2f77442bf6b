// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Convention detection and normalization into the canonical convention.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};

use crate::convention::CoordinateConvention;
use crate::points::TrackedPoint;

/// Why [`CoordinateService::detect`] could not decide on a convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbiguityReason {
    /// No sample points and no hint were given.
    NoSamples,
    /// No reference frame (image size) was known to compare samples against.
    NoReferenceFrame,
    /// The samples fit inside the frame under more than one convention.
    FitsMultiple,
    /// The samples do not fit inside the frame under any known convention.
    OutOfFrame,
}

/// Non-fatal detection outcome: the fallback convention was used.
///
/// Callers are expected to surface this to the user or their log; loading
/// proceeds with [`AmbiguousConvention::fallback`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("ambiguous coordinate convention ({reason:?}); assuming {fallback:?}")]
pub struct AmbiguousConvention {
    /// What made the samples ambiguous.
    pub reason: AmbiguityReason,
    /// The convention that was assumed instead.
    pub fallback: CoordinateConvention,
}

/// Result of [`CoordinateService::detect`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    /// The convention to load the data with.
    pub convention: CoordinateConvention,
    /// Set when the convention is a fallback rather than an inference.
    pub ambiguity: Option<AmbiguousConvention>,
}

impl Detection {
    fn certain(convention: CoordinateConvention) -> Self {
        Self {
            convention,
            ambiguity: None,
        }
    }

    /// Returns `true` if the fallback convention was used.
    #[must_use]
    pub fn is_ambiguous(&self) -> bool {
        self.ambiguity.is_some()
    }
}

/// Classifies and normalizes the coordinate convention of ingested points.
///
/// The service is a small value: it holds only the fallback convention used
/// when detection is ambiguous and the tolerance used when comparing samples
/// against a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateService {
    fallback: CoordinateConvention,
    tolerance: f64,
}

impl Default for CoordinateService {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordinateService {
    /// Creates a service that falls back to the canonical convention with a
    /// half-pixel frame tolerance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fallback: CoordinateConvention::CANONICAL,
            tolerance: 0.5,
        }
    }

    /// Sets the convention assumed for ambiguous input.
    #[must_use]
    pub const fn with_fallback(mut self, fallback: CoordinateConvention) -> Self {
        self.fallback = fallback;
        self
    }

    /// Sets how far (in data units) samples may lie outside the frame and
    /// still count as inside.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance.abs();
        self
    }

    /// Returns the convention assumed for ambiguous input.
    #[must_use]
    pub const fn fallback(&self) -> CoordinateConvention {
        self.fallback
    }

    /// Picks the convention of `samples`.
    ///
    /// A declared `hint` always wins. Otherwise samples are compared against
    /// the optional reference `frame` (usually the image size): negative
    /// coordinates that fit a centered frame select
    /// [`CoordinateConvention::CenterYUp`]; anything else that cannot be told
    /// apart falls back to the configured default and reports why.
    #[must_use]
    pub fn detect(
        &self,
        samples: &[TrackedPoint],
        hint: Option<CoordinateConvention>,
        frame: Option<Size>,
    ) -> Detection {
        if let Some(hint) = hint {
            return Detection::certain(hint);
        }
        let Some(bounds) = sample_bounds(samples) else {
            return ambiguous(AmbiguityReason::NoSamples, self.fallback);
        };
        let tol = self.tolerance;
        let has_negative = bounds.x0 < -tol || bounds.y0 < -tol;

        let Some(frame) = frame.filter(|f| f.width > 0.0 && f.height > 0.0) else {
            // Only the centered convention admits negative in-frame values.
            let guess = if has_negative {
                CoordinateConvention::CenterYUp
            } else {
                self.fallback
            };
            return ambiguous(AmbiguityReason::NoReferenceFrame, guess);
        };

        let fits: Vec<CoordinateConvention> = CoordinateConvention::ALL
            .into_iter()
            .filter(|&c| fits_frame(bounds, c, frame, tol))
            .collect();
        match fits.as_slice() {
            [] => ambiguous(AmbiguityReason::OutOfFrame, self.fallback),
            [only] => Detection::certain(*only),
            _ => ambiguous(AmbiguityReason::FitsMultiple, self.fallback),
        }
    }

    /// Rewrites `points` from `convention` into the canonical convention.
    ///
    /// `frame` is the extent the convention's origin refers to, normally the
    /// image size (see [`CoordinateService::infer_frame`] when there is none).
    #[must_use]
    pub fn normalize(
        &self,
        points: &[TrackedPoint],
        convention: CoordinateConvention,
        frame: Size,
    ) -> Vec<TrackedPoint> {
        points
            .iter()
            .map(|p| TrackedPoint {
                id: p.id,
                pos: to_canonical(p.pos, convention, frame),
            })
            .collect()
    }

    /// Rewrites canonical `points` back into `convention`.
    ///
    /// This is the exact inverse of [`CoordinateService::normalize`] for the
    /// same `frame`.
    #[must_use]
    pub fn denormalize(
        &self,
        points: &[TrackedPoint],
        convention: CoordinateConvention,
        frame: Size,
    ) -> Vec<TrackedPoint> {
        points
            .iter()
            .map(|p| TrackedPoint {
                id: p.id,
                pos: from_canonical(p.pos, convention, frame),
            })
            .collect()
    }

    /// Derives a reference frame from the points themselves when no image
    /// size is known.
    ///
    /// The frame is the smallest origin-anchored extent that contains every
    /// point under `convention`, so normalized points stay non-negative.
    #[must_use]
    pub fn infer_frame(&self, points: &[TrackedPoint], convention: CoordinateConvention) -> Size {
        let Some(b) = sample_bounds(points) else {
            return Size::ZERO;
        };
        if convention.allows_negative() {
            let half_w = b.x0.abs().max(b.x1.abs());
            let half_h = b.y0.abs().max(b.y1.abs());
            Size::new(half_w * 2.0, half_h * 2.0)
        } else {
            Size::new(b.x1.max(0.0), b.y1.max(0.0))
        }
    }
}

fn ambiguous(reason: AmbiguityReason, fallback: CoordinateConvention) -> Detection {
    tracing::warn!(?reason, ?fallback, "coordinate convention is ambiguous");
    Detection {
        convention: fallback,
        ambiguity: Some(AmbiguousConvention { reason, fallback }),
    }
}

fn sample_bounds(samples: &[TrackedPoint]) -> Option<Rect> {
    let mut iter = samples.iter().filter(|p| p.pos.is_finite());
    let first = iter.next()?;
    let seed = Rect::from_points(first.pos, first.pos);
    Some(iter.fold(seed, |r, p| r.union_pt(p.pos)))
}

fn fits_frame(bounds: Rect, convention: CoordinateConvention, frame: Size, tol: f64) -> bool {
    let (x_min, x_max, y_min, y_max) = if convention.allows_negative() {
        let hw = frame.width * 0.5;
        let hh = frame.height * 0.5;
        (-hw, hw, -hh, hh)
    } else {
        (0.0, frame.width, 0.0, frame.height)
    };
    bounds.x0 >= x_min - tol
        && bounds.x1 <= x_max + tol
        && bounds.y0 >= y_min - tol
        && bounds.y1 <= y_max + tol
}

fn to_canonical(p: Point, convention: CoordinateConvention, frame: Size) -> Point {
    match convention {
        CoordinateConvention::TopLeftYDown => p,
        CoordinateConvention::BottomLeftYUp => Point::new(p.x, frame.height - p.y),
        CoordinateConvention::CenterYUp => {
            Point::new(p.x + frame.width * 0.5, frame.height * 0.5 - p.y)
        }
    }
}

fn from_canonical(p: Point, convention: CoordinateConvention, frame: Size) -> Point {
    match convention {
        CoordinateConvention::TopLeftYDown => p,
        CoordinateConvention::BottomLeftYUp => Point::new(p.x, frame.height - p.y),
        CoordinateConvention::CenterYUp => {
            Point::new(p.x - frame.width * 0.5, frame.height * 0.5 - p.y)
        }
    }
}

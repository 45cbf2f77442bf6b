// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Corner (or center) of the frame that a convention places at `(0, 0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OriginCorner {
    /// Origin at the top-left corner of the frame.
    TopLeft,
    /// Origin at the bottom-left corner of the frame.
    BottomLeft,
    /// Origin at the center of the frame.
    Center,
}

/// How stored point coordinates relate to the image frame they were tracked on.
///
/// The canonical internal convention is [`CoordinateConvention::TopLeftYDown`],
/// matching image rows and screen pixels. Other conventions are rewritten into
/// it once at load time by [`crate::CoordinateService::normalize`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordinateConvention {
    /// Origin at the top-left corner, Y grows downward (image/screen rows).
    #[default]
    TopLeftYDown,
    /// Origin at the bottom-left corner, Y grows upward.
    BottomLeftYUp,
    /// Origin at the frame center, Y grows upward.
    CenterYUp,
}

impl CoordinateConvention {
    /// The convention every [`crate::PointSet`] is stored in after normalization.
    pub const CANONICAL: Self = Self::TopLeftYDown;

    /// All known conventions, canonical first.
    pub const ALL: [Self; 3] = [Self::TopLeftYDown, Self::BottomLeftYUp, Self::CenterYUp];

    /// Returns where this convention places the origin.
    #[must_use]
    pub const fn origin(self) -> OriginCorner {
        match self {
            Self::TopLeftYDown => OriginCorner::TopLeft,
            Self::BottomLeftYUp => OriginCorner::BottomLeft,
            Self::CenterYUp => OriginCorner::Center,
        }
    }

    /// Returns `true` if increasing Y moves up the frame.
    #[must_use]
    pub const fn is_y_up(self) -> bool {
        !matches!(self, Self::TopLeftYDown)
    }

    /// Returns `true` if presenting data in this convention needs a vertical
    /// flip relative to the canonical convention.
    #[must_use]
    pub const fn flips_canonical(self) -> bool {
        self.is_y_up() != Self::CANONICAL.is_y_up()
    }

    /// Returns `true` if this convention can represent negative coordinates
    /// for points inside the frame.
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(self.origin(), OriginCorner::Center)
    }
}

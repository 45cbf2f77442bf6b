// Copyright 2025 the Trackview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trackview Cache: memoized transforms keyed by quantized view state.
//!
//! Painting and hit-testing both ask for the current [`Transform`] many times
//! per frame. [`TransformCache`] keeps a small, bounded LRU of transforms so
//! that identical (or imperceptibly different) view states resolve to the
//! same shared instance:
//! - Keys are [`ViewKey`]s: view states with pan, zoom and extents snapped to
//!   a sub-pixel grid ([`CacheConfig`]).
//! - Hits return the cached `Arc<Transform>` and refresh its recency.
//! - Misses build outside the lock, insert, and evict the least recently used
//!   entry when over capacity.
//!
//! The cache is an optimization only: dropping or clearing it never changes
//! what a lookup returns, only how long it takes.
//!
//! ```rust
//! use std::sync::Arc;
//! use kurbo::Vec2;
//! use trackview_cache::{CacheConfig, TransformCache};
//! use trackview_view::{PixelSize, ViewState};
//!
//! let cache = TransformCache::new(CacheConfig::default());
//! let view = ViewState::new(PixelSize::new(800, 600)).with_zoom(2.0);
//!
//! let a = cache.get_or_build(&view).unwrap();
//! // Sub-pixel jitter from the previous frame resolves to the same instance.
//! let jittered = view.with_pan(Vec2::new(1e-6, 0.0));
//! let b = cache.get_or_build(&jittered).unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//! ```
//!
//! [`Transform`]: trackview_view::Transform

mod cache;
mod config;
mod key;

pub use cache::{CacheStats, TransformCache};
pub use config::CacheConfig;
pub use key::ViewKey;

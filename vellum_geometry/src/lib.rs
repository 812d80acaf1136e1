// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_geometry --heading-base-level=0

//! Vellum Geometry: validated affine transforms and axis-aligned bounds.
//!
//! This crate holds the value types the rest of Vellum builds on:
//!
//! - [`Transform`]: a 2D affine transform with finite coefficients, layered on
//!   [`kurbo::Affine`]. Composition follows `self ∘ other`, so nested frames
//!   compose as `accumulated.compose(local)`.
//! - [`BoundingBox`]: an axis-aligned box with union, intersection and
//!   containment queries.
//! - [`Extent`]: a min/max fold used to aggregate bounds without losing
//!   degenerate (zero-width or zero-height) contributions.
//!
//! Construction is fallible: NaN and infinite values are rejected with
//! [`GeometryError::InvalidCoordinate`], and inverting a near-singular
//! transform reports [`GeometryError::NotInvertible`]. The [`finite`],
//! [`non_negative`] and [`finite_point`] checks are exported for types built
//! on top of these, such as scene primitives.
//!
//! ```rust
//! use kurbo::Point;
//! use vellum_geometry::{BoundingBox, Transform};
//!
//! let parent = Transform::translate(20.0, 0.0)?;
//! let local = Transform::scale(2.0)?;
//! let world = parent.compose(local);
//! assert_eq!(world.apply_to_point(Point::new(1.0, 1.0)), Point::new(22.0, 2.0));
//!
//! let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0)?;
//! let b = BoundingBox::new(10.0, 0.0, 5.0, 5.0)?;
//! assert!(!a.intersects(&b));
//! assert_eq!(a.union(&b).width(), 15.0);
//! # Ok::<(), vellum_geometry::GeometryError>(())
//! ```
//!
//! This crate is `no_std` and uses `kurbo` for its point, vector and rectangle types.

#![no_std]

mod bounding_box;
mod error;
mod extent;
mod transform;

pub use bounding_box::BoundingBox;
pub use error::{GeometryError, finite, finite_point, non_negative};
pub use extent::Extent;
pub use transform::{Decomposition, EPSILON, Transform};

pub use kurbo::{Point, Rect, Vec2};

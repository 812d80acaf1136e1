// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_scene --heading-base-level=0

//! Vellum Scene: the drawable tree that Vellum renderers walk.
//!
//! A scene is a tree of [`Node`]s. Leaves are primitives ([`Circle`],
//! [`Rectangle`], [`Ellipse`], [`Line`]) carrying geometry in their local
//! frame, a local [`Transform`](vellum_geometry::Transform) and a [`Style`].
//! Containers ([`Group`], [`Layer`], [`Canvas`]) own their children
//! exclusively; there are no shared or back references.
//!
//! Renderers consume nodes through two capability traits:
//!
//! - [`Drawable`]: kind, local transform, z-index, name, opacity, visibility
//!   and transform-aware bounds.
//! - [`Container`]: children in insertion order and in traversal order.
//!   Groups and layers visit children stably sorted by z-index; the canvas
//!   keeps insertion order.
//!
//! Primitive and canvas constructors reject NaN, infinite and negative
//! geometry with a [`GeometryError`](vellum_geometry::GeometryError), so every
//! node in a tree is finite.
//!
//! Bounds follow a single contract: a primitive's box is the axis-aligned box
//! of its outline under `parent ∘ local`, and a container folds its children
//! under `parent ∘ container.local`.
//!
//! ```rust
//! use vellum_geometry::{BoundingBox, Transform};
//! use vellum_scene::{Circle, Drawable, Group, Layer};
//!
//! let layer = Layer::new("shapes").with_opacity(0.5).with_child(
//!     Group::new().with_child(
//!         Circle::new((10.0, 10.0), 5.0)?.with_transform(Transform::translate(20.0, 0.0)?),
//!     ),
//! );
//! assert_eq!(layer.bounds()?, Some(BoundingBox::new(25.0, 5.0, 10.0, 10.0)?));
//! # Ok::<(), vellum_geometry::GeometryError>(())
//! ```
//!
//! This crate is `no_std` and uses `peniko` for colors and blend modes.

#![no_std]

extern crate alloc;

mod containers;
mod node;
mod shapes;
mod style;

pub use containers::{Canvas, Group, Layer};
pub use node::{Container, Drawable, Node, NodeKind, z_ordered};
pub use shapes::{Circle, Ellipse, Line, Rectangle};
pub use style::{Style, Styled};

pub use peniko::{Color, Mix};

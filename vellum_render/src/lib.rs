// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=vellum_render --heading-base-level=0

//! Vellum Render: the traversal engine behind every Vellum output format.
//!
//! A [`Renderer`] walks a [`vellum_scene::Node`] tree depth-first while a
//! [`RenderContext`] threads two synchronized stacks through the descent:
//!
//! - the accumulated transform, composed as `accumulated.compose(local)` so a
//!   parent's frame wraps its children's;
//! - the inherited [`RenderState`] (fill, stroke, stroke width, opacity,
//!   visibility), patched per frame with a [`StatePatch`].
//!
//! Effective opacity is the product over every frame; visibility is the
//! conjunction over every frame, so one hidden ancestor hides its subtree.
//!
//! Concrete renderers implement the four primitive visits and their output
//! handling. Groups, layers and the canvas are walked by [`walk_group`],
//! [`walk_layer`] and [`walk_canvas`] unless a renderer overrides them.
//! Container frames are held by a [`FrameScope`] guard, so a failing child
//! never leaves the stacks out of balance.
//!
//! [`render`] drives a whole pass and guarantees that
//! [`Renderer::end_render`] runs even when traversal fails.
//!
//! [`BoundsAccumulator`] is the reference renderer: it reports the
//! world-space box of everything drawn.
//!
//! ```rust
//! use vellum_geometry::{BoundingBox, Transform};
//! use vellum_render::{BoundsAccumulator, Renderer};
//! use vellum_scene::{Canvas, Circle, Group, Layer, Node};
//!
//! let scene = Node::from(Canvas::new(100.0, 100.0)?.with_child(
//!     Layer::new("main").with_opacity(0.5).with_child(
//!         Group::new().with_child(
//!             Circle::new((10.0, 10.0), 5.0)?.with_transform(Transform::translate(20.0, 0.0)?),
//!         ),
//!     ),
//! ));
//! let bounds = BoundsAccumulator::new().render(&scene)?;
//! assert_eq!(bounds, Some(BoundingBox::new(25.0, 5.0, 10.0, 10.0)?));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Traversal is recursive, so stack usage grows with scene nesting depth.
//!
//! This crate is `no_std` and logs through `tracing`.

#![no_std]

extern crate alloc;

mod bounds;
mod context;
mod error;
mod renderer;
mod state;

pub use bounds::BoundsAccumulator;
pub use context::{ContextScope, RenderContext};
pub use error::RenderError;
pub use renderer::{Accept, FrameScope, Renderer, render, walk_canvas, walk_group, walk_layer};
pub use state::{RenderState, StatePatch};

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use vellum_geometry::{BoundingBox, Extent, GeometryError};
use vellum_scene::{Circle, Drawable, Ellipse, Line, Rectangle};

use crate::{RenderContext, RenderError, Renderer};

/// A renderer that folds the world-space bounds of every drawn primitive.
///
/// Each visited primitive contributes the axis-aligned box of its outline under
/// `current_transform ∘ local`, the same contract as [`Drawable::bounds`].
/// Hidden subtrees contribute nothing. The output is `None` when no primitive
/// was visited. A box that overflows under the accumulated transform fails the
/// render with [`RenderError::Geometry`].
#[derive(Clone, Debug, Default)]
pub struct BoundsAccumulator {
    context: RenderContext,
    extent: Extent,
    bounds: Option<BoundingBox>,
}

impl BoundsAccumulator {
    /// A fresh accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds accumulated so far.
    pub fn bounding_box(&self) -> Result<Option<BoundingBox>, GeometryError> {
        self.extent.to_bounding_box()
    }

    fn include(&mut self, shape: &dyn Drawable) -> Result<(), RenderError> {
        if let Some(bbox) = shape.bounds_under(self.context.current_transform())? {
            self.extent.add_box(bbox);
        }
        Ok(())
    }
}

impl Renderer for BoundsAccumulator {
    type Output = Option<BoundingBox>;

    fn context(&self) -> &RenderContext {
        &self.context
    }

    fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    fn clear_output(&mut self) {
        self.extent.clear();
        self.bounds = None;
    }

    fn end_render(&mut self) -> Result<(), RenderError> {
        self.bounds = self.bounding_box()?;
        Ok(())
    }

    fn output(&self) -> Self::Output {
        self.bounds
    }

    fn visit_circle(&mut self, circle: &Circle) -> Result<(), RenderError> {
        self.include(circle)
    }

    fn visit_rectangle(&mut self, rectangle: &Rectangle) -> Result<(), RenderError> {
        self.include(rectangle)
    }

    fn visit_ellipse(&mut self, ellipse: &Ellipse) -> Result<(), RenderError> {
        self.include(ellipse)
    }

    fn visit_line(&mut self, line: &Line) -> Result<(), RenderError> {
        self.include(line)
    }
}

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;
use vellum_geometry::Transform;

/// Visual attributes inherited down the tree during traversal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    /// Accumulated transform at the frame that produced this state.
    pub transform: Transform,
    /// Inherited fill paint.
    pub fill: Option<Color>,
    /// Inherited stroke paint.
    pub stroke: Option<Color>,
    /// Inherited stroke width.
    pub stroke_width: f64,
    /// Opacity contributed by this frame alone.
    pub opacity: f64,
    /// Visibility contributed by this frame alone.
    pub visible: bool,
}

impl RenderState {
    /// The base state: identity transform, no paint, width 1, opaque, visible.
    pub const DEFAULT: Self = Self {
        transform: Transform::IDENTITY,
        fill: None,
        stroke: None,
        stroke_width: 1.0,
        opacity: 1.0,
        visible: true,
    };

    /// A copy of this state with the fields named in `patch` replaced.
    #[must_use]
    pub fn patched(&self, patch: &StatePatch) -> Self {
        Self {
            transform: self.transform,
            fill: patch.fill.unwrap_or(self.fill),
            stroke: patch.stroke.unwrap_or(self.stroke),
            stroke_width: patch.stroke_width.unwrap_or(self.stroke_width),
            opacity: patch.opacity.unwrap_or(self.opacity),
            visible: patch.visible.unwrap_or(self.visible),
        }
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Field overrides applied when pushing a frame.
///
/// Unset fields are copied from the enclosing frame. Paints can also be
/// overridden with `None`, which clears an inherited paint for the subtree.
/// Fields are only reachable through the builders, which clamp ranged values.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StatePatch {
    fill: Option<Option<Color>>,
    stroke: Option<Option<Color>>,
    stroke_width: Option<f64>,
    opacity: Option<f64>,
    visible: Option<bool>,
}

impl StatePatch {
    /// A patch that overrides nothing.
    pub const fn new() -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: None,
            opacity: None,
            visible: None,
        }
    }

    /// Overrides the fill; `None` clears an inherited fill.
    #[must_use]
    pub fn fill(mut self, color: impl Into<Option<Color>>) -> Self {
        self.fill = Some(color.into());
        self
    }

    /// Overrides the stroke; `None` clears an inherited stroke.
    #[must_use]
    pub fn stroke(mut self, color: impl Into<Option<Color>>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    /// Overrides the stroke width. Negative and NaN widths become zero.
    #[must_use]
    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width.max(0.0));
        self
    }

    /// Overrides the opacity, clamped to `[0, 1]`. NaN becomes zero.
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(if opacity.is_nan() {
            0.0
        } else {
            opacity.clamp(0.0, 1.0)
        });
        self
    }

    /// Overrides visibility.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = Some(visible);
        self
    }

    /// The fill override, if any.
    pub fn fill_override(&self) -> Option<Option<Color>> {
        self.fill
    }

    /// The stroke override, if any.
    pub fn stroke_override(&self) -> Option<Option<Color>> {
        self.stroke
    }

    /// The stroke width override, if any.
    pub fn stroke_width_override(&self) -> Option<f64> {
        self.stroke_width
    }

    /// The opacity override, if any.
    pub fn opacity_override(&self) -> Option<f64> {
        self.opacity
    }

    /// The visibility override, if any.
    pub fn visible_override(&self) -> Option<bool> {
        self.visible
    }

    /// Whether no field is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }
}

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Paint and visibility attributes carried by every primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    /// Interior paint; `None` inherits from the enclosing render state.
    pub fill: Option<Color>,
    /// Outline paint; `None` inherits from the enclosing render state.
    pub stroke: Option<Color>,
    /// Outline width, used together with [`stroke`](Self::stroke).
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Hidden primitives are skipped during traversal.
    pub visible: bool,
}

impl Style {
    /// The default style: no paint, 1px stroke width, fully opaque, visible.
    pub const DEFAULT: Self = Self {
        fill: None,
        stroke: None,
        stroke_width: 1.0,
        opacity: 1.0,
        visible: true,
    };

    /// Whether a fill paint is set.
    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }

    /// Whether a stroke paint is set with a positive width.
    pub fn is_stroked(&self) -> bool {
        self.stroke.is_some() && self.stroke_width > 0.0
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Fluent style builders shared by every primitive.
pub trait Styled: Sized {
    /// The primitive's style.
    fn style(&self) -> &Style;

    /// Mutable access to the primitive's style.
    fn style_mut(&mut self) -> &mut Style;

    /// Replaces the whole style.
    #[must_use]
    fn with_style(mut self, style: Style) -> Self {
        *self.style_mut() = style;
        self
    }

    /// Sets the fill paint.
    #[must_use]
    fn with_fill(mut self, color: Color) -> Self {
        self.style_mut().fill = Some(color);
        self
    }

    /// Sets the stroke paint and width. Negative widths clamp to zero.
    #[must_use]
    fn with_stroke(mut self, color: Color, width: f64) -> Self {
        let style = self.style_mut();
        style.stroke = Some(color);
        style.stroke_width = width.max(0.0);
        self
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    #[must_use]
    fn with_opacity(mut self, opacity: f64) -> Self {
        self.style_mut().opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Shows or hides the primitive.
    #[must_use]
    fn with_visibility(mut self, visible: bool) -> Self {
        self.style_mut().visible = visible;
        self
    }
}

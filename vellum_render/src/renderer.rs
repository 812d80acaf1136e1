// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visitor dispatch and default container traversal.

use core::fmt;
use core::ops::{Deref, DerefMut};

use tracing::{debug, trace, warn};
use vellum_geometry::Transform;
use vellum_scene::{
    Canvas, Circle, Container, Drawable, Ellipse, Group, Layer, Line, Node, Rectangle,
};

use crate::{RenderContext, RenderError, StatePatch};

/// A visitor over scene nodes that produces some output.
///
/// Implementors provide the four primitive visits and the output buffer
/// management. Container visits default to [`walk_group`], [`walk_layer`] and
/// [`walk_canvas`], which push a frame, visit children in order and pop the
/// frame again.
///
/// Primitive visits see the accumulated transform of their ancestors in
/// [`RenderContext::current_transform`]; the primitive's own transform is not
/// pushed and should be applied with [`RenderContext::transform_for`].
pub trait Renderer {
    /// What [`render`](Self::render) returns.
    type Output;

    /// The traversal context.
    fn context(&self) -> &RenderContext;

    /// Mutable access to the traversal context.
    fn context_mut(&mut self) -> &mut RenderContext;

    /// Discards any output accumulated by a previous render.
    fn clear_output(&mut self);

    /// Called once before the root is visited.
    fn begin_render(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Called once after the root is visited, even when traversal failed.
    fn end_render(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// The accumulated output.
    fn output(&self) -> Self::Output;

    /// Called before a container's frame is pushed.
    fn pre_visit(&mut self, _node: &dyn Drawable) {}

    /// Called after a container's frame is popped, if its subtree succeeded.
    fn post_visit(&mut self, _node: &dyn Drawable) {}

    /// Visits a circle.
    fn visit_circle(&mut self, circle: &Circle) -> Result<(), RenderError>;

    /// Visits a rectangle.
    fn visit_rectangle(&mut self, rectangle: &Rectangle) -> Result<(), RenderError>;

    /// Visits an ellipse.
    fn visit_ellipse(&mut self, ellipse: &Ellipse) -> Result<(), RenderError>;

    /// Visits a line.
    fn visit_line(&mut self, line: &Line) -> Result<(), RenderError>;

    /// Visits a group. Defaults to [`walk_group`].
    fn visit_group(&mut self, group: &Group) -> Result<(), RenderError> {
        walk_group(self, group)
    }

    /// Visits a layer. Defaults to [`walk_layer`].
    fn visit_layer(&mut self, layer: &Layer) -> Result<(), RenderError> {
        walk_layer(self, layer)
    }

    /// Visits the root canvas. Defaults to [`walk_canvas`].
    fn visit_canvas(&mut self, canvas: &Canvas) -> Result<(), RenderError> {
        walk_canvas(self, canvas)
    }

    /// Renders the tree rooted at `root`. See [`render`].
    fn render(&mut self, root: &Node) -> Result<Self::Output, RenderError>
    where
        Self: Sized,
    {
        render(self, root)
    }
}

/// Routes a node to the matching `visit_*` method of a renderer.
pub trait Accept {
    /// Dispatches `self` to `renderer`.
    fn accept<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError>;
}

impl Accept for Node {
    fn accept<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
        match self {
            Self::Circle(node) => node.accept(renderer),
            Self::Rectangle(node) => node.accept(renderer),
            Self::Ellipse(node) => node.accept(renderer),
            Self::Line(node) => node.accept(renderer),
            Self::Group(node) => node.accept(renderer),
            Self::Layer(node) => node.accept(renderer),
            Self::Canvas(node) => node.accept(renderer),
        }
    }
}

macro_rules! accept_primitive {
    ($ty:ident, $visit:ident) => {
        impl Accept for $ty {
            fn accept<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
                if !self.style.visible {
                    trace!(kind = self.kind().as_str(), "skipping hidden primitive");
                    return Ok(());
                }
                trace!(kind = self.kind().as_str(), "visit");
                renderer.$visit(self)
            }
        }
    };
}

accept_primitive!(Circle, visit_circle);
accept_primitive!(Rectangle, visit_rectangle);
accept_primitive!(Ellipse, visit_ellipse);
accept_primitive!(Line, visit_line);

impl Accept for Group {
    fn accept<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
        trace!(name = self.name(), "visit group");
        renderer.visit_group(self)
    }
}

impl Accept for Layer {
    fn accept<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
        trace!(name = %self.name, "visit layer");
        renderer.visit_layer(self)
    }
}

impl Accept for Canvas {
    fn accept<R: Renderer + ?Sized>(&self, renderer: &mut R) -> Result<(), RenderError> {
        trace!(width = self.width(), height = self.height(), "visit canvas");
        renderer.visit_canvas(self)
    }
}

/// Renders the tree rooted at `root` with `renderer`.
///
/// Resets the context, clears previous output, calls
/// [`begin_render`](Renderer::begin_render), dispatches into `root`, and then
/// always calls [`end_render`](Renderer::end_render). A traversal error is
/// returned after finalization has run; otherwise an error from
/// `end_render` is returned; otherwise the renderer's output.
pub fn render<R: Renderer + ?Sized>(
    renderer: &mut R,
    root: &Node,
) -> Result<R::Output, RenderError> {
    renderer.context_mut().reset();
    renderer.clear_output();
    debug!(root = root.kind().as_str(), nodes = root.node_count(), "render begin");
    renderer.begin_render()?;
    let walked = root.accept(renderer);
    if let Err(err) = &walked {
        warn!(error = %err, "traversal failed, finalizing partial output");
    }
    let finished = renderer.end_render();
    walked?;
    finished?;
    debug!("render end");
    Ok(renderer.output())
}

/// A container frame pushed on a renderer's context, popped on drop.
///
/// Dereferences to the renderer so children can be dispatched through it.
pub struct FrameScope<'a, R: Renderer + ?Sized> {
    renderer: &'a mut R,
    depth: usize,
}

impl<'a, R: Renderer + ?Sized> FrameScope<'a, R> {
    /// Pushes the frame a container needs, if any.
    ///
    /// A frame is pushed when the container has a non-identity transform, an
    /// opacity below 1 or is hidden. Otherwise the scope is a pass-through.
    pub fn enter(renderer: &'a mut R, container: &dyn Drawable) -> Self {
        let depth = renderer.context().depth();
        if let Some((transform, patch)) = container_frame(container) {
            renderer.context_mut().push(transform, patch);
        }
        Self { renderer, depth }
    }

    /// Whether this scope pushed a frame.
    pub fn pushed(&self) -> bool {
        self.renderer.context().depth() > self.depth
    }
}

impl<R: Renderer + ?Sized> Deref for FrameScope<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> DerefMut for FrameScope<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.renderer
    }
}

impl<R: Renderer + ?Sized> Drop for FrameScope<'_, R> {
    fn drop(&mut self) {
        self.renderer.context_mut().unwind_to(self.depth);
    }
}

impl<R: Renderer + ?Sized> fmt::Debug for FrameScope<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameScope")
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}

fn container_frame(node: &dyn Drawable) -> Option<(Option<Transform>, StatePatch)> {
    let transform = node.local_transform();
    let opacity = node.opacity();
    let visible = node.visible();
    if transform.is_identity() && opacity >= 1.0 && visible {
        return None;
    }
    let transform = (!transform.is_identity()).then_some(transform);
    Some((transform, StatePatch::new().opacity(opacity).visible(visible)))
}

fn walk_container<R, C>(renderer: &mut R, container: &C) -> Result<(), RenderError>
where
    R: Renderer + ?Sized,
    C: Container,
{
    renderer.pre_visit(container);
    {
        let mut scope = FrameScope::enter(renderer, container);
        for child in container.ordered_children() {
            if !scope.context().is_visible() {
                trace!(kind = container.kind().as_str(), "subtree hidden, skipping children");
                break;
            }
            child.accept(&mut *scope)?;
        }
    }
    renderer.post_visit(container);
    Ok(())
}

/// Default group traversal: push the group's frame, visit children by z-index, pop.
pub fn walk_group<R: Renderer + ?Sized>(
    renderer: &mut R,
    group: &Group,
) -> Result<(), RenderError> {
    walk_container(renderer, group)
}

/// Default layer traversal: push the layer's frame (transform, opacity,
/// visibility), visit children by z-index, pop.
pub fn walk_layer<R: Renderer + ?Sized>(
    renderer: &mut R,
    layer: &Layer,
) -> Result<(), RenderError> {
    walk_container(renderer, layer)
}

/// Default canvas traversal: push the canvas frame, visit children in
/// insertion order, pop.
pub fn walk_canvas<R: Renderer + ?Sized>(
    renderer: &mut R,
    canvas: &Canvas,
) -> Result<(), RenderError> {
    walk_container(renderer, canvas)
}

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container nodes: groups, layers and the root canvas.

use alloc::string::String;
use alloc::vec::Vec;

use peniko::{Color, Mix};
use vellum_geometry::{BoundingBox, GeometryError, Transform, non_negative};

use crate::node::{children_bounds, z_ordered};
use crate::{Container, Drawable, Node, NodeKind};

/// A named collection of nodes sharing a transform.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Group {
    /// Optional identifier, emitted as the element id by markup renderers.
    pub name: Option<String>,
    /// Ordering key among siblings.
    pub z_index: i32,
    /// Local transform.
    pub transform: Transform,
    /// Children in insertion order.
    pub children: Vec<Node>,
}

impl Group {
    /// An empty, unnamed group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Removes the child at `index`; out-of-range indices leave the group unchanged.
    #[must_use]
    pub fn without_child(mut self, index: usize) -> Self {
        if index < self.children.len() {
            self.children.remove(index);
        }
        self
    }
}

impl Drawable for Group {
    fn kind(&self) -> NodeKind {
        NodeKind::Group
    }

    fn local_transform(&self) -> Transform {
        self.transform
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn bounds_under(&self, parent: Transform) -> Result<Option<BoundingBox>, GeometryError> {
        children_bounds(&self.children, parent.compose(self.transform))
    }
}

impl Container for Group {
    fn children(&self) -> &[Node] {
        &self.children
    }

    fn ordered_children(&self) -> Vec<&Node> {
        z_ordered(&self.children)
    }
}

/// A group with compositing attributes.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    /// Identifier; markup renderers emit it as `layer_<name>`.
    pub name: String,
    /// Opacity applied to the whole layer, in `[0, 1]`.
    pub opacity: f64,
    /// Blend mode used when compositing the layer.
    pub blend: Mix,
    /// Hidden layers are skipped with their whole subtree.
    pub visible: bool,
    /// Locked layers are drawn but not editable.
    pub locked: bool,
    /// Ordering key among siblings.
    pub z_index: i32,
    /// Local transform.
    pub transform: Transform,
    /// Children in insertion order.
    pub children: Vec<Node>,
}

impl Default for Layer {
    fn default() -> Self {
        Self {
            name: String::from("Layer"),
            opacity: 1.0,
            blend: Mix::Normal,
            visible: true,
            locked: false,
            z_index: 0,
            transform: Transform::IDENTITY,
            children: Vec::new(),
        }
    }
}

impl Layer {
    /// An empty layer with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Sets the blend mode.
    #[must_use]
    pub fn with_blend(mut self, blend: Mix) -> Self {
        self.blend = blend;
        self
    }

    /// Shows or hides the layer.
    #[must_use]
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Locks or unlocks the layer.
    #[must_use]
    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    /// Sets the z-index.
    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Removes the child at `index`; out-of-range indices leave the layer unchanged.
    #[must_use]
    pub fn without_child(mut self, index: usize) -> Self {
        if index < self.children.len() {
            self.children.remove(index);
        }
        self
    }

    /// Visible and unlocked.
    pub fn is_editable(&self) -> bool {
        self.visible && !self.locked
    }
}

impl Drawable for Layer {
    fn kind(&self) -> NodeKind {
        NodeKind::Layer
    }

    fn local_transform(&self) -> Transform {
        self.transform
    }

    fn z_index(&self) -> i32 {
        self.z_index
    }

    fn name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn bounds_under(&self, parent: Transform) -> Result<Option<BoundingBox>, GeometryError> {
        children_bounds(&self.children, parent.compose(self.transform))
    }
}

impl Container for Layer {
    fn children(&self) -> &[Node] {
        &self.children
    }

    fn ordered_children(&self) -> Vec<&Node> {
        z_ordered(&self.children)
    }
}

/// The root of a drawing.
///
/// A canvas has no z-index of its own and visits its children in insertion
/// order.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    width: f64,
    height: f64,
    /// Optional document title.
    pub title: Option<String>,
    /// Optional document description.
    pub description: Option<String>,
    /// Optional background paint covering the whole canvas.
    pub background: Option<Color>,
    /// Local transform.
    pub transform: Transform,
    /// Children in insertion order.
    pub children: Vec<Node>,
}

impl Canvas {
    /// An empty canvas of the given size with a white background.
    ///
    /// Both dimensions must be finite and not negative.
    pub fn new(width: f64, height: f64) -> Result<Self, GeometryError> {
        Ok(Self {
            width: non_negative("width", width)?,
            height: non_negative("height", height)?,
            title: None,
            description: None,
            background: Some(Color::WHITE),
            transform: Transform::IDENTITY,
            children: Vec::new(),
        })
    }

    /// Drawing width.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Drawing height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets or clears the background paint.
    #[must_use]
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Replaces the local transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Appends a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Removes the child at `index`; out-of-range indices leave the canvas unchanged.
    #[must_use]
    pub fn without_child(mut self, index: usize) -> Self {
        if index < self.children.len() {
            self.children.remove(index);
        }
        self
    }

    /// The drawing area `(0, 0, width, height)`.
    pub fn canvas_bounds(&self) -> Result<BoundingBox, GeometryError> {
        BoundingBox::new(0.0, 0.0, self.width, self.height)
    }

    /// Direct children that are layers, in insertion order.
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.children.iter().filter_map(|child| match child {
            Node::Layer(layer) => Some(layer),
            _ => None,
        })
    }

    /// Direct children that are groups, in insertion order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.children.iter().filter_map(|child| match child {
            Node::Group(group) => Some(group),
            _ => None,
        })
    }

    /// Layers stably sorted by z-index.
    pub fn layers_sorted(&self) -> Vec<&Layer> {
        let mut layers: Vec<&Layer> = self.layers().collect();
        layers.sort_by_key(|layer| layer.z_index);
        layers
    }
}

impl Drawable for Canvas {
    fn kind(&self) -> NodeKind {
        NodeKind::Canvas
    }

    fn local_transform(&self) -> Transform {
        self.transform
    }

    fn name(&self) -> Option<&str> {
        self.title.as_deref()
    }

    fn bounds_under(&self, parent: Transform) -> Result<Option<BoundingBox>, GeometryError> {
        children_bounds(&self.children, parent.compose(self.transform))
    }
}

impl Container for Canvas {
    fn children(&self) -> &[Node] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Circle, Line, Rectangle};

    fn bb(x: f64, y: f64, w: f64, h: f64) -> BoundingBox {
        BoundingBox::new(x, y, w, h).unwrap()
    }

    #[test]
    fn group_bounds_include_child_transforms() {
        let group = Group::new()
            .with_transform(Transform::translate(100.0, 0.0).unwrap())
            .with_child(
                Circle::new((10.0, 10.0), 5.0)
                    .unwrap()
                    .with_transform(Transform::translate(20.0, 0.0).unwrap()),
            )
            .with_child(Rectangle::new(0.0, 0.0, 4.0, 4.0).unwrap());
        assert_eq!(group.bounds(), Ok(Some(bb(100.0, 0.0, 35.0, 15.0))));
    }

    #[test]
    fn empty_containers_have_no_bounds() {
        assert_eq!(Group::new().bounds(), Ok(None));
        assert_eq!(Layer::new("empty").bounds(), Ok(None));
        assert_eq!(Canvas::new(10.0, 10.0).unwrap().bounds(), Ok(None));
    }

    #[test]
    fn horizontal_line_still_contributes() {
        let layer = Layer::new("l")
            .with_child(Line::new((0.0, 0.0), (10.0, 0.0)).unwrap())
            .with_child(Circle::new((0.0, 20.0), 1.0).unwrap());
        assert_eq!(layer.bounds(), Ok(Some(bb(-1.0, 0.0, 11.0, 21.0))));
    }

    #[test]
    fn overflowing_child_bounds_propagate() {
        let group = Group::new()
            .with_transform(Transform::scale(f64::MAX).unwrap())
            .with_child(Rectangle::new(0.0, 0.0, 4.0, 4.0).unwrap());
        assert!(group.bounds().is_err());
    }

    #[test]
    fn without_child_ignores_out_of_range() {
        let group = Group::new()
            .with_child(Circle::new((0.0, 0.0), 1.0).unwrap())
            .with_child(Circle::new((1.0, 0.0), 1.0).unwrap())
            .without_child(0)
            .without_child(5);
        assert_eq!(group.children.len(), 1);
    }

    #[test]
    fn canvas_keeps_insertion_order() {
        let canvas = Canvas::new(100.0, 50.0)
            .unwrap()
            .with_child(Layer::new("top").with_z_index(5))
            .with_child(Group::new().with_name("g"))
            .with_child(Layer::new("bottom").with_z_index(-1));
        let order: Vec<_> = canvas
            .ordered_children()
            .into_iter()
            .map(|n| n.kind())
            .collect();
        assert_eq!(order, [NodeKind::Layer, NodeKind::Group, NodeKind::Layer]);

        let sorted: Vec<_> = canvas
            .layers_sorted()
            .into_iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(sorted, ["bottom", "top"]);
        assert_eq!(canvas.groups().count(), 1);
        assert_eq!(canvas.canvas_bounds(), Ok(bb(0.0, 0.0, 100.0, 50.0)));
    }

    #[test]
    fn canvas_rejects_bad_size() {
        assert!(matches!(
            Canvas::new(-1.0, 10.0),
            Err(GeometryError::NegativeSize { name: "width", .. })
        ));
        assert!(matches!(
            Canvas::new(10.0, f64::NAN),
            Err(GeometryError::InvalidCoordinate { name: "height", .. })
        ));
    }

    #[test]
    fn layer_editability() {
        assert!(Layer::new("a").is_editable());
        assert!(!Layer::new("a").with_locked(true).is_editable());
        assert!(!Layer::new("a").with_visibility(false).is_editable());
        assert_eq!(Layer::new("a").with_opacity(-0.5).opacity, 0.0);
    }
}

// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use vellum_geometry::{BoundingBox, Extent, GeometryError, Transform};

use crate::{Canvas, Circle, Ellipse, Group, Layer, Line, Rectangle};

/// The closed set of drawable kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Circle`].
    Circle,
    /// [`Rectangle`].
    Rectangle,
    /// [`Ellipse`].
    Ellipse,
    /// [`Line`].
    Line,
    /// [`Group`].
    Group,
    /// [`Layer`].
    Layer,
    /// [`Canvas`].
    Canvas,
}

impl NodeKind {
    /// Whether nodes of this kind own children.
    pub const fn is_container(self) -> bool {
        matches!(self, Self::Group | Self::Layer | Self::Canvas)
    }

    /// Lowercase name, for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Rectangle => "rectangle",
            Self::Ellipse => "ellipse",
            Self::Line => "line",
            Self::Group => "group",
            Self::Layer => "layer",
            Self::Canvas => "canvas",
        }
    }
}

/// What traversal and bounds code needs to know about any node.
pub trait Drawable {
    /// The node's kind.
    fn kind(&self) -> NodeKind;

    /// The node's own transform, not yet composed with its ancestors.
    fn local_transform(&self) -> Transform;

    /// Sibling ordering key. Kinds without one report 0.
    fn z_index(&self) -> i32 {
        0
    }

    /// Optional identifier.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Opacity applied to the node and its subtree.
    fn opacity(&self) -> f64 {
        1.0
    }

    /// Whether the node and its subtree are drawn.
    fn visible(&self) -> bool {
        true
    }

    /// World-space bounds when the parent frame is `parent`.
    ///
    /// Primitives report the axis-aligned box of their outline under
    /// `parent ∘ local`. Containers fold their children's boxes under the same
    /// composition. Visibility is ignored. Returns `None` for an empty
    /// container, and an error when a box overflows under `parent`.
    fn bounds_under(&self, parent: Transform) -> Result<Option<BoundingBox>, GeometryError>;

    /// Bounds in the node's parent frame.
    fn bounds(&self) -> Result<Option<BoundingBox>, GeometryError> {
        self.bounds_under(Transform::IDENTITY)
    }
}

/// A drawable that owns children.
pub trait Container: Drawable {
    /// Children in insertion order.
    fn children(&self) -> &[Node];

    /// Children in traversal order.
    fn ordered_children(&self) -> Vec<&Node> {
        self.children().iter().collect()
    }
}

/// Children stably sorted by z-index, ties kept in insertion order.
pub fn z_ordered(children: &[Node]) -> Vec<&Node> {
    let mut ordered: Vec<&Node> = children.iter().collect();
    ordered.sort_by_key(|child| child.z_index());
    ordered
}

pub(crate) fn children_bounds(
    children: &[Node],
    frame: Transform,
) -> Result<Option<BoundingBox>, GeometryError> {
    let mut extent = Extent::new();
    for child in children {
        if let Some(bbox) = child.bounds_under(frame)? {
            extent.add_box(bbox);
        }
    }
    extent.to_bounding_box()
}

/// Any node of the scene tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// A circle.
    Circle(Circle),
    /// A rectangle.
    Rectangle(Rectangle),
    /// An ellipse.
    Ellipse(Ellipse),
    /// A line.
    Line(Line),
    /// A group.
    Group(Group),
    /// A layer.
    Layer(Layer),
    /// A root canvas.
    Canvas(Canvas),
}

impl Node {
    /// The node as a trait object.
    pub fn as_drawable(&self) -> &dyn Drawable {
        match self {
            Self::Circle(n) => n,
            Self::Rectangle(n) => n,
            Self::Ellipse(n) => n,
            Self::Line(n) => n,
            Self::Group(n) => n,
            Self::Layer(n) => n,
            Self::Canvas(n) => n,
        }
    }

    /// The node as a container, if it is one.
    pub fn as_container(&self) -> Option<&dyn Container> {
        match self {
            Self::Group(n) => Some(n),
            Self::Layer(n) => Some(n),
            Self::Canvas(n) => Some(n),
            _ => None,
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.as_container().map_or(0, |c| {
            c.children().iter().map(Self::node_count).sum::<usize>()
        })
    }
}

impl Drawable for Node {
    fn kind(&self) -> NodeKind {
        self.as_drawable().kind()
    }

    fn local_transform(&self) -> Transform {
        self.as_drawable().local_transform()
    }

    fn z_index(&self) -> i32 {
        self.as_drawable().z_index()
    }

    fn name(&self) -> Option<&str> {
        self.as_drawable().name()
    }

    fn opacity(&self) -> f64 {
        self.as_drawable().opacity()
    }

    fn visible(&self) -> bool {
        self.as_drawable().visible()
    }

    fn bounds_under(&self, parent: Transform) -> Result<Option<BoundingBox>, GeometryError> {
        self.as_drawable().bounds_under(parent)
    }
}

macro_rules! node_from {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Self::$ty(value)
                }
            }
        )*
    };
}

node_from!(Circle, Rectangle, Ellipse, Line, Group, Layer, Canvas);

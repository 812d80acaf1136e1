// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use vellum_geometry::{BoundingBox, GeometryError, Transform};
use vellum_render::{BoundsAccumulator, Renderer};
use vellum_render_svg::{SvgOptions, SvgRenderer};
use vellum_scene::{
    Canvas, Circle, Color, Ellipse, Group, Layer, Line, Mix, Node, Rectangle, Styled,
};

fn house() -> Result<Node, GeometryError> {
    let brown = Color::from_rgba8(139, 69, 19, 255);
    let sky = Color::from_rgba8(135, 206, 235, 255);
    let yellow = Color::from_rgba8(255, 215, 0, 255);
    let black = Color::from_rgba8(0, 0, 0, 255);

    let walls = Group::new()
        .with_name("walls")
        .with_z_index(1)
        .with_child(Rectangle::new(100.0, 150.0, 200.0, 150.0)?.with_fill(brown))
        .with_child(
            Rectangle::new(180.0, 220.0, 40.0, 80.0)?
                .with_fill(black)
                .with_opacity(0.8),
        );
    let sun = Group::new()
        .with_name("sun")
        .with_z_index(0)
        .with_transform(Transform::translate(320.0, 60.0)?)
        .with_child(Circle::new((0.0, 0.0), 30.0)?.with_fill(yellow))
        .with_child(Line::new((35.0, 0.0), (50.0, 0.0))?.with_stroke(yellow, 2.0));
    let shadow = Ellipse::new((200.0, 305.0), 120.0, 10.0)?.with_fill(black);

    Ok(Node::from(
        Canvas::new(400.0, 320.0)?
            .with_title("House")
            .with_background(Some(sky))
            .with_children([
                Node::from(
                    Layer::new("scene")
                        .with_blend(Mix::Normal)
                        .with_children([walls, sun]),
                ),
                Node::from(
                    Layer::new("shadow")
                        .with_opacity(0.3)
                        .with_blend(Mix::Multiply)
                        .with_child(shadow),
                ),
                Node::from(
                    Layer::new("draft")
                        .with_visibility(false)
                        .with_child(Rectangle::new(0.0, 0.0, 1000.0, 1000.0)?),
                ),
            ]),
    ))
}

#[test]
fn document_mirrors_scene_structure() {
    let svg = SvgRenderer::default().render(&house().unwrap()).unwrap();

    assert!(svg.starts_with("<?xml"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains(r#"width="400" height="320""#));
    assert!(svg.contains("<title>House</title>"));
    assert!(svg.contains(r##"fill="#87ceeb""##));

    // Lower z-index first inside the layer.
    let sun = svg.find(r#"<g id="sun">"#).unwrap();
    let walls = svg.find(r#"<g id="walls">"#).unwrap();
    assert!(sun < walls);

    // Layers keep canvas insertion order; the hidden one is absent.
    let scene = svg.find(r#"<g id="layer_scene">"#).unwrap();
    let shadow = svg
        .find(r#"<g id="layer_shadow" style="mix-blend-mode:multiply">"#)
        .unwrap();
    assert!(scene < shadow);
    assert!(!svg.contains("layer_draft"));
    assert!(!svg.contains(r#"width="1000""#));

    // Group transforms only appear on leaves.
    assert!(svg.contains(
        r##"<circle cx="0" cy="0" r="30" transform="matrix(1 0 0 1 320 60)" fill="#ffd700" stroke="none"/>"##
    ));
    assert!(!svg.contains("<g transform"));

    // Layer opacity folds into its leaves; the door keeps its own.
    assert!(svg.contains(r#"opacity="0.3""#));
    assert!(svg.contains(r#"opacity="0.8""#));

    assert_eq!(svg.matches("<g").count(), svg.matches("</g>").count());
}

#[test]
fn rendering_is_repeatable() {
    let scene = house().unwrap();
    let mut renderer = SvgRenderer::new(SvgOptions {
        precision: 2,
        ..SvgOptions::default()
    });
    let first = renderer.render(&scene).unwrap();
    let second = renderer.render(&scene).unwrap();
    assert_eq!(first, second);
    assert_eq!(renderer.context().depth(), 1);
}

#[test]
fn bounds_match_what_is_drawn() {
    let bounds = BoundsAccumulator::new()
        .render(&house().unwrap())
        .unwrap()
        .unwrap();
    // Sun rays reach x = 370, the sun top y = 30, the shadow bottom y = 315.
    assert!(
        bounds.approx_eq(&BoundingBox::new(80.0, 30.0, 290.0, 285.0).unwrap(), 1e-9),
        "{bounds:?}"
    );
}

#[test]
fn markup_only_contains_finite_numbers() {
    let svg = SvgRenderer::default().render(&house().unwrap()).unwrap();
    assert!(!svg.contains("NaN"));
    assert!(!svg.contains("inf"));
    assert!(!svg.contains(r#"r="-"#));
    assert!(matches!(
        Circle::new((f64::NAN, 0.0), 5.0),
        Err(GeometryError::InvalidCoordinate { name: "cx", .. })
    ));
}

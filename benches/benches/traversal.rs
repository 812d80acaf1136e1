// Copyright 2025 the Vellum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Benchmarks for scene traversal: bounds accumulation, standalone bounds and SVG export.
//!
//! Scenes are deterministic grids of layers holding rotated groups of primitives, so runs are
//! comparable across machines and commits.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vellum_geometry::{GeometryError, Transform};
use vellum_render::{BoundsAccumulator, Renderer};
use vellum_render_svg::SvgRenderer;
use vellum_scene::{
    Canvas, Circle, Color, Drawable, Ellipse, Group, Layer, Line, Node, Rectangle, Styled,
};

fn scene(layers: usize, groups_per_layer: usize) -> Result<Node, GeometryError> {
    let fill = Color::from_rgba8(40, 120, 200, 255);
    let stroke = Color::from_rgba8(20, 20, 20, 255);
    let mut canvas = Canvas::new(1024.0, 1024.0)?;
    for l in 0..layers {
        let mut layer = Layer::new(format!("layer{l}")).with_opacity(0.9);
        for g in 0..groups_per_layer {
            let x = (g % 16) as f64 * 64.0;
            let y = (g / 16) as f64 * 64.0;
            let transform = Transform::translate(x, y)?.then_rotate(0.05 * g as f64)?;
            let group = Group::new()
                .with_z_index((g % 3) as i32)
                .with_transform(transform)
                .with_child(Circle::new((8.0, 8.0), 6.0)?.with_fill(fill))
                .with_child(Rectangle::new(16.0, 0.0, 12.0, 8.0)?.with_stroke(stroke, 1.0))
                .with_child(Ellipse::new((40.0, 8.0), 8.0, 4.0)?.with_opacity(0.5))
                .with_child(Line::new((0.0, 20.0), (48.0, 20.0))?.with_stroke(stroke, 0.5));
            layer = layer.with_child(group);
        }
        canvas = canvas.with_child(layer);
    }
    Ok(Node::from(canvas))
}

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal");
    for &(layers, groups) in &[(1_usize, 16_usize), (4, 64), (8, 256)] {
        let root = scene(layers, groups).expect("benchmark scene geometry is finite");
        let label = format!("{}x{}", layers, groups);

        group.bench_function(BenchmarkId::new("bounds_accumulator", &label), |b| {
            let mut acc = BoundsAccumulator::new();
            b.iter(|| black_box(acc.render(black_box(&root))));
        });

        group.bench_function(BenchmarkId::new("standalone_bounds", &label), |b| {
            b.iter(|| black_box(black_box(&root).bounds()));
        });

        group.bench_function(BenchmarkId::new("svg", &label), |b| {
            let mut svg = SvgRenderer::default();
            b.iter(|| black_box(svg.render(black_box(&root))));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_traversal);
criterion_main!(benches);

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Galatea-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Galatea and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use galatea::render::{render_lane_row, GraphGeometry, LanePalette};

mod fixtures;
mod profiler;

// Benchmark identity (keep stable):
// - Group name in this file: `render.lane`
// - Case IDs (the string after the `/`) must remain stable across refactors so
//   results stay comparable over time (`straight`, `merge_row`, `wide_busy`).
fn benches_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render.lane");
    let geometry = GraphGeometry::default();
    let palette = LanePalette::default();

    for case in [
        fixtures::graph::Case::Straight,
        fixtures::graph::Case::MergeRow,
        fixtures::graph::Case::WideBusy,
    ] {
        let (row, lane_count) = fixtures::graph::fixture(case);
        let palette = palette.clone();
        group.bench_function(case.id(), move |b| {
            b.iter(|| {
                let image = render_lane_row(
                    black_box(&row),
                    black_box(lane_count),
                    geometry,
                    &palette,
                );
                black_box(image.as_raw().len())
            })
        });
    }
    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_render
}
criterion_main!(benches);

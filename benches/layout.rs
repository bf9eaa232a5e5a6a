use criterion::{Criterion, black_box, criterion_group, criterion_main};
use drag_layout::{
    CanvasConfig, CanvasOptions, Item, ItemInput, ItemType, LayoutCanvas, LayoutType, Point,
    compact, move_element,
};

const COLS: u32 = 12;

/// A staggered dashboard of `count` grid items, deliberately left with gaps.
fn dashboard(count: usize) -> Vec<Item> {
    (0..count)
        .map(|idx| {
            let w = (idx % 4 + 1) as f64;
            let x = ((idx * 3) % (COLS as usize - 4)) as f64;
            let y = (idx * 2) as f64;
            Item::grid(format!("widget-{idx}"), x, y, w, 2.0)
        })
        .collect()
}

fn compact_dashboard(c: &mut Criterion) {
    let layout = dashboard(200);
    c.bench_function("compact_200", |b| {
        b.iter(|| compact(black_box(layout.clone())));
    });
}

fn cascade_from_top(c: &mut Criterion) {
    let layout = compact(dashboard(200));
    c.bench_function("move_element_cascade_200", |b| {
        b.iter(|| move_element(black_box(layout.clone()), "widget-150", 0.0, 0.0, true));
    });
}

fn drag_session(c: &mut Criterion) {
    let inputs: Vec<ItemInput> = dashboard(60)
        .into_iter()
        .map(|item| {
            ItemInput::new(item.i, item.x, item.y, item.w, item.h)
                .with_type(ItemType::Grid)
                .draggable(true)
        })
        .collect();
    let config = CanvasConfig {
        layout_type: LayoutType::Grid,
        cols: COLS,
        width: 1200.0,
        ..CanvasConfig::default()
    };

    c.bench_function("canvas_drag_session_60", |b| {
        b.iter(|| {
            let mut canvas =
                LayoutCanvas::new("bench", config.clone(), CanvasOptions::default()).expect("canvas");
            canvas.set_items(&inputs);
            canvas.drag_start("widget-0").expect("draggable");
            for step in 0..40 {
                let point = Point::new(f64::from(step) * 25.0, f64::from(step) * 15.0);
                canvas.drag("widget-0", point);
            }
            black_box(canvas.drag_stop("widget-0", Point::new(600.0, 300.0)))
        });
    });
}

criterion_group!(benches, compact_dashboard, cascade_from_top, drag_session);
criterion_main!(benches);

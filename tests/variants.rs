//! Validates the five segmentation cost rules end to end

use seedpath::forest::BufferPool;
use seedpath::spatial::{Connectivity, GridGeometry, GridPoint};
use seedpath::variants::distance::distance_map;
use seedpath::variants::fast_marching::fast_marching;
use seedpath::variants::fuzzy::AdaptiveFuzzy;
use seedpath::variants::livewire::Livewire;
use seedpath::variants::region_growing::region_growing;

#[test]
fn uniform_field_collapses_region_growing_to_zero_cost() {
    // 5x5, single center seed, uniform edge field: the cost rule collapses
    // to zero everywhere and the seed label floods the grid
    let pool = BufferPool::new();
    let field = vec![1.0f32; 25];
    let mut labels = vec![0.0f32; 25];
    if let Some(seed) = labels.get_mut(12) {
        *seed = 1.0;
    }
    let engine = region_growing(&pool, 5, 5, &field, &labels);

    for &cost in engine.costs() {
        assert_eq!(cost, 0.0);
    }
    for &label in engine.labels() {
        assert_eq!(label, 1.0);
    }
}

#[test]
fn competing_seeds_split_at_the_gradient_step() {
    // 8x1 grid, flat on each side of a step between columns 3 and 4
    let pool = BufferPool::new();
    let field = vec![0.0f32, 0.0, 0.0, 0.0, 5.0, 5.0, 5.0, 5.0];
    let mut labels = vec![0.0f32; 8];
    if let Some(seed) = labels.first_mut() {
        *seed = 1.0;
    }
    if let Some(seed) = labels.last_mut() {
        *seed = 2.0;
    }
    let engine = region_growing(&pool, 8, 1, &field, &labels);

    let result: Vec<f32> = engine.labels().to_vec();
    assert_eq!(result, vec![1.0, 1.0, 1.0, 1.0, 2.0, 2.0, 2.0, 2.0]);
}

#[test]
fn distance_map_matches_hand_computed_scenario() {
    // 4x4: rows 0-1 background, rows 2-3 the region; the region rim
    // (row 2) is the distance-zero boundary
    let pool = BufferPool::new();
    let labels = [
        0.0f32, 0.0, 0.0, 0.0, //
        0.0, 0.0, 0.0, 0.0, //
        2.0, 2.0, 2.0, 2.0, //
        2.0, 2.0, 2.0, 2.0, //
    ];
    let engine = distance_map(&pool, 4, 4, &labels, 2.0);
    let costs = engine.costs();

    assert_eq!(costs.get(4).copied(), Some(1.0), "row 1 col 0");
    assert_eq!(costs.get(0).copied(), Some(2.0), "row 0 col 0");
    assert_eq!(costs.get(8).copied(), Some(0.0), "boundary row");
    assert_eq!(costs.get(12).copied(), Some(1.0), "row 3 col 0");
}

#[test]
fn distance_map_is_exact_for_a_single_point_seed() {
    let geometry = GridGeometry::new(11, 9);
    let seed = GridPoint::new(3, 5);
    let mut labels = vec![0.0f32; geometry.area()];
    if let Some(cell) = labels.get_mut(geometry.index_of(seed)) {
        *cell = 1.0;
    }

    let pool = BufferPool::new();
    let engine = distance_map(&pool, 11, 9, &labels, 1.0);

    for index in 0..geometry.area() {
        let point = geometry.point_of(index);
        let dx = point.x as f32 - seed.x as f32;
        let dy = point.y as f32 - seed.y as f32;
        let exact = dx.hypot(dy);
        let computed = engine.costs().get(index).copied().unwrap_or(f32::NAN);
        assert!(
            (computed - exact).abs() < 1e-4,
            "pixel {index}: computed {computed}, exact {exact}"
        );
    }
}

#[test]
fn distance_map_tracks_the_nearest_of_several_seeds() {
    let geometry = GridGeometry::new(11, 9);
    let seeds = [
        GridPoint::new(2, 2),
        GridPoint::new(8, 2),
        GridPoint::new(5, 7),
    ];
    let mut labels = vec![0.0f32; geometry.area()];
    for seed in &seeds {
        if let Some(cell) = labels.get_mut(geometry.index_of(*seed)) {
            *cell = 1.0;
        }
    }

    let pool = BufferPool::new();
    let engine = distance_map(&pool, 11, 9, &labels, 1.0);

    for index in 0..geometry.area() {
        let point = geometry.point_of(index);
        let nearest = seeds
            .iter()
            .map(|s| {
                let dx = point.x as f32 - s.x as f32;
                let dy = point.y as f32 - s.y as f32;
                dx.hypot(dy)
            })
            .fold(f32::INFINITY, f32::min);
        let computed = engine.costs().get(index).copied().unwrap_or(f32::NAN);
        // The computed value is the distance to SOME seed, so it can never
        // undershoot; near Voronoi boundaries four-neighbor origin
        // propagation may overshoot by a fraction of a pixel.
        assert!(
            computed >= nearest - 1e-4,
            "pixel {index}: computed {computed} undershoots {nearest}"
        );
        assert!(
            computed <= nearest + 0.3,
            "pixel {index}: computed {computed} overshoots {nearest}"
        );
    }
}

#[test]
fn fuzzy_connectedness_is_zero_on_a_field_at_target_intensity() {
    let pool = BufferPool::new();
    let intensity = vec![0.5f32; 49];
    let session = AdaptiveFuzzy::new(&pool, 7, 7, &intensity, GridPoint::new(3, 3), 0.5, 0.2, 0.1);

    for &cost in session.engine().costs() {
        assert!(cost.abs() < 1e-6);
    }
}

#[test]
fn fuzzy_costs_rise_across_an_intensity_step() {
    // Left half at the target intensity, right half far from it
    let geometry = GridGeometry::new(8, 5);
    let intensity: Vec<f32> = (0..geometry.area())
        .map(|i| if geometry.point_of(i).x < 4 { 0.5 } else { 0.9 })
        .collect();
    let pool = BufferPool::new();
    let session = AdaptiveFuzzy::new(&pool, 8, 5, &intensity, GridPoint::new(1, 2), 0.5, 0.1, 0.05);

    let inside = geometry.index_of(GridPoint::new(2, 2));
    let outside = geometry.index_of(GridPoint::new(6, 2));
    let inside_cost = session.engine().costs().get(inside).copied().unwrap_or(1.0);
    let outside_cost = session.engine().costs().get(outside).copied().unwrap_or(0.0);
    assert!(inside_cost < outside_cost);
}

#[test]
fn fast_marching_front_expands_from_the_seed() {
    let pool = BufferPool::new();
    let speed = vec![1.0f32; 25];
    let mut seeds = vec![0.0f32; 25];
    if let Some(seed) = seeds.get_mut(12) {
        *seed = 1.0;
    }
    let engine = fast_marching(&pool, 5, 5, &speed, &seeds);
    let geometry = GridGeometry::new(5, 5);

    assert_eq!(engine.costs().get(12).copied(), Some(0.0));
    // First ring arrives at unit time under unit speed
    let neighbor = geometry.index_of(GridPoint::new(2, 1));
    assert_eq!(engine.costs().get(neighbor).copied(), Some(1.0));

    // Arrival times grow with distance from the seed; the corner is the
    // latest arrival in its quadrant
    let edge = engine
        .costs()
        .get(geometry.index_of(GridPoint::new(1, 0)))
        .copied()
        .unwrap_or(0.0);
    let corner = engine
        .costs()
        .get(geometry.index_of(GridPoint::new(0, 0)))
        .copied()
        .unwrap_or(0.0);
    assert!(corner > edge);
    for &cost in engine.costs() {
        assert!(cost.is_finite());
    }
}

#[test]
fn livewire_path_connects_target_to_anchor() {
    let geometry = GridGeometry::new(12, 9);
    // A dark horizontal band at row 4 is the cheap corridor
    let edge: Vec<f32> = (0..geometry.area())
        .map(|i| if geometry.point_of(i).y == 4 { 0.0 } else { 1.0 })
        .collect();
    let direction = vec![0.0f32; geometry.area()];
    let pool = BufferPool::new();
    let anchor = GridPoint::new(1, 4);
    let wire = Livewire::new(&pool, 12, 9, &edge, &direction, anchor);

    let target = GridPoint::new(10, 4);
    let path = wire.path_to(target);

    assert_eq!(path.first().copied(), Some(target));
    assert_eq!(path.last().copied(), Some(anchor));
    for pair in path.windows(2) {
        let (Some(a), Some(b)) = (pair.first(), pair.get(1)) else {
            continue;
        };
        assert!(geometry.adjacent(
            geometry.index_of(*a),
            geometry.index_of(*b),
            Connectivity::Eight
        ));
    }
    // The cheap corridor keeps the wire on row 4
    for point in &path {
        assert_eq!(point.y, 4);
    }
}

#[test]
fn livewire_append_splices_two_half_paths() {
    let pool = BufferPool::new();
    let edge = vec![0.5f32; 36];
    let direction = vec![0.0f32; 36];
    let wire = Livewire::new(&pool, 6, 6, &edge, &direction, GridPoint::new(0, 0));

    let mut polyline = wire.path_to(GridPoint::new(5, 5));
    let live_len = polyline.len();
    wire.append_path_to(GridPoint::new(5, 0), &mut polyline);

    assert!(polyline.len() > live_len);
    assert_eq!(polyline.get(live_len).copied(), Some(GridPoint::new(5, 0)));
    assert_eq!(polyline.last().copied(), Some(GridPoint::new(0, 0)));
}

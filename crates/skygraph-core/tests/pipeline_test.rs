//! End-to-end grid and graph properties on realistic obstacle sets.

use skygraph_core::{
    cells_along_segment, collinear_scenario, create_grid_and_edges, random_obstacle_field,
    three_block_scenario, CollisionFilter, CoordinateFrame, FieldConfig, GridBuilder, GridCell,
    ObstacleRecord, OccupancyGrid, Pipeline, PlannerConfig, PlannerError, Point2D,
    ProximityGraphSource, SpadeVoronoi,
};

fn sparse_field() -> Vec<ObstacleRecord> {
    random_obstacle_field(&FieldConfig {
        count: 40,
        extent_m: 150.0,
        min_half_size_m: 1.0,
        max_half_size_m: 6.0,
        min_height_m: 2.0,
        max_height_m: 60.0,
        seed: 2024,
    })
}

/// Four corners of a square plus its center, 4x4 footprints, all blocking.
fn square_with_center() -> Vec<ObstacleRecord> {
    [(10.0, 10.0), (10.0, 50.0), (50.0, 10.0), (50.0, 50.0), (30.0, 30.0)]
        .into_iter()
        .map(|(north, east)| ObstacleRecord::new(north, east, 10.0, 2.0, 2.0, 5.0))
        .collect()
}

fn path_is_clear(grid: &OccupancyGrid, start: Point2D, end: Point2D) -> bool {
    cells_along_segment(start, end)
        .into_iter()
        .all(|cell| grid.get(cell) == Some(false))
}

#[test]
fn three_block_example() {
    let (grid, edges) = create_grid_and_edges(&three_block_scenario(), 5.0).unwrap();

    assert_eq!(grid.frame().north_min, 8.0);
    assert_eq!(grid.frame().east_min, 8.0);
    assert_eq!((grid.rows(), grid.cols()), (24, 24));
    assert_eq!(grid.occupied_count(), 3 * 16);

    for (row, col) in [(0, 0), (3, 3), (0, 20), (3, 23), (20, 10), (23, 13)] {
        assert!(grid.is_occupied(GridCell::new(row, col)), "({row}, {col})");
    }
    assert!(!grid.is_occupied(GridCell::new(12, 12)));

    // Three sites give one Voronoi vertex and three unbounded ridges.
    assert!(edges.is_empty());
}

#[test]
fn three_block_ridges_are_all_unbounded() {
    let result = Pipeline::with_config(PlannerConfig::default())
        .run(&three_block_scenario())
        .unwrap();
    assert_eq!(result.sites.len(), 3);
    assert_eq!(result.stats.candidates, 3);
    assert_eq!(result.stats.unbounded, 3);
    assert_eq!(result.stats.accepted, 0);
}

#[test]
fn square_with_center_keeps_inner_diamond() {
    let result = Pipeline::with_config(PlannerConfig::default())
        .run(&square_with_center())
        .unwrap();
    assert_eq!((result.grid.rows(), result.grid.cols()), (44, 44));
    assert_eq!(result.stats.candidates, 8);
    assert_eq!(result.stats.unbounded, 4);
    assert_eq!(result.stats.accepted, 4);
    for edge in &result.edges {
        assert!((edge.length() - 20.0 * 2f64.sqrt()).abs() < 1e-6);
    }
}

#[test]
fn collinear_sites_are_degenerate() {
    let err = create_grid_and_edges(&collinear_scenario(), 5.0).unwrap_err();
    assert!(matches!(err, PlannerError::DegenerateInput { sites: 3, .. }));
}

#[test]
fn too_few_blocking_obstacles_is_degenerate() {
    let mut obstacles = three_block_scenario();
    // Top at 4.0, below the flight altitude.
    obstacles[2] = ObstacleRecord::new(30.0, 20.0, 2.0, 2.0, 2.0, 2.0);
    let err = create_grid_and_edges(&obstacles, 5.0).unwrap_err();
    assert!(matches!(err, PlannerError::DegenerateInput { sites: 2, .. }));
}

#[test]
fn malformed_obstacle_is_reported_by_index() {
    let mut obstacles = three_block_scenario();
    obstacles[1].half_east = 0.0;
    let err = create_grid_and_edges(&obstacles, 5.0).unwrap_err();
    assert!(matches!(err, PlannerError::MalformedObstacle { index: 1, .. }));
}

#[test]
fn non_finite_altitude_is_rejected() {
    let err = create_grid_and_edges(&three_block_scenario(), f64::NAN).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidAltitude(_)));
}

#[test]
fn frame_contains_every_footprint() {
    let obstacles = sparse_field();
    let frame = CoordinateFrame::from_obstacles(&obstacles).unwrap();
    for o in &obstacles {
        let row_lo = (o.north - o.half_north - frame.north_min) as i64;
        let row_hi = (o.north + o.half_north - frame.north_min) as i64;
        let col_lo = (o.east - o.half_east - frame.east_min) as i64;
        let col_hi = (o.east + o.half_east - frame.east_min) as i64;
        assert!(row_lo >= 0 && row_hi <= frame.north_size as i64);
        assert!(col_lo >= 0 && col_hi <= frame.east_size as i64);
    }
}

#[test]
fn occupancy_matches_blocking_footprints() {
    let obstacles = sparse_field();
    let altitude = 20.0;
    let frame = CoordinateFrame::from_obstacles(&obstacles).unwrap();
    let grid = GridBuilder::new(frame)
        .build(&obstacles, altitude)
        .unwrap()
        .grid;

    let covers = |o: &ObstacleRecord, row: i64, col: i64| {
        let row_lo = (o.north - o.half_north - frame.north_min) as i64;
        let row_hi = (o.north + o.half_north - frame.north_min) as i64;
        let col_lo = (o.east - o.half_east - frame.east_min) as i64;
        let col_hi = (o.east + o.half_east - frame.east_min) as i64;
        (row_lo..row_hi).contains(&row) && (col_lo..col_hi).contains(&col)
    };

    for row in 0..grid.rows() as i64 {
        for col in 0..grid.cols() as i64 {
            let expected = obstacles
                .iter()
                .any(|o| o.top() > altitude && covers(o, row, col));
            assert_eq!(
                grid.is_occupied(GridCell::new(row, col)),
                expected,
                "cell ({row}, {col})"
            );
        }
    }
}

#[test]
fn low_obstacles_add_no_cells_and_no_sites() {
    let obstacles = sparse_field();
    let altitude = 30.0;
    let frame = CoordinateFrame::from_obstacles(&obstacles).unwrap();
    let blocking: Vec<ObstacleRecord> = obstacles
        .iter()
        .copied()
        .filter(|o| o.top() > altitude)
        .collect();
    assert!(blocking.len() < obstacles.len());

    let all = GridBuilder::new(frame).build(&obstacles, altitude).unwrap();
    let only_blocking = GridBuilder::new(frame).build(&blocking, altitude).unwrap();
    assert_eq!(all.grid, only_blocking.grid);
    assert_eq!(all.centers, only_blocking.centers);
}

#[test]
fn accepted_edges_are_safe_and_rejections_are_justified() {
    let obstacles = sparse_field();
    let frame = CoordinateFrame::from_obstacles(&obstacles).unwrap();
    let build = GridBuilder::new(frame).build(&obstacles, 10.0).unwrap();
    let graph = SpadeVoronoi::new().diagram(&build.centers).unwrap();
    let outcome = CollisionFilter::new().filter(&build.grid, &graph);

    assert!(!outcome.edges.is_empty());
    for edge in &outcome.edges {
        assert!(path_is_clear(&build.grid, edge.start, edge.end));
    }

    let mut rejected = 0;
    for ridge in &graph.ridges {
        let Some((start, end)) = graph.endpoints(ridge) else {
            continue;
        };
        let accepted = outcome
            .edges
            .iter()
            .any(|edge| edge.start == start && edge.end == end);
        if !accepted {
            rejected += 1;
            assert!(!path_is_clear(&build.grid, start, end));
        }
    }
    assert_eq!(
        rejected,
        outcome.stats.out_of_bounds + outcome.stats.occupied
    );
}

#[test]
fn repeated_runs_are_identical() {
    let obstacles = sparse_field();
    let pipeline = Pipeline::with_config(PlannerConfig {
        drone_altitude: 10.0,
        parallel_filter: false,
    });
    let first = pipeline.run(&obstacles).unwrap();
    let second = pipeline.run(&obstacles).unwrap();
    assert_eq!(first.grid, second.grid);
    assert_eq!(first.edges, second.edges);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn parallel_run_matches_sequential() {
    let obstacles = sparse_field();
    let sequential = Pipeline::with_config(PlannerConfig {
        drone_altitude: 10.0,
        parallel_filter: false,
    })
    .run(&obstacles)
    .unwrap();
    let parallel = Pipeline::with_config(PlannerConfig {
        drone_altitude: 10.0,
        parallel_filter: true,
    })
    .run(&obstacles)
    .unwrap();
    assert_eq!(sequential.edges, parallel.edges);
    assert_eq!(sequential.stats, parallel.stats);
}

#[test]
fn sliver_triangle_with_far_circumcenter_completes() {
    // The third site sits one ulp off the line through the first two, so its
    // Delaunay triangles have circumcenters far outside the grid.
    let h = 4000.0_f64;
    let l = 2.0 * h;
    let sliver = f64::from_bits(h.to_bits() + 1);
    let obstacles: Vec<ObstacleRecord> = [(0.0, h), (l, h), (h, sliver), (h, l)]
        .into_iter()
        .map(|(north, east)| ObstacleRecord::new(north, east, 10.0, 1.0, 1.0, 5.0))
        .collect();

    for parallel_filter in [false, true] {
        let result = Pipeline::with_config(PlannerConfig {
            drone_altitude: 5.0,
            parallel_filter,
        })
        .run(&obstacles)
        .unwrap();
        for edge in &result.edges {
            assert!(path_is_clear(&result.grid, edge.start, edge.end));
        }
        assert_eq!(
            result.stats.candidates,
            result.stats.unbounded
                + result.stats.out_of_bounds
                + result.stats.occupied
                + result.stats.accepted
        );
    }
}

#[test]
fn widely_spread_obstacles_fail_with_grid_too_large() {
    let obstacles = vec![
        ObstacleRecord::new(-1e10, -1e10, 10.0, 1.0, 1.0, 5.0),
        ObstacleRecord::new(-1e10, 1e10, 10.0, 1.0, 1.0, 5.0),
        ObstacleRecord::new(1e10, -1e10, 10.0, 1.0, 1.0, 5.0),
        ObstacleRecord::new(1e10, 1e10, 10.0, 1.0, 1.0, 5.0),
    ];
    let err = create_grid_and_edges(&obstacles, 5.0).unwrap_err();
    assert!(matches!(err, PlannerError::GridTooLarge { .. }));
}

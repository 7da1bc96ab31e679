use labyrinth_core::{CellCoord, MazeError};
use labyrinth_system_generation::generate;
use labyrinth_system_pathfinding::PathFinder;
use labyrinth_system_wall_breaking::break_walls;
use labyrinth_world::GridGraph;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn maze(columns: u32, rows: u32, seed: u64, extra_walls: u32) -> GridGraph {
    let mut graph = GridGraph::new(columns, rows).expect("valid size");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let _ = generate(&mut graph, &mut rng).expect("generation succeeds");
    let _ = break_walls(&mut graph, extra_walls, &mut rng).expect("valid graph");
    graph
}

fn assert_walkable(graph: &GridGraph, path: &[CellCoord]) {
    for pair in path.windows(2) {
        assert!(
            graph.is_connected(pair[0], pair[1]).expect("in bounds"),
            "{} and {} are not connected",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn most_distant_cell_has_maximum_distance() {
    for seed in 0..6 {
        let graph = maze(11, 9, seed, 0);
        let source = CellCoord::new(5, 4);
        let search = PathFinder::from_cell(&graph, source).expect("valid source");

        let maximum = search.distances().iter().copied().max().expect("non-empty");
        assert_eq!(search.distance(search.most_distant()), Ok(maximum));
        assert_eq!(search.farthest_distance(), maximum);
    }
}

#[test]
fn shortest_paths_are_walkable_and_minimal() {
    for extra_walls in [0, 12] {
        let graph = maze(10, 10, 0xabc, extra_walls);
        let sources = [CellCoord::new(0, 0), CellCoord::new(9, 9)];
        let search = PathFinder::search(&graph, &sources).expect("valid sources");

        for target in graph.cells() {
            let path = search.shortest_path(target).expect("connected maze");
            let distance = search.distance(target).expect("in bounds");

            assert_eq!(path.len(), distance + 1);
            assert!(sources.contains(&path[0]), "path must start at a source");
            assert_eq!(path.last(), Some(&target));
            assert_walkable(&graph, &path);
        }
    }
}

#[test]
fn distances_satisfy_the_edge_relaxation_bound() {
    let graph = maze(9, 7, 5, 8);
    let search = PathFinder::from_cell(&graph, CellCoord::new(4, 3)).expect("valid source");

    for cell in graph.cells() {
        let distance = search.distance(cell).expect("in bounds");
        for neighbor in graph.maze_neighbors(cell).expect("in bounds") {
            let other = search.distance(neighbor).expect("in bounds");
            assert!(distance.abs_diff(other) <= 1);
        }
        if let Some(previous) = search.previous(cell).expect("in bounds") {
            assert_eq!(search.distance(previous), Ok(distance - 1));
        }
    }
}

#[test]
fn search_is_read_only() {
    let graph = maze(6, 6, 31, 4);
    let snapshot = graph.clone();

    let _ = PathFinder::search(&graph, &[CellCoord::new(0, 0), CellCoord::new(3, 3)])
        .expect("valid sources");

    assert_eq!(graph, snapshot);
}

#[test]
fn unreachable_targets_are_reported() {
    let mut graph = GridGraph::new(3, 1).expect("valid size");
    graph
        .connect(CellCoord::new(0, 0), CellCoord::new(1, 0))
        .expect("adjacent cells");
    let search = PathFinder::from_cell(&graph, CellCoord::new(0, 0)).expect("valid source");

    assert_eq!(
        search.shortest_path(CellCoord::new(2, 0)),
        Err(MazeError::UnreachableCell {
            cell: CellCoord::new(2, 0)
        })
    );
    assert_eq!(search.most_distant(), CellCoord::new(1, 0));
}

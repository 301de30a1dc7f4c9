use maze_core::adjacency::neighbors;
use maze_core::pathing::is_valid_path;
use maze_core::{
    CellState, DoorKind, Maze, Pos, RandSource, RecordingRng, SimpleLcg, Traversal,
};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn doors_of(maze: &Maze, kind: DoorKind) -> Vec<Pos> {
    maze.grid()
        .iter()
        .filter(|&(_, state)| state == CellState::Door(kind))
        .map(|(pos, _)| pos)
        .collect()
}

/// Carved wall-lattice cells, i.e. edges between adjacent rooms.
fn open_edges(maze: &Maze) -> usize {
    maze.grid()
        .iter()
        .filter(|&(pos, state)| {
            state == CellState::Open && (pos.row % 2 == 0) != (pos.col % 2 == 0)
        })
        .count()
}

fn rooms_reached_from_first_room(maze: &Maze) -> usize {
    let counts = maze.step_counts(Pos::new(1, 1), None).unwrap();
    maze.grid()
        .iter()
        .filter(|&(pos, _)| pos.row % 2 == 1 && pos.col % 2 == 1)
        .filter(|&(pos, _)| counts.steps_to(pos).is_some())
        .count()
}

fn assert_perfect_maze(maze: &Maze) -> Result<(), TestCaseError> {
    let rooms = maze.width() * maze.height();

    let entrances = doors_of(maze, DoorKind::Entrance);
    let exits = doors_of(maze, DoorKind::Exit);
    prop_assert_eq!(entrances.clone(), vec![maze.entry_position()]);
    prop_assert_eq!(exits.clone(), vec![maze.exit_position()]);
    prop_assert_eq!(entrances[0].row, maze.rows() - 1);
    prop_assert_eq!(exits[0].row, 0);
    prop_assert_eq!(entrances[0].col % 2, 1);
    prop_assert_eq!(exits[0].col % 2, 1);

    prop_assert_eq!(open_edges(maze), rooms - 1);
    prop_assert_eq!(rooms_reached_from_first_room(maze), rooms);

    let found = maze.solve();
    prop_assert!(found.is_ok(), "no path: {:?}", found);
    let found = found.unwrap();
    prop_assert!(is_valid_path(
        maze.grid(),
        &found.path,
        maze.entry_position(),
        maze.exit_position()
    ));
    Ok(())
}

proptest! {
    #[test]
    fn every_maze_is_perfect(width in 1usize..14, height in 1usize..14, seed in any::<u32>()) {
        let maze = Maze::from_seed(width, height, seed).unwrap();
        assert_perfect_maze(&maze)?;
    }

    #[test]
    fn neighbors_are_single_orthogonal_steps(width in 1usize..8, height in 1usize..8, seed in any::<u32>()) {
        let maze = Maze::from_seed(width, height, seed).unwrap();
        let grid = maze.grid();
        for (pos, _) in grid.iter() {
            for next in neighbors(grid, pos) {
                prop_assert!(grid.in_bounds(next));
                prop_assert_eq!(pos.manhattan(next), 1, "{} -> {}", pos, next);
            }
        }
    }

    #[test]
    fn same_draws_build_the_same_maze(width in 1usize..12, height in 1usize..12, seed in any::<u64>()) {
        let mut recorder = RecordingRng::new(RandSource::new(StdRng::seed_from_u64(seed)));
        let first = Maze::generate(width, height, &mut recorder).unwrap();
        let draws = recorder.offsets().len();

        let mut replay = recorder.into_replay();
        let second = Maze::generate_with(width, height, &mut replay, Traversal::Recursive).unwrap();
        prop_assert_eq!(replay.consumed(), draws);

        prop_assert_eq!(first.grid(), second.grid());
        prop_assert_eq!(first.entry_position(), second.entry_position());
        prop_assert_eq!(first.exit_position(), second.exit_position());
    }

    #[test]
    fn search_traversals_agree(width in 1usize..10, height in 1usize..10, seed in any::<u32>()) {
        let recursive = Maze::generate_with(width, height, &mut SimpleLcg::new(seed), Traversal::Recursive).unwrap();
        let stacked = Maze::generate_with(width, height, &mut SimpleLcg::new(seed), Traversal::ExplicitStack).unwrap();
        prop_assert_eq!(recursive.solve().unwrap(), stacked.solve().unwrap());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn five_by_five_holds_invariants_across_seeds(seed in any::<u64>()) {
        let mut rng = RandSource::new(StdRng::seed_from_u64(seed));
        let maze = Maze::generate(5, 5, &mut rng).unwrap();
        assert_perfect_maze(&maze)?;
    }
}

#[test]
fn one_by_one_maze() {
    let maze = Maze::from_seed(1, 1, 2024).unwrap();
    assert_eq!((maze.rows(), maze.cols()), (3, 3));
    assert_eq!(maze.exit_position(), Pos::new(0, 1));
    assert_eq!(maze.entry_position(), Pos::new(2, 1));
    assert_eq!(maze.solve().unwrap().path.len(), 3);
}

#[test]
fn exhaustive_search_finds_the_single_route_of_a_perfect_maze() {
    let maze = Maze::from_seed(6, 6, 17).unwrap();
    let all = maze
        .all_paths(maze.entry_position(), maze.exit_position())
        .unwrap();
    assert_eq!(all.paths.len(), 1);
    assert_eq!(all.paths[0], maze.solve().unwrap().path);
}

#[test]
fn large_maze_solves_without_deep_recursion() {
    let maze = Maze::from_seed(150, 150, 7).unwrap();
    let found = maze.solve().unwrap();
    assert!(is_valid_path(
        maze.grid(),
        &found.path,
        maze.entry_position(),
        maze.exit_position()
    ));
}

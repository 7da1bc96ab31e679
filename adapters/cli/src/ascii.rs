//! Plain-text maze drawing.

use labyrinth_core::{CellCoord, Direction, MazeError};
use labyrinth_system_bootstrap::Maze;

/// Draws the maze as `2 * rows + 1` lines of `+`, `-`, and `|` characters.
///
/// Spawn cells are labelled with their placement index; spawns past the tenth
/// are drawn as `*`.
pub(crate) fn draw(maze: &Maze, spawns: &[CellCoord]) -> Result<String, MazeError> {
    let mut out = String::new();

    for row in 0..maze.height() {
        out.push('+');
        for column in 0..maze.width() {
            let open = !maze.is_wall(CellCoord::new(column, row), Direction::North)?;
            out.push_str(if open { "   " } else { "---" });
            out.push('+');
        }
        out.push('\n');

        let west = CellCoord::new(0, row);
        out.push(if maze.is_wall(west, Direction::West)? { '|' } else { ' ' });
        for column in 0..maze.width() {
            let cell = CellCoord::new(column, row);
            let label = spawn_label(spawns, cell);
            out.push(' ');
            out.push(label);
            out.push(' ');
            out.push(if maze.is_wall(cell, Direction::East)? { '|' } else { ' ' });
        }
        out.push('\n');
    }

    out.push('+');
    for _ in 0..maze.width() {
        out.push_str("---+");
    }
    out.push('\n');

    Ok(out)
}

fn spawn_label(spawns: &[CellCoord], cell: CellCoord) -> char {
    match spawns.iter().position(|&spawn| spawn == cell) {
        Some(index) => u32::try_from(index)
            .ok()
            .and_then(|index| char::from_digit(index, 10))
            .unwrap_or('*'),
        None => ' ',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use labyrinth_system_bootstrap::MazeConfig;

    #[test]
    fn drawing_has_one_border_line_per_row_plus_one() {
        let maze = Maze::from_config(MazeConfig::new(5, 3).with_seed(11)).expect("valid");
        let drawing = draw(&maze, &[]).expect("in bounds");
        let lines: Vec<&str> = drawing.lines().collect();

        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "+---+---+---+---+---+");
        assert_eq!(lines[6], "+---+---+---+---+---+");
        assert!(lines.iter().all(|line| line.len() == 21));
        assert!(lines[1].starts_with('|') && lines[1].ends_with('|'));
    }

    #[test]
    fn single_cell_maze_is_a_closed_box() {
        let maze = Maze::square(1).expect("valid");
        let drawing = draw(&maze, &[]).expect("in bounds");

        assert_eq!(drawing, "+---+\n|   |\n+---+\n");
    }

    #[test]
    fn two_cell_corridor_has_no_inner_wall() {
        let maze = Maze::new(2, 1).expect("valid");
        let drawing = draw(&maze, &[CellCoord::new(1, 0)]).expect("in bounds");

        assert_eq!(drawing, "+---+---+\n|     0 |\n+---+---+\n");
    }

    #[test]
    fn spawn_labels_fall_back_to_star_after_ten() {
        let spawns: Vec<CellCoord> = (0..12).map(|column| CellCoord::new(column, 0)).collect();

        assert_eq!(spawn_label(&spawns, CellCoord::new(0, 0)), '0');
        assert_eq!(spawn_label(&spawns, CellCoord::new(9, 0)), '9');
        assert_eq!(spawn_label(&spawns, CellCoord::new(10, 0)), '*');
        assert_eq!(spawn_label(&spawns, CellCoord::new(0, 1)), ' ');
    }
}

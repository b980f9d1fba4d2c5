use std::ops::Index;

use ndarray::Array2;

use crate::*;

/// Canvas color behind the grid.
pub const BACKGROUND: Color = Color::WHITE;
/// Color of the arrows showing which positions a candidate was checked against.
pub const CHECK_COLOR: Color = Color::RED;
/// Color of the arrows showing which positions a newly solved cell makes reachable.
pub const CONSEQUENCE_COLOR: Color = Color::BLUE;

/// Wythoff's game on an N×N board, classified one diagonal sweep at a time.
///
/// Every call that changes the classification or the overlay arrows redraws the whole canvas and hands the frame
/// to the sink, so the sink sees the algorithm's progress as an ordered sequence of images.
#[derive(Debug)]
pub struct GameGrid<S> {
    config: GridConfig,
    cells: Array2<CellState>,
    canvas: PixelBuffer,
    shapes: ShapeCache,
    grid_lines: [Drawable; 2],
    arrows: Overlays,
    highlight: Option<usize>,
    rounds: usize,
    sink: S,
}

impl<S: FrameSink> GameGrid<S> {
    pub fn new(config: GridConfig, sink: S) -> Self {
        let canvas_size = config.canvas_size();
        let line = |axis| Shape::Line {
            axis,
            length: canvas_size,
            thickness: config.line_thickness,
        };
        let mut grid = Self {
            config,
            cells: Array2::default((config.size, config.size).to_nd_index()),
            canvas: PixelBuffer::new(canvas_size, canvas_size, BACKGROUND),
            shapes: ShapeCache::new(config.cell_inner()),
            grid_lines: [
                Drawable::new(line(Axis::Vertical), Color::BLACK),
                Drawable::new(line(Axis::Horizontal), Color::BLACK),
            ],
            arrows: Overlays::default(),
            highlight: None,
            rounds: 0,
            sink,
        };
        grid.draw();
        grid
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn size(&self) -> Coord {
        self.config.size
    }

    pub fn cell_at(&self, coords: Coord2) -> CellState {
        self.cells[coords.to_nd_index()]
    }

    pub fn cells(&self) -> &Array2<CellState> {
        &self.cells
    }

    /// Number of completed calls to [`GameGrid::step`].
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    pub fn is_done(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_determined())
    }

    pub fn undetermined_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !cell.is_determined())
            .count()
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    /// Dims every cell off the line `pile_a + pile_b = coins` on the following frames.
    pub fn set_highlight(&mut self, coins: Option<usize>) {
        self.highlight = coins;
    }

    pub fn arrows(&self) -> &Overlays {
        &self.arrows
    }

    pub fn clear_arrows(&mut self) {
        self.arrows.clear();
    }

    pub fn canvas(&self) -> &PixelBuffer {
        &self.canvas
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Solved positions on the line `pile_a + pile_b = coins` that fit on the board.
    pub fn winning_splits(&self, coins: usize) -> Vec<WinningSplit> {
        let size = usize::from(self.config.size);
        (coins.saturating_sub(size - 1)..=coins.min(size - 1))
            .map(|a| (a, coins - a))
            .filter(|&(_, b)| b < size)
            .map(|(a, b)| (a as Coord, b as Coord))
            .filter(|&coords| self[coords] == CellState::Solved)
            .map(|(pile_a, pile_b)| WinningSplit {
                coins,
                pile_a,
                pile_b,
            })
            .collect()
    }

    /// Runs one classification round and returns the newly solved cells.
    ///
    /// A round emits four frames: the new frontier with the checks that admitted it, then the consequences along
    /// rows, columns and diagonals. On a finished grid the round changes nothing but still emits its frames.
    pub fn step(&mut self) -> Result<Vec<Coord2>> {
        self.arrows.clear();
        let solved = self.find_frontier();
        for &coords in &solved {
            self.push_check_arrows(coords);
        }
        for &coords in &solved {
            self.cells[coords.to_nd_index()] = CellState::Solved;
        }
        self.render_frame()?;

        for direction in [
            ArrowDirection::Left,
            ArrowDirection::Down,
            ArrowDirection::DownLeft,
        ] {
            self.propagate(&solved, direction)?;
        }

        self.rounds += 1;
        log::debug!(
            "round {}: {} solved, {} undetermined left",
            self.rounds,
            solved.len(),
            self.undetermined_count()
        );
        Ok(solved)
    }

    /// Redraws the canvas and emits it as the next frame.
    pub fn render_frame(&mut self) -> Result<()> {
        self.draw();
        log::trace!(
            "emitting frame, {} arrows, {} cached cell colors",
            self.arrows.len(),
            self.shapes.len()
        );
        self.sink.emit(&self.canvas)
    }

    /// Cells whose every move leads to a reachable position, judged against the state before the round.
    fn find_frontier(&self) -> Vec<Coord2> {
        if self.cells.iter().all(|&cell| cell == CellState::Undetermined) {
            return vec![(0, 0)];
        }

        self.cells
            .indexed_iter()
            .filter(|&(_, &cell)| cell == CellState::Undetermined)
            .map(|((a, b), _)| (a as Coord, b as Coord))
            .filter(|&coords| MoveIter::new(coords).all(|pos| self[pos] == CellState::Reachable))
            .collect()
    }

    fn push_check_arrows(&mut self, (a, b): Coord2) {
        let diagonal = a.min(b);
        let end = (a, b);
        for (direction, start) in [
            (ArrowDirection::Left, (0, b)),
            (ArrowDirection::Down, (a, 0)),
            (ArrowDirection::DownLeft, (a - diagonal, b - diagonal)),
        ] {
            self.arrows.push(Arrow {
                direction,
                start,
                end,
                color: CHECK_COLOR,
            });
        }
    }

    /// Marks every position one `direction` move away from a solved cell as reachable.
    fn propagate(&mut self, solved: &[Coord2], direction: ArrowDirection) -> Result<()> {
        self.arrows.clear();
        let last = self.config.size - 1;
        for &(a, b) in solved {
            let end = match direction {
                ArrowDirection::Left => (last, b),
                ArrowDirection::Down => (a, last),
                ArrowDirection::DownLeft => {
                    let steps = (last - a).min(last - b);
                    (a + steps, b + steps)
                }
            };
            let arrow = Arrow {
                direction,
                start: (a, b),
                end,
                color: CONSEQUENCE_COLOR,
            };

            for coords in arrow.covered_cells().skip(1) {
                let cell = &mut self.cells[coords.to_nd_index()];
                debug_assert_ne!(*cell, CellState::Solved, "{coords:?} reachable from solved {:?}", (a, b));
                if *cell == CellState::Undetermined {
                    *cell = CellState::Reachable;
                }
            }
            self.arrows.push(arrow);
        }
        self.render_frame()?;
        self.arrows.clear();
        Ok(())
    }

    fn draw(&mut self) {
        self.canvas.fill(BACKGROUND);
        self.draw_grid_lines();
        self.draw_cells();
        self.draw_arrows();
    }

    fn draw_grid_lines(&mut self) {
        let [vertical, horizontal] = &self.grid_lines;
        for index in 0..=usize::from(self.config.size) {
            let offset = self.config.grid_line_offset(index);
            vertical.draw(&mut self.canvas, offset, 0);
            horizontal.draw(&mut self.canvas, 0, offset);
        }
    }

    fn draw_cells(&mut self) {
        for ((a, b), &cell) in self.cells.indexed_iter() {
            let color = match self.highlight {
                Some(coins) if a + b != coins => cell.color().fade_to_gray(),
                _ => cell.color(),
            };
            let (x, y) = self.config.cell_origin((a as Coord, b as Coord));
            self.shapes.square(color).draw(&mut self.canvas, x, y);
        }
    }

    fn draw_arrows(&mut self) {
        for arrow in self.arrows.iter() {
            if let Some((drawable, x, y)) = arrow.to_drawable(&self.config) {
                drawable.draw(&mut self.canvas, x, y);
            }
        }
    }
}

impl<S> Index<Coord2> for GameGrid<S> {
    type Output = CellState;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: Coord) -> GameGrid<Vec<PixelBuffer>> {
        GameGrid::new(GridConfig::new(size, 3, 2, 1).unwrap(), Vec::new())
    }

    fn solve<S: FrameSink>(grid: &mut GameGrid<S>) {
        while !grid.is_done() {
            grid.step().unwrap();
        }
    }

    /// Losing positions by brute force over every legal move.
    fn brute_force_losing(size: usize) -> Array2<bool> {
        let mut losing = Array2::from_elem([size, size], false);
        for a in 0..size {
            for b in 0..size {
                let row = (0..a).any(|x| losing[[x, b]]);
                let column = (0..b).any(|y| losing[[a, y]]);
                let diagonal = (1..=a.min(b)).any(|k| losing[[a - k, b - k]]);
                losing[[a, b]] = !(row || column || diagonal);
            }
        }
        losing
    }

    #[test]
    fn single_cell_solves_in_one_round() {
        let mut grid = grid(1);

        let solved = grid.step().unwrap();

        assert_eq!(solved, vec![(0, 0)]);
        assert_eq!(grid.cell_at((0, 0)), CellState::Solved);
        assert!(grid.is_done());
        assert_eq!(grid.sink().len(), 4);
    }

    #[test]
    fn two_by_two_solves_in_one_round() {
        let mut grid = grid(2);

        assert_eq!(grid.step().unwrap(), vec![(0, 0)]);

        assert_eq!(grid.cell_at((0, 0)), CellState::Solved);
        for coords in [(0, 1), (1, 0), (1, 1)] {
            assert_eq!(grid.cell_at(coords), CellState::Reachable, "{coords:?}");
        }
        assert!(grid.is_done());
        assert_eq!(grid.rounds(), 1);
    }

    #[test]
    fn first_round_marks_edges_and_main_diagonal() {
        let mut grid = grid(5);

        grid.step().unwrap();

        for ((a, b), &cell) in grid.cells().indexed_iter() {
            let expected = match (a, b) {
                (0, 0) => CellState::Solved,
                _ if a == 0 || b == 0 || a == b => CellState::Reachable,
                _ => CellState::Undetermined,
            };
            assert_eq!(cell, expected, "({a}, {b})");
        }
        assert_eq!(grid.undetermined_count(), 12);
    }

    #[test]
    fn classification_matches_brute_force() {
        let mut grid = grid(31);

        solve(&mut grid);

        let expected = brute_force_losing(31);
        for ((a, b), &cell) in grid.cells().indexed_iter() {
            let losing = expected[[a, b]];
            assert_eq!(cell == CellState::Solved, losing, "({a}, {b})");
            assert_eq!(cell, grid.cell_at((b as Coord, a as Coord)), "symmetry at ({a}, {b})");
        }
        for coords in [(1, 2), (3, 5), (4, 7), (6, 10), (8, 13), (9, 15), (11, 18)] {
            assert_eq!(grid.cell_at(coords), CellState::Solved, "{coords:?}");
        }
    }

    #[test]
    fn newly_solved_cells_only_reach_reachable_positions() {
        let mut grid = GameGrid::new(GridConfig::new(12, 3, 2, 1).unwrap(), DiscardFrames::default());

        while !grid.is_done() {
            let before = grid.cells().clone();
            let solved = grid.step().unwrap();
            assert!(!solved.is_empty(), "round {} made no progress", grid.rounds());

            for &coords in &solved {
                assert_eq!(before[coords.to_nd_index()], CellState::Undetermined);
                for pos in MoveIter::new(coords) {
                    if before.iter().any(|cell| cell.is_determined()) {
                        assert_eq!(before[pos.to_nd_index()], CellState::Reachable, "{coords:?} -> {pos:?}");
                    }
                }
            }
        }
        assert_eq!(grid.sink().emitted, 4 * grid.rounds());
    }

    #[test]
    fn propagation_stops_at_board_edge() {
        let mut grid = grid(6);
        grid.step().unwrap();

        let solved = grid.step().unwrap();

        assert_eq!(solved, vec![(1, 2), (2, 1)]);
        // diagonal from (1, 2) runs (2, 3), (3, 4), (4, 5)
        for coords in [(2, 3), (3, 4), (4, 5), (3, 2), (4, 3), (5, 4)] {
            assert_eq!(grid.cell_at(coords), CellState::Reachable, "{coords:?}");
        }
        for coords in [(5, 2), (1, 5), (2, 5), (5, 1)] {
            assert_eq!(grid.cell_at(coords), CellState::Reachable, "{coords:?}");
        }
        assert_eq!(grid.cell_at((3, 5)), CellState::Undetermined);
        assert_eq!(grid.cell_at((5, 3)), CellState::Undetermined);
        assert!(grid.arrows().is_empty());
    }

    #[test]
    fn finished_grid_step_repeats_identical_frames() {
        let mut grid = grid(4);
        solve(&mut grid);
        let cells = grid.cells().clone();
        let emitted = grid.sink().len();

        assert!(grid.step().unwrap().is_empty());

        let frames = &grid.sink()[emitted..];
        assert_eq!(frames.len(), 4);
        assert!(frames.iter().all(|frame| frame == &frames[0]));
        assert_eq!(grid.cells(), &cells);
    }

    #[test]
    fn frames_show_check_and_consequence_arrows() {
        let mut grid = grid(4);
        grid.step().unwrap();
        grid.step().unwrap();

        let frames = grid.into_sink();
        let has = |frame: &PixelBuffer, color| frame.iter_scan().any(|pixel| pixel == color);

        assert_eq!(frames.len(), 8);
        // the origin is admitted without checks
        assert!(!has(&frames[0], CHECK_COLOR));
        assert!(has(&frames[1], CONSEQUENCE_COLOR));
        assert!(has(&frames[4], CHECK_COLOR));
        assert!(!has(&frames[4], CONSEQUENCE_COLOR));
        assert!(has(&frames[7], CONSEQUENCE_COLOR));
    }

    #[test]
    fn cells_render_in_state_colors() {
        let mut grid = grid(3);
        grid.step().unwrap();
        let config = *grid.config();

        let frame = grid.sink().last().unwrap();
        let color_at = |coords| {
            let (x, y) = config.cell_origin(coords);
            frame[(x, y)]
        };

        assert_eq!(color_at((0, 0)), Color::BLACK);
        assert_eq!(color_at((2, 0)), Color::WHITE);
        assert_eq!(color_at((1, 2)), Color::GRAY);
        let line = config.grid_line_offset(1);
        assert_eq!(frame[(line, 1)], Color::BLACK);
        assert_eq!(frame[(0, 0)], BACKGROUND);
    }

    #[test]
    fn highlight_fades_cells_off_the_split_line() {
        let mut grid = grid(4);
        solve(&mut grid);
        let config = *grid.config();

        grid.set_highlight(Some(3));
        grid.render_frame().unwrap();

        let frame = grid.sink().last().unwrap();
        let color_at = |coords| {
            let (x, y) = config.cell_origin(coords);
            frame[(x, y)]
        };
        assert_eq!(color_at((1, 2)), Color::BLACK);
        assert_eq!(color_at((0, 3)), Color::WHITE);
        assert_eq!(color_at((0, 0)), Color::rgb(126, 126, 126));
        assert_eq!(color_at((3, 3)), Color::rgb(211, 211, 211));
    }

    #[test]
    fn winning_splits_scan_the_split_line() {
        let mut grid = GameGrid::new(GridConfig::default(), DiscardFrames::default());
        solve(&mut grid);

        let split = |coins| {
            grid.winning_splits(coins)
                .into_iter()
                .map(|split| (split.pile_a, split.pile_b))
                .collect::<Vec<_>>()
        };

        assert_eq!(split(20), vec![]);
        assert_eq!(split(21), vec![(8, 13), (13, 8)]);
        assert_eq!(split(29), vec![(11, 18), (18, 11)]);
        assert_eq!(split(61), vec![]);
        assert_eq!(grid.winning_splits(24)[0].coins, 24);
    }

    #[test]
    fn frames_on_disk_are_numbered_without_gaps() {
        let dir = std::env::temp_dir().join(format!("wythoff-grid-frames-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let mut grid = GameGrid::new(GridConfig::new(2, 3, 2, 1).unwrap(), PpmFileSink::in_directory(&dir));

        grid.render_frame().unwrap();
        grid.step().unwrap();

        let names: Vec<_> = grid
            .sink()
            .written_paths()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["frame000.ppm", "frame001.ppm", "frame002.ppm", "frame003.ppm", "frame004.ppm"]);
        let last = std::fs::read_to_string(dir.join("frame004.ppm")).unwrap();
        assert_eq!(&PixelBuffer::from_ppm(&last).unwrap(), grid.canvas());
        assert!(!dir.join("frame005.ppm").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    #[should_panic]
    fn grid_lines_thicker_than_margin_panic() {
        GameGrid::new(GridConfig::new_unchecked(2, 0, 1, 1), DiscardFrames::default());
    }

    #[test]
    #[should_panic]
    fn empty_board_panics_on_step() {
        let mut grid = GameGrid::new(GridConfig::new_unchecked(0, 3, 1, 1), DiscardFrames::default());

        let _ = grid.step();
    }
}

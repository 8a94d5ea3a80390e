use alloc::collections::VecDeque;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square minesweeper grid. Owns every cell exclusively; all mutation goes
/// through the command methods. The board holds no game-over state: it
/// reports `HitMine` and answers `is_won`, and the caller owns the verdict.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    size: Coord,
    mines: CellCount,
}

impl Board {
    pub fn new(config: GameConfig, generator: impl MineGenerator) -> Result<Self> {
        let board = Self::from_mine_mask(generator.generate(config))?;
        if board.mines != config.mines {
            log::warn!(
                "generator placed {} mines, requested {}",
                board.mines,
                config.mines
            );
        }
        Ok(board)
    }

    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (rows, cols) = mine_mask.dim();
        if rows != cols || rows == 0 {
            return Err(GameError::InvalidBoardShape);
        }
        let size: Coord = rows.try_into().map_err(|_| GameError::InvalidBoardShape)?;

        let mines = mine_mask
            .iter()
            .filter(|&&mine| mine)
            .count()
            .try_into()
            .unwrap();

        // Adjacency counts are fixed here and never recomputed afterwards.
        let cells = Array2::from_shape_fn(mine_mask.raw_dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            Cell {
                mine: mine_mask[(row, col)],
                flagged: false,
                revealed: false,
                adjacent_mines: neighbors(coords, size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count()
                    .try_into()
                    .unwrap(),
            }
        });

        Ok(Self { cells, size, mines })
    }

    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::InvalidSize);
        }
        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.size && coords.1 < self.size {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord {
        self.size
    }

    pub fn mine_count(&self) -> CellCount {
        self.mines
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn cell(&self, coords: Coord2) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    /// Recounted on every call, never cached.
    pub fn unrevealed_count(&self) -> CellCount {
        self.cells
            .iter()
            .filter(|cell| !cell.revealed)
            .count()
            .try_into()
            .unwrap()
    }

    pub fn iter_unrevealed(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| !cell.revealed)
            .map(|((row, col), cell)| ((row as Coord, col as Coord), *cell))
    }

    /// Won iff the unrevealed cells are exactly the mines.
    pub fn is_won(&self) -> bool {
        self.unrevealed_count() == self.mines
    }

    /// Open command: reveals the cell at `coords`. Revealed and flagged cells
    /// refuse the command; a mine is reported, not treated as an error; a
    /// zero cell triggers the flood fill.
    pub fn open(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if !cell.is_openable() {
            return Ok(RevealOutcome::NoChange);
        }
        self.cells[coords.to_nd_index()].revealed = true;

        if cell.mine {
            return Ok(RevealOutcome::HitMine);
        }

        let mut revealed = 1;
        if cell.adjacent_mines == 0 {
            revealed += self.flood_from(coords);
        }
        Ok(RevealOutcome::Revealed(revealed))
    }

    /// Flood fill outward from an already-revealed zero cell. The origin
    /// itself is the caller's responsibility and is not touched here.
    /// Returns the number of newly revealed cells.
    pub fn reveal_empty_cells(&mut self, coords: Coord2) -> Result<CellCount> {
        let coords = self.validate_coords(coords)?;
        Ok(self.flood_from(coords))
    }

    fn flood_from(&mut self, origin: Coord2) -> CellCount {
        let mut revealed: CellCount = 0;
        let mut to_visit = VecDeque::from([origin]);

        while let Some(center) = to_visit.pop_front() {
            for pos in neighbors(center, self.size) {
                let cell = &mut self.cells[pos.to_nd_index()];
                // Flags are a player signal and act as barriers. A zero
                // region never borders a mine, but skip mines anyway.
                if cell.revealed || cell.flagged || cell.mine {
                    continue;
                }
                cell.revealed = true;
                revealed += 1;
                if cell.adjacent_mines == 0 {
                    to_visit.push_back(pos);
                }
            }
        }
        revealed
    }

    /// Flag command: flips the flag on an unrevealed cell. Flagging a
    /// revealed cell is meaningless and is refused.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.revealed {
            return Ok(FlagOutcome::NoChange);
        }
        cell.flagged = !cell.flagged;
        Ok(FlagOutcome::Changed)
    }

    /// End-of-game disclosure: reveals every mine, leaving safe cells and
    /// flag bits untouched.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.mine {
                cell.revealed = true;
            }
        }
    }
}

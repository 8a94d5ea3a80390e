use super::*;

/// Uniform random placement of exactly `config.mines` distinct cells, driven
/// by a seeded RNG. Each mine picks a uniformly random still-free slot, so
/// the loop terminates after exactly `mines` draws at any density (the
/// bounded equivalent of rejection sampling, with the same distribution).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMineGenerator {
    seed: u64,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn generate(self, config: GameConfig) -> Array2<bool> {
        use rand::prelude::*;

        let total_cells = config.total_cells();
        let nd_size = (config.size, config.size).to_nd_index();

        // optimize for full boards
        if config.mines >= total_cells {
            return Array2::from_elem(nd_size, true);
        }

        let mut mines: Array2<bool> = Array2::default(nd_size);
        let mut free_cells = total_cells;
        let mut mines_placed: CellCount = 0;

        let mut rng = SmallRng::seed_from_u64(self.seed);
        {
            let cells = mines.as_slice_mut().expect("layout should be standard");
            while mines_placed < config.mines {
                let mut skip: CellCount = rng.random_range(0..free_cells);
                for cell in cells.iter_mut() {
                    if *cell {
                        continue;
                    }
                    if skip == 0 {
                        *cell = true;
                        mines_placed += 1;
                        free_cells -= 1;
                        break;
                    }
                    skip -= 1;
                }
            }
        }

        log::debug!(
            "generated {0}x{0} mine mask with {1} mines (seed {2})",
            config.size,
            mines_placed,
            self.seed
        );
        mines
    }
}

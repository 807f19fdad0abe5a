use serde::{Deserialize, Serialize};

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the board in cells
    pub grid_width: i32,
    /// Height of the board in cells
    pub grid_height: i32,
    /// Size of one cell in pixels (sprite size in the classic version)
    pub cell_size: i32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Movement advances once every this many frames
    pub frames_per_tick: u32,
    /// Cell column the head starts in
    pub start_column: i32,
    /// Cell row the snake starts on
    pub start_row: i32,
    /// Cell the flower starts in
    pub flower_start_cell: (i32, i32),
    /// High score the session starts with
    pub starting_hi_score: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 25,
            cell_size: 16,
            initial_snake_length: 4,
            frames_per_tick: 10,
            start_column: 25,
            start_row: 12,
            flower_start_cell: (4, 12),
            starting_hi_score: 150,
        }
    }
}

impl GameConfig {
    /// Board width in pixels
    pub fn width_px(&self) -> i32 {
        self.grid_width * self.cell_size
    }

    /// Board height in pixels
    pub fn height_px(&self) -> i32 {
        self.grid_height * self.cell_size
    }

    /// A small board for tests
    pub fn small() -> Self {
        Self {
            grid_width: 10,
            grid_height: 10,
            start_column: 5,
            start_row: 5,
            flower_start_cell: (2, 5),
            starting_hi_score: 0,
            ..Default::default()
        }
    }
}

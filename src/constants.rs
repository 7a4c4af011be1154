// Pixel geometry of a level
pub const MAX_CELL_SIZE: u32 = 60;
pub const CANVAS_SIZE: u32 = 400; // Largest board edge in pixels

// Collision sampling: segments are walked in steps of cell_size / SAMPLES_PER_CELL
pub const SAMPLES_PER_CELL: u32 = 4;

// Terminal cells used to draw one maze cell (columns are about half as wide as rows are tall)
pub const CELL_COLUMNS: u16 = 4;
pub const CELL_ROWS: u16 = 2;

// Game flow (in milliseconds)
pub const COLLISION_FLASH: u64 = 400; // How long the board flashes after hitting a wall
pub const CELEBRATION_TIME: u64 = 2000; // Pause on the treasure before the next level
pub const POINTS_PER_LEVEL: u32 = 10;

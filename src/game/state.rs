use super::action::Direction;

/// A position on the board, in pixels.
///
/// Both coordinates are kept at multiples of the cell size so that positions
/// compare exactly against the flower and the snake's own segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by a pixel delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction, cell_size: i32) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * cell_size, dy * cell_size)
    }

    /// True if both coordinates sit on the cell grid
    pub fn is_grid_aligned(&self, cell_size: i32) -> bool {
        self.x % cell_size == 0 && self.y % cell_size == 0
    }
}

/// The snake: body segments with the head at index 0
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a snake of `length` contiguous segments starting at `head`,
    /// with the body trailing away from the direction of travel
    pub fn new(head: Position, direction: Direction, length: usize, cell_size: i32) -> Self {
        let mut body = vec![head];

        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx * cell_size, -dy * cell_size);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Body segments behind the head
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check whether a position collides with an occupied body segment
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Commit a move: the new head goes in at index 0, every other segment
    /// shifts one slot toward the tail, the old tail drops off
    pub fn advance(&mut self, new_head: Position) {
        self.body.insert(0, new_head);
        self.body.pop();
    }

    /// Grow by one segment. The new segment duplicates the tail, so the
    /// length rises immediately and the duplicate unfolds on the next move.
    pub fn grow(&mut self) {
        let tail = *self.body.last().unwrap();
        self.body.push(tail);
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// How the snake died
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head crossed the edge of the board
    Wall,
    /// Head ran into the snake's own body
    SelfCollision,
}

/// Complete game state, also the read-only snapshot the renderer draws from
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub flower: Position,
    pub score: u32,
    pub hi_score: u32,
    pub is_alive: bool,
    /// Gates the death event (and so the crash sound) to once per episode
    pub death_reported: bool,
    /// Board width in pixels
    pub width_px: i32,
    /// Board height in pixels
    pub height_px: i32,
    pub cell_size: i32,
}

impl GameState {
    pub fn new(
        snake: Snake,
        flower: Position,
        width_px: i32,
        height_px: i32,
        cell_size: i32,
    ) -> Self {
        Self {
            snake,
            flower,
            score: 0,
            hi_score: 0,
            is_alive: true,
            death_reported: false,
            width_px,
            height_px,
            cell_size,
        }
    }

    /// True while `pos` is strictly inside the board. A head at 0 or at the
    /// far edge counts as having hit the wall.
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x > 0 && pos.x < self.width_px && pos.y > 0 && pos.y < self.height_px
    }

    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }
}

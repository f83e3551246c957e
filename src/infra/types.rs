use std::fmt;

use crate::error::{ActionError, WindowError};

/// Stable identifier of a pursuer for the lifetime of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AgentId(pub u32);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    pub fn shifted(&self, offset: Offset) -> Position {
        Position::new(self.x + offset.dx, self.y + offset.dy)
    }

    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.distance(other) == 1
    }
}

/// Relative displacement on the grid. +x is right, +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dx: i32,
    pub dy: i32,
}

impl Offset {
    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn manhattan(&self) -> i32 {
        self.dx.abs() + self.dy.abs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Stay,
    Up,
    Down,
    Left,
    Right,
}

impl Action {
    /// Directional moves in the order legality checks visit them.
    pub const DIRECTIONS: [Action; 4] = [Action::Up, Action::Down, Action::Left, Action::Right];

    pub fn offset(&self) -> Option<Offset> {
        match self {
            Action::Stay => None,
            Action::Up => Some(Offset::new(0, -1)),
            Action::Down => Some(Offset::new(0, 1)),
            Action::Left => Some(Offset::new(-1, 0)),
            Action::Right => Some(Offset::new(1, 0)),
        }
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Action::Left | Action::Right)
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Action::Up | Action::Down)
    }

    /// Moves along the axis perpendicular to this one; empty for `Stay`.
    pub fn orthogonal(&self) -> &'static [Action] {
        if self.is_horizontal() {
            &[Action::Up, Action::Down]
        } else if self.is_vertical() {
            &[Action::Left, Action::Right]
        } else {
            &[]
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            Action::Stay => 0,
            Action::Up => 1,
            Action::Down => 2,
            Action::Left => 3,
            Action::Right => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Stay => "STAY",
            Action::Up => "UP",
            Action::Down => "DOWN",
            Action::Left => "LEFT",
            Action::Right => "RIGHT",
        }
    }
}

impl TryFrom<u8> for Action {
    type Error = ActionError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Action::Stay),
            1 => Ok(Action::Up),
            2 => Ok(Action::Down),
            3 => Ok(Action::Left),
            4 => Ok(Action::Right),
            other => Err(ActionError(other)),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cell code as it appears inside an observation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Wall,
    Agent,
    Target,
}

impl Cell {
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Wall => 1,
            Cell::Agent => 2,
            Cell::Target => 3,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = WindowError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Wall),
            2 => Ok(Cell::Agent),
            3 => Ok(Cell::Target),
            other => Err(WindowError::UnknownCell(other)),
        }
    }
}

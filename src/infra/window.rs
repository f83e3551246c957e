use crate::error::WindowError;
use crate::infra::{Action, Cell, Offset};

/// Egocentric square view of the grid, row-major, centered on the observer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationWindow {
    cells: Vec<Cell>,
    side: usize,
}

impl ObservationWindow {
    pub fn from_cells(cells: Vec<Cell>) -> Result<Self, WindowError> {
        let side = (cells.len() as f64).sqrt() as usize;
        if side * side != cells.len() || side % 2 == 0 {
            return Err(WindowError::NotOddSquare(cells.len()));
        }
        Ok(Self { cells, side })
    }

    /// Parse raw simulator cell codes.
    pub fn from_codes(codes: &[u8]) -> Result<Self, WindowError> {
        let cells = codes
            .iter()
            .map(|&code| Cell::try_from(code))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(cells)
    }

    /// All-empty window of the given radius.
    pub fn empty(radius: usize) -> Self {
        let side = 2 * radius + 1;
        Self {
            cells: vec![Cell::Empty; side * side],
            side,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn radius(&self) -> usize {
        self.side / 2
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a displacement from the center, `None` outside the window.
    pub fn get(&self, offset: Offset) -> Option<Cell> {
        self.index_of(offset).map(|index| self.cells[index])
    }

    /// Overwrite the cell at `offset`; returns false when it lies outside the window.
    pub fn set(&mut self, offset: Offset, cell: Cell) -> bool {
        match self.index_of(offset) {
            Some(index) => {
                self.cells[index] = cell;
                true
            }
            None => false,
        }
    }

    pub fn contains_target(&self) -> bool {
        self.cells.contains(&Cell::Target)
    }

    fn index_of(&self, offset: Offset) -> Option<usize> {
        let center = self.radius() as i32;
        let col = center + offset.dx;
        let row = center + offset.dy;
        let side = self.side as i32;
        if !(0..side).contains(&col) || !(0..side).contains(&row) {
            return None;
        }
        Some((row * side + col) as usize)
    }

    fn offset_of(&self, index: usize) -> Offset {
        let center = self.radius() as i32;
        let row = (index / self.side) as i32;
        let col = (index % self.side) as i32;
        Offset::new(col - center, row - center)
    }

    /// Offsets of every visible target, in scan order.
    pub fn target_offsets(&self) -> impl Iterator<Item = Offset> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Target)
            .map(|(index, _)| self.offset_of(index))
    }

    /// Closest target by Manhattan distance; the first one scanned wins ties.
    pub fn nearest_target_offset(&self) -> Option<Offset> {
        let mut best: Option<Offset> = None;
        for offset in self.target_offsets() {
            if best.is_none_or(|current| offset.manhattan() < current.manhattan()) {
                best = Some(offset);
            }
        }
        best
    }

    /// Directional moves whose neighbour is inside the window and not a wall.
    pub fn legal_moves(&self) -> Vec<Action> {
        Action::DIRECTIONS
            .into_iter()
            .filter(|action| {
                action
                    .offset()
                    .and_then(|offset| self.get(offset))
                    .is_some_and(|cell| cell != Cell::Wall)
            })
            .collect()
    }

    pub fn greedy_chase_action(&self) -> Action {
        match self.nearest_target_offset() {
            Some(offset) => step_toward(offset),
            None => Action::Stay,
        }
    }
}

/// One greedy step toward `offset`. The x-axis wins whenever |dx| >= |dy|.
pub fn step_toward(offset: Offset) -> Action {
    let Offset { dx, dy } = offset;
    let horizontal = if dx > 0 {
        Some(Action::Right)
    } else if dx < 0 {
        Some(Action::Left)
    } else {
        None
    };
    let vertical = if dy > 0 {
        Some(Action::Down)
    } else if dy < 0 {
        Some(Action::Up)
    } else {
        None
    };

    let preferred = if dx.abs() >= dy.abs() {
        horizontal.or(vertical)
    } else {
        vertical.or(horizontal)
    };
    preferred.unwrap_or(Action::Stay)
}

use std::collections::{HashMap, HashSet};

use rand::seq::{IndexedRandom, SliceRandom};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::error::ConfigError;
use crate::infra::{Action, AgentId, Cell, ObservationWindow, Offset, Position};
use crate::planners::joint::JointAction;
use crate::sim::{CaptureEvent, Observations, Simulator, StepOutcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridConfig {
    pub width: i32,
    pub height: i32,
    pub num_predators: usize,
    pub num_prey: usize,
    /// Adjacent pursuers needed to catch one prey.
    pub prey_strength: usize,
    pub obs_radius: usize,
    pub max_steps: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            num_predators: 2,
            num_prey: 1,
            prey_strength: 1,
            obs_radius: 2,
            max_steps: 200,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Prey {
    position: Position,
    caught: bool,
}

/// Predator–prey world with a solid border wall.
#[derive(Debug, Clone)]
pub struct GridWorld {
    config: GridConfig,
    walls: HashSet<Position>,
    predators: Vec<Position>,
    prey: Vec<Prey>,
    rng: ChaCha8Rng,
    tick: usize,
}

impl GridWorld {
    pub fn new(config: GridConfig) -> Result<Self, ConfigError> {
        let invalid = |key: &str, value: String| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        };
        if config.width < 3 || config.height < 3 {
            return Err(invalid("grid", format!("{}x{}", config.width, config.height)));
        }
        if config.num_predators == 0 {
            return Err(invalid("predators", "0".to_string()));
        }
        if config.prey_strength == 0 || config.prey_strength > 4 {
            return Err(invalid("prey_strength", config.prey_strength.to_string()));
        }
        let interior = (config.width - 2)
            .checked_mul(config.height - 2)
            .ok_or_else(|| invalid("grid", format!("{}x{}", config.width, config.height)))?
            as usize;
        if config.num_predators + config.num_prey > interior {
            return Err(invalid(
                "agents",
                format!("{} do not fit in {} cells", config.num_predators + config.num_prey, interior),
            ));
        }

        let mut walls = HashSet::new();
        for x in 0..config.width {
            walls.insert(Position::new(x, 0));
            walls.insert(Position::new(x, config.height - 1));
        }
        for y in 0..config.height {
            walls.insert(Position::new(0, y));
            walls.insert(Position::new(config.width - 1, y));
        }

        Ok(Self {
            config,
            walls,
            predators: Vec::new(),
            prey: Vec::new(),
            rng: ChaCha8Rng::seed_from_u64(0),
            tick: 0,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn add_wall(&mut self, position: Position) {
        self.walls.insert(position);
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn predator_positions(&self) -> &[Position] {
        &self.predators
    }

    pub fn prey_positions(&self) -> Vec<Position> {
        self.prey
            .iter()
            .filter(|prey| !prey.caught)
            .map(|prey| prey.position)
            .collect()
    }

    /// Put pieces at fixed positions, replacing the current layout.
    pub fn place(&mut self, predators: Vec<Position>, prey: Vec<Position>) -> Observations {
        self.predators = predators;
        self.prey = prey
            .into_iter()
            .map(|position| Prey {
                position,
                caught: false,
            })
            .collect();
        self.tick = 0;
        self.observations()
    }

    fn in_bounds(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.x < self.config.width && pos.y >= 0 && pos.y < self.config.height
    }

    fn is_blocked(&self, pos: &Position) -> bool {
        !self.in_bounds(pos) || self.walls.contains(pos)
    }

    fn is_occupied(&self, pos: &Position) -> bool {
        self.predators.contains(pos)
            || self
                .prey
                .iter()
                .any(|prey| !prey.caught && prey.position == *pos)
    }

    fn cell_at(&self, pos: &Position) -> Cell {
        if self.is_blocked(pos) {
            Cell::Wall
        } else if self.predators.contains(pos) {
            Cell::Agent
        } else if self
            .prey
            .iter()
            .any(|prey| !prey.caught && prey.position == *pos)
        {
            Cell::Target
        } else {
            Cell::Empty
        }
    }

    fn window_for(&self, center: Position) -> ObservationWindow {
        let radius = self.config.obs_radius as i32;
        let mut window = ObservationWindow::empty(self.config.obs_radius);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let offset = Offset::new(dx, dy);
                window.set(offset, self.cell_at(&center.shifted(offset)));
            }
        }
        window
    }

    fn observations(&self) -> Observations {
        self.predators
            .iter()
            .enumerate()
            .map(|(index, &pos)| {
                let codes = self.window_for(pos).cells().iter().map(Cell::code).collect();
                (AgentId(index as u32), codes)
            })
            .collect()
    }

    fn move_predators(&mut self, actions: &JointAction) {
        for index in 0..self.predators.len() {
            let action = actions.get(AgentId(index as u32)).unwrap_or(Action::Stay);
            let Some(offset) = action.offset() else {
                continue;
            };
            let next = self.predators[index].shifted(offset);
            if !self.is_blocked(&next) && !self.is_occupied(&next) {
                self.predators[index] = next;
            }
        }
    }

    fn move_prey(&mut self) {
        for index in 0..self.prey.len() {
            if self.prey[index].caught {
                continue;
            }
            let current = self.prey[index].position;
            let options: Vec<Position> = Action::DIRECTIONS
                .iter()
                .filter_map(|action| action.offset())
                .map(|offset| current.shifted(offset))
                .filter(|pos| !self.is_blocked(pos) && !self.is_occupied(pos))
                .chain(std::iter::once(current))
                .collect();
            if let Some(&next) = options.choose(&mut self.rng) {
                self.prey[index].position = next;
            }
        }
    }

    fn resolve_captures(&mut self, rewards: &mut HashMap<AgentId, f64>) -> Vec<CaptureEvent> {
        let mut captures = Vec::new();
        for index in 0..self.prey.len() {
            if self.prey[index].caught {
                continue;
            }
            let position = self.prey[index].position;
            let involved: Vec<AgentId> = self
                .predators
                .iter()
                .enumerate()
                .filter(|(_, pred)| pred.is_adjacent(&position))
                .map(|(i, _)| AgentId(i as u32))
                .collect();
            if involved.len() >= self.config.prey_strength {
                self.prey[index].caught = true;
                for agent in &involved {
                    *rewards.entry(*agent).or_insert(0.0) += 1.0;
                }
                debug!("prey {} caught at {:?} by {:?}", index, position, involved);
                captures.push(CaptureEvent {
                    prey_index: index,
                    position,
                    involved,
                });
            }
        }
        captures
    }
}

impl Simulator for GridWorld {
    fn agents(&self) -> Vec<AgentId> {
        (0..self.config.num_predators as u32).map(AgentId).collect()
    }

    fn observation_radius(&self) -> usize {
        self.config.obs_radius
    }

    fn reset(&mut self, seed: u64) -> Observations {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        let mut free: Vec<Position> = (1..self.config.height - 1)
            .flat_map(|y| (1..self.config.width - 1).map(move |x| Position::new(x, y)))
            .filter(|pos| !self.walls.contains(pos))
            .collect();
        free.shuffle(&mut self.rng);

        let mut cells = free.into_iter();
        let predators = cells.by_ref().take(self.config.num_predators).collect();
        let prey = cells.take(self.config.num_prey).collect();
        self.place(predators, prey)
    }

    fn step(&mut self, actions: &JointAction) -> StepOutcome {
        let mut rewards: HashMap<AgentId, f64> =
            self.agents().into_iter().map(|id| (id, 0.0)).collect();

        self.move_predators(actions);
        self.move_prey();
        let captures = self.resolve_captures(&mut rewards);
        self.tick += 1;

        let all_done = self.prey.iter().all(|prey| prey.caught);
        let truncated = !all_done && self.tick >= self.config.max_steps;

        StepOutcome {
            observations: self.observations(),
            rewards,
            captures,
            all_done,
            truncated,
        }
    }

    fn render(&self) -> Option<String> {
        let mut out = String::new();
        for y in 0..self.config.height {
            for x in 0..self.config.width {
                let ch = match self.cell_at(&Position::new(x, y)) {
                    Cell::Wall => '#',
                    Cell::Agent => 'P',
                    Cell::Target => 'x',
                    Cell::Empty => '.',
                };
                out.push(ch);
            }
            out.push('\n');
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(config: GridConfig) -> GridWorld {
        GridWorld::new(config).unwrap()
    }

    #[test]
    fn test_rejects_impossible_layouts() {
        let tiny = GridConfig {
            width: 3,
            height: 3,
            num_predators: 2,
            ..GridConfig::default()
        };
        assert!(GridWorld::new(tiny).is_err());
        let nobody = GridConfig {
            num_predators: 0,
            ..GridConfig::default()
        };
        assert!(GridWorld::new(nobody).is_err());
    }

    #[test]
    fn test_rejects_grid_too_large_to_count() {
        let huge = GridConfig {
            width: i32::MAX,
            height: i32::MAX,
            ..GridConfig::default()
        };
        assert_eq!(
            GridWorld::new(huge).unwrap_err(),
            ConfigError::InvalidValue {
                key: "grid".to_string(),
                value: format!("{}x{}", i32::MAX, i32::MAX),
            }
        );
    }

    #[test]
    fn test_reset_is_reproducible() {
        let mut a = world(GridConfig::default());
        let mut b = world(GridConfig::default());
        assert_eq!(a.reset(42), b.reset(42));
        assert_eq!(a.predator_positions(), b.predator_positions());
        assert_eq!(a.prey_positions(), b.prey_positions());
        assert_eq!(a.predator_positions().len(), 2);
        assert_eq!(a.prey_positions().len(), 1);
    }

    #[test]
    fn test_observation_is_egocentric() {
        let mut grid = world(GridConfig::default());
        let obs = grid.place(vec![Position::new(1, 1)], vec![Position::new(3, 1)]);
        let window = ObservationWindow::from_codes(&obs[&AgentId(0)]).unwrap();
        assert_eq!(window.get(Offset::new(0, 0)), Some(Cell::Agent));
        assert_eq!(window.get(Offset::new(-1, 0)), Some(Cell::Wall));
        assert_eq!(window.get(Offset::new(-2, -2)), Some(Cell::Wall));
        assert_eq!(window.nearest_target_offset(), Some(Offset::new(2, 0)));
        assert_eq!(window.legal_moves(), vec![Action::Down, Action::Right]);
    }

    #[test]
    fn test_predators_blocked_by_walls_and_each_other() {
        let mut grid = world(GridConfig {
            num_prey: 0,
            ..GridConfig::default()
        });
        grid.place(vec![Position::new(1, 1), Position::new(2, 1)], Vec::new());
        let mut actions = JointAction::all_stay(&grid.agents());
        actions.set(AgentId(0), Action::Right);
        actions.set(AgentId(1), Action::Up);
        grid.step(&actions);
        assert_eq!(
            grid.predator_positions(),
            &[Position::new(1, 1), Position::new(2, 1)]
        );
    }

    #[test]
    fn test_capture_needs_prey_strength() {
        let mut grid = world(GridConfig {
            prey_strength: 2,
            ..GridConfig::default()
        });
        // Prey boxed into the corner so it cannot slip away.
        grid.place(
            vec![Position::new(2, 1), Position::new(1, 3)],
            vec![Position::new(1, 1)],
        );
        let mut actions = JointAction::all_stay(&grid.agents());
        let outcome = grid.step(&actions);
        assert!(outcome.captures.is_empty());
        assert!(!outcome.all_done);

        grid.place(
            vec![Position::new(2, 1), Position::new(1, 2)],
            vec![Position::new(1, 1)],
        );
        actions.set(AgentId(0), Action::Up);
        let outcome = grid.step(&actions);
        assert!(outcome.all_done);
        assert_eq!(outcome.captures.len(), 1);
        assert_eq!(outcome.captures[0].involved, vec![AgentId(0), AgentId(1)]);
        assert_eq!(outcome.rewards[&AgentId(0)], 1.0);
        assert!(grid.prey_positions().is_empty());
    }

    #[test]
    fn test_truncates_at_horizon() {
        let mut grid = world(GridConfig {
            max_steps: 2,
            ..GridConfig::default()
        });
        grid.place(vec![Position::new(1, 1)], vec![Position::new(8, 8)]);
        let actions = JointAction::all_stay(&grid.agents()[..1]);
        assert!(!grid.step(&actions).truncated);
        let outcome = grid.step(&actions);
        assert!(outcome.truncated);
        assert!(!outcome.all_done);
        assert_eq!(grid.tick(), 2);
    }

    #[test]
    fn test_interior_walls_show_up_in_windows() {
        let mut grid = world(GridConfig {
            num_predators: 1,
            ..GridConfig::default()
        });
        grid.add_wall(Position::new(4, 3));
        let obs = grid.place(vec![Position::new(4, 4)], vec![Position::new(6, 6)]);
        let window = ObservationWindow::from_codes(&obs[&AgentId(0)]).unwrap();
        assert_eq!(window.get(Offset::new(0, -1)), Some(Cell::Wall));
        assert!(!window.legal_moves().contains(&Action::Up));
        assert_eq!(grid.config().num_predators, 1);
    }

    #[test]
    fn test_render_marks_pieces() {
        let mut grid = world(GridConfig {
            width: 4,
            height: 3,
            num_predators: 1,
            ..GridConfig::default()
        });
        grid.place(vec![Position::new(1, 1)], vec![Position::new(2, 1)]);
        assert_eq!(grid.render().unwrap(), "####\n#Px#\n####\n");
    }
}

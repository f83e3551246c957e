mod capture_log;
mod composite_observer;
mod default_observer;
mod episode_observer;
mod types;
mod window;

pub use capture_log::{CaptureLog, CaptureRecord};
pub use composite_observer::CompositeObserver;
pub use default_observer::DefaultObserver;
pub use episode_observer::EpisodeObserver;
pub use types::{Action, AgentId, Cell, Offset, Position};
pub use window::{ObservationWindow, step_toward};

pub mod board;
pub mod config;
pub mod game;
pub mod journal;
pub mod replay;
pub mod scheduler;
pub mod state;
pub mod types;

pub use board::{Board, Cell, DEFAULT_LEVEL, MapLoadError, load_map, parse_map};
pub use config::{ConfigError, SimConfig};
pub use game::{EventRecorder, Game, GameObserver, ObserverEvent, Snapshot};
pub use journal::{CommandJournal, CommandRecord, JournalError};
pub use replay::*;
pub use scheduler::TickScheduler;
pub use state::{Enemy, Player, Reward, Trap, Weapon, World};
pub use types::*;

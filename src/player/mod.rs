pub mod catalog;
pub mod commands;
pub mod config;
pub mod episode;
pub mod error;
pub mod handle;
pub mod media;
pub mod queue;
pub mod state;
pub mod store;

pub use commands::PlayerCommand;
pub use config::PlayerConfig;
pub use episode::Episode;
pub use error::PlayerError;
pub use handle::{PlayerHandle, PlayerSubscription};
pub use media::{MediaBridge, MediaDirective, MediaEvent, SimulatedMedia};
pub use state::PlayerState;
pub use store::PlayerStore;

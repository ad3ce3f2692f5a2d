pub mod catalog;
pub mod config;
pub mod error;
pub mod game_data;
pub mod guidance;
pub mod scene;
pub mod session;
pub mod signal_processor;

// Re-exports for convenience
pub use catalog::{RouteCatalog, RouteKey, RouteSet};
pub use error::{CatalogError, ConfigError};
pub use game_data::{ObjectTable, WorldPoint};
pub use guidance::Guidance;
pub use scene::{SceneObject, SceneRegistry};
pub use session::TrialSession;
pub use signal_processor::{
    ChatKind, ProgressSnapshot, SignalHandler, TrialEvent, TrialSignal, TrialTracker, WorldReader,
};

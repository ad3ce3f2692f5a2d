pub mod config;
pub mod trial;

pub use config::{DifficultyVariants, RouteVariants, TrialsConfig};
pub use trial::{Difficulty, RouteVariant, TrialKind};

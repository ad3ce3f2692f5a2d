//! User configuration for the trials tracker.
//!
//! Every field has a serde default so partial TOML files (or none at all)
//! load cleanly.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::trial::{Difficulty, RouteVariant, TrialKind};

/// Route variant selection for each difficulty of one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DifficultyVariants {
    #[serde(default)]
    pub swordfish: RouteVariant,
    #[serde(default)]
    pub shark: RouteVariant,
    #[serde(default)]
    pub marlin: RouteVariant,
}

impl DifficultyVariants {
    pub fn get(&self, difficulty: Difficulty) -> RouteVariant {
        match difficulty {
            Difficulty::Swordfish => self.swordfish,
            Difficulty::Shark => self.shark,
            Difficulty::Marlin => self.marlin,
        }
    }
}

/// Route variants for every (trial, difficulty) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteVariants {
    #[serde(default)]
    pub gwenith_glide: DifficultyVariants,
    #[serde(default)]
    pub jubbly_jive: DifficultyVariants,
    #[serde(default)]
    pub tempor_tantrum: DifficultyVariants,
}

impl RouteVariants {
    /// Active variant for a (trial, difficulty) pair
    pub fn variant(&self, trial: TrialKind, difficulty: Difficulty) -> RouteVariant {
        match trial {
            TrialKind::GwenithGlide => self.gwenith_glide.get(difficulty),
            TrialKind::JubblyJive => self.jubbly_jive.get(difficulty),
            TrialKind::TemporTantrum => self.tempor_tantrum.get(difficulty),
        }
    }
}

/// Top-level tracker configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrialsConfig {
    /// Root of the route catalog (`<trial>/<difficulty>/<variant>/*.json`).
    /// None falls back to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub routes: RouteVariants,
}

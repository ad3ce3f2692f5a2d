//! Trial identifiers shared by the tracker, the catalog and the config.
//!
//! The `key()` strings double as directory names in the route catalog
//! layout (`<trial>/<difficulty>/<variant>/...`), so they must stay stable.

use serde::{Deserialize, Serialize};

/// Which Barracuda Trial is being run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialKind {
    GwenithGlide,
    JubblyJive,
    TemporTantrum,
}

impl TrialKind {
    pub const ALL: [TrialKind; 3] = [
        TrialKind::GwenithGlide,
        TrialKind::JubblyJive,
        TrialKind::TemporTantrum,
    ];

    /// Stable snake_case key used for catalog paths
    pub fn key(self) -> &'static str {
        match self {
            Self::GwenithGlide => "gwenith_glide",
            Self::JubblyJive => "jubbly_jive",
            Self::TemporTantrum => "tempor_tantrum",
        }
    }

    /// In-game display name ("Gwenith Glide")
    pub fn display_name(self) -> &'static str {
        match self {
            Self::GwenithGlide => "Gwenith Glide",
            Self::JubblyJive => "Jubbly Jive",
            Self::TemporTantrum => "Tempor Tantrum",
        }
    }
}

impl std::fmt::Display for TrialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Difficulty tier of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Swordfish,
    Shark,
    Marlin,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Swordfish, Difficulty::Shark, Difficulty::Marlin];

    /// Decode the raw trial-type code the game writes at run start.
    ///
    /// Codes 2/3/4 map to Swordfish/Shark/Marlin; anything else is unknown.
    pub fn from_trial_type_code(code: i32) -> Option<Self> {
        match code {
            2 => Some(Self::Swordfish),
            3 => Some(Self::Shark),
            4 => Some(Self::Marlin),
            _ => None,
        }
    }

    /// Number of sub-stages (splits) a run of this tier has
    pub fn total_stages(self) -> u32 {
        match self {
            Self::Swordfish => 5,
            Self::Shark => 7,
            Self::Marlin => 10,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Swordfish => "swordfish",
            Self::Shark => "shark",
            Self::Marlin => "marlin",
        }
    }

    /// The hardest tier runs two pillar waves in Jubbly Jive
    pub fn is_hardest(self) -> bool {
        self == Self::Marlin
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Swordfish => "Swordfish",
            Self::Shark => "Shark",
            Self::Marlin => "Marlin",
        })
    }
}

/// Named alternative route for the same (trial, difficulty)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteVariant {
    #[default]
    Wiki,
}

impl RouteVariant {
    pub const ALL: [RouteVariant; 1] = [RouteVariant::Wiki];

    pub fn key(self) -> &'static str {
        match self {
            Self::Wiki => "wiki",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_type_code_mapping() {
        assert_eq!(Difficulty::from_trial_type_code(2), Some(Difficulty::Swordfish));
        assert_eq!(Difficulty::from_trial_type_code(3), Some(Difficulty::Shark));
        assert_eq!(Difficulty::from_trial_type_code(4), Some(Difficulty::Marlin));
        assert_eq!(Difficulty::from_trial_type_code(0), None);
        assert_eq!(Difficulty::from_trial_type_code(5), None);
    }

    #[test]
    fn test_total_stages_by_difficulty() {
        assert_eq!(Difficulty::Swordfish.total_stages(), 5);
        assert_eq!(Difficulty::Shark.total_stages(), 7);
        assert_eq!(Difficulty::Marlin.total_stages(), 10);
    }

    #[test]
    fn test_keys_match_serde_names() {
        #[derive(Deserialize)]
        struct Probe {
            trial: TrialKind,
            difficulty: Difficulty,
            variant: RouteVariant,
        }

        let probe: Probe = toml::from_str(
            r#"
trial = "tempor_tantrum"
difficulty = "marlin"
variant = "wiki"
"#,
        )
        .unwrap();
        assert_eq!(probe.trial.key(), "tempor_tantrum");
        assert_eq!(probe.difficulty.key(), "marlin");
        assert_eq!(probe.variant.key(), "wiki");
    }
}

//! Static game identifiers: variable ids, chat phrases, ship parts and the
//! object classification table.

mod objects;
mod ship_parts;
mod world_point;

pub use objects::{ObjectKind, ObjectTable, ObjectTableConfig};
pub use ship_parts::{HullClass, SailMaterial, speed_boost_ticks};
pub use world_point::WorldPoint;

use barracuda_types::TrialKind;

/// Player variables (varps) read on every tick
pub mod varp {
    /// Non-zero while a trial run is in progress
    pub const TIME_START: i32 = 4987;
    /// Lifetime count of completed trials
    pub const TRIALS_COMPLETED: i32 = 5000;
}

/// Variable bits (varbits) read on demand or observed through change notifications
pub mod varbit {
    /// Raw trial-type code, decoded into a difficulty at run start
    pub const IN_TRIAL: i32 = 18410;
    /// Gwenith Glide supply box that completes after the seventh crystal
    pub const LOST_SUPPLY_TRIGGER: i32 = 18524;
    /// Jubbly Jive supply completion, Shark tier
    pub const JUBBLY_SUPPLY_SHARK: i32 = 18468;
    /// Jubbly Jive supply completions, Marlin tier
    pub const JUBBLY_SUPPLY_MARLIN_A: i32 = 18484;
    pub const JUBBLY_SUPPLY_MARLIN_B: i32 = 18469;
    /// First per-objective completion varbit; crate offsets index from here
    pub const OBJECTIVE_BASE: i32 = 18448;
    /// Number of objective varbits following `OBJECTIVE_BASE`
    pub const MAX_OBJECTIVES: i32 = 96;

    /// Completion varbit for a supply crate's objective offset
    pub fn objective(offset: i32) -> Option<i32> {
        (0..MAX_OBJECTIVES)
            .contains(&offset)
            .then_some(OBJECTIVE_BASE + offset)
    }
}

/// Chat phrases the tracker reacts to (markup already stripped)
pub mod chat {
    use super::TrialKind;

    pub const SAIL_TRIM: &str = "You trim the sails, catching the wind for a burst of speed!";
    pub const WIND_MOTE_RELEASE: &str = "You release the wind mote for a burst of speed!";

    pub const IMBUE_PREFIX: &str = "You imbue the Crystal of ";
    pub const LURE_SUFFIX: &str = "balloon toads. Time to lure some jubblies!";
    pub const LURE_SUCCESS_PREFIX: &str = "You successfully lure a jubbly to Gurtob";
    pub const RUM_COLLECT_PREFIX: &str = "You collect the rum shipment";
    pub const RUM_DELIVER_PREFIX: &str = "You deliver the rum shipment";

    /// Exact lines that announce (or restart) a specific trial
    pub static TRIAL_ANNOUNCEMENTS: phf::Map<&'static str, TrialKind> = phf::phf_map! {
        "You prepare to begin the Gwenith Glide..." => TrialKind::GwenithGlide,
        "You reset your progress in the Gwenith Glide." => TrialKind::GwenithGlide,
        "You prepare to begin the Jubbly Jive..." => TrialKind::JubblyJive,
        "You reset your progress in the Jubbly Jive." => TrialKind::JubblyJive,
        "You prepare to begin the Tempor Tantrum..." => TrialKind::TemporTantrum,
        "You reset your progress in the Tempor Tantrum." => TrialKind::TemporTantrum,
    };

    pub fn is_speed_boost(line: &str) -> bool {
        line == SAIL_TRIM || line == WIND_MOTE_RELEASE
    }

    /// Parse the stage number out of "You imbue the Crystal of ... (N/8)".
    ///
    /// Returns None for lines without the prefix or with a malformed payload.
    pub fn parse_imbue_stage(line: &str) -> Option<u32> {
        if !line.starts_with(IMBUE_PREFIX) {
            return None;
        }
        let open = line.find('(')?;
        let rest = &line[open + 1..];
        let slash = rest.find('/')?;
        rest[slash..].find(')')?;
        rest[..slash].parse::<u32>().ok()
    }
}

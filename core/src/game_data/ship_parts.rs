//! Hull classes and sail materials, and the speed-boost duration table
//! they index.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HullClass {
    Raft,
    Skiff,
    Sloop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SailMaterial {
    Wood,
    Oak,
    Teak,
    Mahogany,
    Camphor,
    Ironwood,
    Rosewood,
}

/// Speed-boost duration in ticks for a hull/sail pairing.
///
/// Columns are raft, skiff, sloop.
pub fn speed_boost_ticks(hull: HullClass, sail: SailMaterial) -> u32 {
    let row: [u32; 3] = match sail {
        SailMaterial::Wood => [20, 20, 20],
        SailMaterial::Oak => [22, 22, 22],
        SailMaterial::Teak => [24, 24, 24],
        SailMaterial::Mahogany => [26, 27, 27],
        SailMaterial::Camphor => [30, 30, 30],
        SailMaterial::Ironwood => [33, 33, 33],
        SailMaterial::Rosewood => [36, 36, 36],
    };
    match hull {
        HullClass::Raft => row[0],
        HullClass::Skiff => row[1],
        HullClass::Sloop => row[2],
    }
}

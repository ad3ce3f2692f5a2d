//! JSON loading for a single route directory

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use super::records::{
    PillarDef, PillarRecord, RegionPointRecord, RouteSet, SupplyMeta, SupplyRecord, Waypoint,
};
use crate::error::CatalogError;

pub const ROUTE_FILE: &str = "route.json";
pub const SUPPLIES_FILE: &str = "supplies.json";
pub const CRYSTAL_MOTES_FILE: &str = "crystal_motes.json";
pub const RAPIDS_FILE: &str = "rapids.json";
pub const PILLARS_FILE: &str = "pillars.json";

/// Load all five data files from one `<trial>/<difficulty>/<variant>` directory
pub fn load_route_set(dir: &Path) -> Result<RouteSet, CatalogError> {
    let mut set = RouteSet::new();

    set.waypoints = load_points(dir, ROUTE_FILE)?;
    set.crystal_motes = load_points(dir, CRYSTAL_MOTES_FILE)?;
    set.rapids = load_points(dir, RAPIDS_FILE)?;

    let supplies: Vec<SupplyRecord> = load_list(dir, SUPPLIES_FILE)?;
    let duplicates = set.add_supplies(supplies.into_iter().map(SupplyMeta::from));
    if !duplicates.is_empty() {
        tracing::warn!(dir = %dir.display(), ?duplicates, "Duplicate supply object ids, last entry wins");
    }

    let pillars: Vec<PillarRecord> = load_list(dir, PILLARS_FILE)?;
    set.set_pillars(pillars.into_iter().map(PillarDef::from).collect());

    Ok(set)
}

fn load_points(dir: &Path, file_name: &str) -> Result<Vec<Waypoint>, CatalogError> {
    let records: Vec<RegionPointRecord> = load_list(dir, file_name)?;
    Ok(records.into_iter().map(Waypoint::from).collect())
}

/// Parse a JSON array file; a missing file is an empty list
fn load_list<T: DeserializeOwned>(dir: &Path, file_name: &str) -> Result<Vec<T>, CatalogError> {
    let path = dir.join(file_name);
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Route file missing, treating as empty");
        return Ok(Vec::new());
    }

    let contents = fs::read_to_string(&path).map_err(|e| CatalogError::Io {
        path: path.clone(),
        source: e,
    })?;

    // A literal `null` file is treated like an empty one
    let parsed: Option<Vec<T>> =
        serde_json::from_str(&contents).map_err(|e| CatalogError::Json { path, source: e })?;
    Ok(parsed.unwrap_or_default())
}

//! A live tracking session: catalog, scene registry and tracker wired
//! together behind one event entry point.

use std::path::Path;
use std::sync::Arc;

use barracuda_types::{RouteVariants, TrialsConfig};

use crate::catalog::RouteCatalog;
use crate::config::{objects_path, resolve_data_dir};
use crate::error::CatalogError;
use crate::game_data::ObjectTable;
use crate::guidance::Guidance;
use crate::scene::SceneRegistry;
use crate::signal_processor::{
    ProgressSnapshot, SignalHandler, TrialEvent, TrialSignal, TrialTracker, WorldReader,
};

pub struct TrialSession {
    catalog: Arc<RouteCatalog>,
    registry: SceneRegistry,
    tracker: TrialTracker,
}

impl TrialSession {
    pub fn new(catalog: RouteCatalog, objects: ObjectTable, routes: RouteVariants) -> Self {
        let catalog = Arc::new(catalog);
        let objects = Arc::new(objects);
        Self {
            registry: SceneRegistry::new(Arc::clone(&objects), Arc::clone(&catalog)),
            tracker: TrialTracker::new(Arc::clone(&catalog), objects, routes),
            catalog,
        }
    }

    /// Load the catalog and object table from `data_dir`
    pub fn load(data_dir: &Path, routes: RouteVariants) -> Result<Self, CatalogError> {
        let catalog = RouteCatalog::load_dir(data_dir)?;
        let objects = ObjectTable::load(&objects_path(data_dir))?;
        tracing::info!(
            data_dir = %data_dir.display(),
            route_sets = catalog.len(),
            objects = objects.len(),
            "Session data loaded"
        );
        Ok(Self::new(catalog, objects, routes))
    }

    pub fn from_config(config: &TrialsConfig) -> Result<Self, CatalogError> {
        Self::load(&resolve_data_dir(config), config.routes)
    }

    /// Apply one host notification to the registry and the tracker
    pub fn handle(&mut self, event: &TrialEvent, world: &dyn WorldReader) -> Vec<TrialSignal> {
        match event {
            TrialEvent::ObjectSpawned(obj) => self.registry.on_object_spawned(*obj),
            TrialEvent::ObjectDespawned(obj) => self.registry.on_object_despawned(obj),
            TrialEvent::WorldViewUnloaded { top_level } => self.on_world_view_unloaded(*top_level),
            _ => {}
        }
        self.tracker.handle(event, world)
    }

    /// Like [`handle`](Self::handle), forwarding each signal to `handlers`
    pub fn dispatch(
        &mut self,
        event: &TrialEvent,
        world: &dyn WorldReader,
        handlers: &mut [&mut dyn SignalHandler],
    ) -> usize {
        let signals = self.handle(event, world);
        for signal in &signals {
            for handler in handlers.iter_mut() {
                handler.handle_signal(signal);
            }
        }
        signals.len()
    }

    pub fn on_world_view_unloaded(&mut self, top_level: bool) {
        self.registry.on_world_view_unloaded(top_level);
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.tracker.snapshot()
    }

    /// Guidance queries over `snapshot`, usually one taken from this session
    pub fn guidance<'a>(&'a self, snapshot: &'a ProgressSnapshot) -> Guidance<'a> {
        Guidance::new(snapshot, &self.catalog, &self.registry, self.tracker.routes())
    }

    pub fn tracker(&self) -> &TrialTracker {
        &self.tracker
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &RouteCatalog {
        &self.catalog
    }
}

//! Scene build stages

use crate::assets::MeshGeometry;
use crate::collider::{CollisionSetup, ModelRegistry, RegisteredModel};
use crate::foundation::math::{Transform, Vec3};
use crate::physics::ColliderSet;
use crate::placement::{Placement, PlacedSetup};
use crate::store::{CollisionStore, StoreError};

/// Setup read for one instance
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedSetup {
    /// Instance the setup was read for
    pub model: RegisteredModel,
    /// Colliders in canonical-pose coordinates
    pub setup: CollisionSetup,
}

/// What happened while building a scene
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildReport {
    /// Instances whose colliders were registered
    pub registered: Vec<String>,
    /// Instances without a stored setup
    pub missing: Vec<String>,
    /// Instances skipped because their setup could not be read
    pub failed: Vec<(String, String)>,
    /// Total colliders registered
    pub collider_count: usize,
}

/// Builds a [`ColliderSet`] from registered models and stored setups
pub struct SceneBuilder<'a> {
    store: &'a dyn CollisionStore,
}

impl<'a> SceneBuilder<'a> {
    /// Builder reading from `store`
    pub fn new(store: &'a dyn CollisionStore) -> Self {
        Self { store }
    }

    /// Placement of one instance, using its own ground snap offset
    pub fn placement_for(&self, model: &RegisteredModel) -> Placement {
        Placement::from(model)
    }

    /// Load stage: the stored setup of an instance, empty when none is stored
    pub fn load(&self, model: &RegisteredModel) -> Result<LoadedSetup, StoreError> {
        let setup = self.store.load_or_empty(&model.name, &model.path)?;
        Ok(LoadedSetup {
            model: model.clone(),
            setup,
        })
    }

    /// Place stage: move the setup into world space
    pub fn place(&self, loaded: &LoadedSetup) -> PlacedSetup {
        self.placement_for(&loaded.model).place_setup(loaded.model.name.clone(), &loaded.setup)
    }

    /// Register stage
    pub fn register(&self, colliders: &mut ColliderSet, placed: PlacedSetup) {
        colliders.register(placed);
    }

    /// Run every stage for every registered model
    pub fn build(&self, registry: &ModelRegistry) -> (ColliderSet, BuildReport) {
        let mut colliders = ColliderSet::new();
        let mut report = BuildReport::default();

        for model in registry.iter() {
            let loaded = match self.load(model) {
                Ok(loaded) => loaded,
                Err(e) => {
                    log::error!("Skipping '{}': {e}", model.name);
                    report.failed.push((model.name.clone(), e.to_string()));
                    continue;
                }
            };
            if loaded.setup.is_empty() {
                report.missing.push(model.name.clone());
                continue;
            }

            let placed = self.place(&loaded);
            report.collider_count += placed.len();
            report.registered.push(model.name.clone());
            self.register(&mut colliders, placed);
        }

        log::info!(
            "Scene built: {} colliders from {} instances ({} without colliders, {} failed)",
            report.collider_count,
            report.registered.len(),
            report.missing.len(),
            report.failed.len()
        );
        (colliders, report)
    }

    /// Add an instance's render mesh for the mesh-precision path
    pub fn register_mesh(&self, colliders: &mut ColliderSet, model: &RegisteredModel, mesh: &MeshGeometry) {
        let placement = self.placement_for(model);
        let transform = Transform {
            position: placement.place_point(Vec3::zeros()),
            scale: model.scale,
            ..Transform::default()
        };
        colliders.add_mesh(mesh.to_collision_template().to_world_space(&transform));
    }
}

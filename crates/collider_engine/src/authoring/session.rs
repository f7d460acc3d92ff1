//! Authoring session state machine

use std::collections::VecDeque;

use crate::collider::{ColliderPrimitive, CollisionSetup, ShapeKind, Surface};
use crate::core::config::AuthoringConfig;
use crate::foundation::collections::{ColliderArena, ColliderId, SideTable};
use crate::foundation::math::{Transform, Vec3};
use crate::input::{InputState, KeyCode, MouseState};
use crate::physics::collision::{Ray, WorldSpaceCollisionMesh, AABB};
use crate::store::CollisionStore;
use super::camera::FlyCamera;
use super::commands::{EditorCommand, KeyBindings, ToolMode};
use super::shape::{base_dimensions, base_mesh, default_rotation, default_scale};
use super::AuthoringError;

/// A collider as the editor holds it: base shape, placement and scale
#[derive(Debug, Clone, PartialEq)]
pub struct EditableCollider {
    /// Shape type
    pub kind: ShapeKind,
    /// Center
    pub position: Vec3,
    /// Euler rotation in radians
    pub rotation: Vec3,
    /// Per-axis scale of the base mesh
    pub scale: Vec3,
    /// Surface a floor or ramp was loaded with. Moving carries it along;
    /// resizing or rotating drops it and the plate is sampled again.
    pub sampled: Option<Surface>,
}

impl EditableCollider {
    /// Shape with its default size and tilt at the origin
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            position: Vec3::zeros(),
            rotation: default_rotation(kind),
            scale: default_scale(kind),
            sampled: None,
        }
    }

    /// Absolute dimensions along the collider's own axes
    pub fn dimensions(&self) -> Vec3 {
        base_dimensions(self.kind).component_mul(&self.scale)
    }

    /// Recover the scale that reproduces a primitive's dimensions
    pub fn from_primitive(collider: &ColliderPrimitive) -> Self {
        let kind = collider.kind();
        Self {
            kind,
            position: collider.position(),
            rotation: collider.rotation(),
            scale: collider.dimensions().component_div(&base_dimensions(kind)),
            sampled: collider.surface().cloned(),
        }
    }

    /// Collider primitive with the same world dimensions. A loaded surface
    /// is kept as loaded, shifted by any move since.
    pub fn to_primitive(&self, resolution: usize) -> ColliderPrimitive {
        match (self.kind, &self.sampled) {
            (ShapeKind::Floor, Some(surface)) => ColliderPrimitive::Floor(self.carried(surface)),
            (ShapeKind::Ramp, Some(surface)) => ColliderPrimitive::Ramp(self.carried(surface)),
            _ => ColliderPrimitive::from_dimensions(self.kind, self.position, self.rotation, self.dimensions(), resolution),
        }
    }

    fn carried(&self, surface: &Surface) -> Surface {
        surface.clone().translated(self.position - surface.position)
    }

    fn transform(&self) -> Transform {
        Transform::from_parts(self.position, self.rotation, self.scale)
    }
}

/// What the renderer draws for a collider
#[derive(Debug, Clone)]
pub struct RenderProxy {
    /// Base mesh in world space
    pub mesh: WorldSpaceCollisionMesh,
    /// Drawn highlighted while selected
    pub highlighted: bool,
    /// Gizmo attached while selected
    pub gizmo: Option<ToolMode>,
}

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Confirmation
    Info,
    /// A command failed
    Error,
}

/// Message queued for the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Severity
    pub level: NotificationLevel,
    /// Text shown to the user
    pub message: String,
}

/// Editing state for the colliders of one model
pub struct AuthoringSession {
    pub(super) config: AuthoringConfig,
    pub(super) name: String,
    pub(super) model_path: String,
    colliders: ColliderArena<EditableCollider>,
    proxies: SideTable<RenderProxy>,
    selected: Option<ColliderId>,
    tool: ToolMode,
    camera: FlyCamera,
    input: InputState,
    mouse: MouseState,
    bindings: KeyBindings,
    notifications: VecDeque<Notification>,
    pub(super) dirty: bool,
}

impl AuthoringSession {
    /// Empty session for the setup stored as `name`
    pub fn new(name: impl Into<String>, model_path: impl Into<String>, config: AuthoringConfig) -> Self {
        let camera = FlyCamera::new(Vec3::new(0.0, 5.0, 12.0), config.camera_speed);
        Self {
            config,
            name: name.into(),
            model_path: model_path.into(),
            colliders: ColliderArena::with_key(),
            proxies: SideTable::new(),
            selected: None,
            tool: ToolMode::Select,
            camera,
            input: InputState::new(),
            mouse: MouseState::default(),
            bindings: KeyBindings::default(),
            notifications: VecDeque::new(),
            dirty: false,
        }
    }

    /// Session pre-filled from the store. A missing setup starts empty; a
    /// corrupt one is reported and also starts empty.
    pub fn open(
        name: impl Into<String>,
        model_path: impl Into<String>,
        config: AuthoringConfig,
        store: &dyn CollisionStore,
    ) -> Self {
        let mut session = Self::new(name, model_path, config);
        session.execute_with(EditorCommand::Load, |session, command| session.apply_persistence(command, store));
        session
    }

    /// Store key of the session
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Model the colliders belong to
    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    /// Active tool
    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Selected collider
    pub fn selected(&self) -> Option<ColliderId> {
        self.selected
    }

    /// Collider by id
    pub fn collider(&self, id: ColliderId) -> Option<&EditableCollider> {
        self.colliders.get(id)
    }

    /// Render proxy by id
    pub fn proxy(&self, id: ColliderId) -> Option<&RenderProxy> {
        self.proxies.get(id)
    }

    /// Every collider
    pub fn colliders(&self) -> impl Iterator<Item = (ColliderId, &EditableCollider)> {
        self.colliders.iter()
    }

    /// Number of colliders
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    /// Whether there are no colliders
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Whether there are changes since the last save or load
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Fly camera
    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    /// Fly camera, mutably
    pub fn camera_mut(&mut self) -> &mut FlyCamera {
        &mut self.camera
    }

    /// Shortcut table
    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Create a shape at the origin, switch to the select tool and select it
    pub fn place_collider(&mut self, kind: ShapeKind) -> ColliderId {
        let collider = EditableCollider::new(kind);
        let proxy = RenderProxy {
            mesh: base_mesh(kind).to_world_space(&collider.transform()),
            highlighted: false,
            gizmo: None,
        };
        let id = self.colliders.insert(collider);
        self.proxies.insert(id, proxy);
        self.dirty = true;

        self.tool = ToolMode::Select;
        // The id was just inserted
        let _ = self.select_collider(id);
        log::info!("Placed {kind} collider");
        id
    }

    /// Select a collider, moving the highlight and gizmo from the previous one
    pub fn select_collider(&mut self, id: ColliderId) -> Result<(), AuthoringError> {
        if !self.colliders.contains_key(id) {
            return Err(AuthoringError::UnknownCollider);
        }
        self.deselect();
        if let Some(proxy) = self.proxies.get_mut(id) {
            proxy.highlighted = true;
            proxy.gizmo = Some(self.tool);
        }
        self.selected = Some(id);
        Ok(())
    }

    /// Drop the selection
    pub fn deselect(&mut self) {
        if let Some(proxy) = self.selected.take().and_then(|id| self.proxies.get_mut(id)) {
            proxy.highlighted = false;
            proxy.gizmo = None;
        }
    }

    /// Change the active tool; the gizmo on the selection follows
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
        if let Some(proxy) = self.selected.and_then(|id| self.proxies.get_mut(id)) {
            proxy.gizmo = Some(tool);
        }
    }

    /// Remove the selected collider
    pub fn delete_selected(&mut self) -> Result<ColliderId, AuthoringError> {
        let id = self.selected.take().ok_or(AuthoringError::NothingSelected)?;
        self.colliders.remove(id);
        self.proxies.remove(id);
        self.dirty = true;
        Ok(id)
    }

    /// Remove every collider
    pub fn clear_all(&mut self) {
        self.selected = None;
        self.colliders.clear();
        self.proxies.clear();
        self.dirty = true;
    }

    /// Apply the active tool to the selection. Moving translates by `delta`,
    /// resizing adds it to the scale, rotating adds it to the Euler angles.
    pub fn drag(&mut self, delta: Vec3) -> Result<(), AuthoringError> {
        let id = self.selected.ok_or(AuthoringError::NothingSelected)?;
        let collider = self.colliders.get_mut(id).ok_or(AuthoringError::UnknownCollider)?;

        match self.tool {
            ToolMode::Select => return Ok(()),
            ToolMode::Move => collider.position += delta,
            ToolMode::Rotate => {
                collider.rotation += delta;
                collider.sampled = None;
            }
            ToolMode::Resize => {
                collider.scale += delta;
                collider.sampled = None;
                Self::constrain_scale(collider, &self.config);
            }
        }
        self.dirty = true;
        self.refresh_proxy(id);
        Ok(())
    }

    /// Scale rules that hold after every resize tick
    fn constrain_scale(collider: &mut EditableCollider, config: &AuthoringConfig) {
        let scale = &mut collider.scale;
        for axis in scale.iter_mut() {
            *axis = axis.max(config.min_scale);
        }
        match collider.kind {
            ShapeKind::Cylinder => {
                let radial = (scale.x + scale.z) * 0.5;
                scale.x = radial;
                scale.z = radial;
            }
            ShapeKind::Floor | ShapeKind::Ramp => {
                scale.y = scale.y.clamp(config.min_surface_scale_y, config.max_surface_scale_y);
            }
            ShapeKind::Box => {}
        }
    }

    fn refresh_proxy(&mut self, id: ColliderId) {
        let Some(collider) = self.colliders.get(id) else { return };
        let mesh = base_mesh(collider.kind).to_world_space(&collider.transform());
        if let Some(proxy) = self.proxies.get_mut(id) {
            proxy.mesh = mesh;
        }
    }

    /// Nearest collider hit by a ray
    pub fn pick(&self, ray: &Ray) -> Option<ColliderId> {
        self.proxies
            .iter()
            .filter_map(|(id, proxy)| proxy.mesh.intersect_ray(ray).map(|(t, _, _)| (id, t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    /// Select whatever lies under a screen point (NDC), or deselect
    pub fn click(&mut self, ndc_x: f32, ndc_y: f32) -> Option<ColliderId> {
        let ray = self.camera.ray_through(ndc_x, ndc_y);
        match self.pick(&ray) {
            Some(id) => {
                let _ = self.select_collider(id);
                Some(id)
            }
            None => {
                self.deselect();
                None
            }
        }
    }

    /// Viewport resized
    pub fn resize_viewport(&mut self, width: u32, height: u32) {
        self.mouse.update_window_size(width, height);
        self.camera.aspect = self.mouse.window_width as f32 / self.mouse.window_height as f32;
    }

    /// Cursor moved to a pixel position
    pub fn mouse_moved(&mut self, x: f64, y: f64) {
        self.mouse.update_position(x, y);
    }

    /// Left button pressed
    pub fn mouse_pressed(&mut self) {
        self.mouse.start_drag();
    }

    /// Left button released. A release close to the press is a click and
    /// picks under the cursor; a longer drag leaves the selection alone.
    pub fn mouse_released(&mut self) -> Option<ColliderId> {
        let clicked = !self.mouse.is_dragging();
        self.mouse.end_drag();
        if clicked {
            let (ndc_x, ndc_y) = self.mouse.screen_to_ndc();
            self.click(ndc_x, ndc_y)
        } else {
            self.selected
        }
    }

    /// Axis-aligned bounds of a collider
    pub fn bounds(&self, id: ColliderId) -> Option<AABB> {
        self.proxies.get(id).map(|proxy| proxy.mesh.bounds)
    }

    /// Colliders as a setup with absolute dimensions
    pub fn to_setup(&self) -> CollisionSetup {
        let resolution = self.config.height_map_resolution;
        let colliders = self.colliders.values().map(|c| c.to_primitive(resolution)).collect();
        CollisionSetup::new(self.model_path.clone(), colliders)
    }

    /// Replace every collider with those of a setup
    pub fn replace_with(&mut self, setup: &CollisionSetup) {
        self.clear_all();
        for primitive in &setup.colliders {
            let collider = EditableCollider::from_primitive(primitive);
            let mesh = base_mesh(collider.kind).to_world_space(&collider.transform());
            let id = self.colliders.insert(collider);
            self.proxies.insert(
                id,
                RenderProxy {
                    mesh,
                    highlighted: false,
                    gizmo: None,
                },
            );
        }
        if !setup.model_path.is_empty() {
            self.model_path = setup.model_path.clone();
        }
    }

    /// Queue a message for the user
    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            NotificationLevel::Info => log::info!("{message}"),
            NotificationLevel::Error => log::warn!("{message}"),
        }
        self.notifications.push_back(Notification { level, message });
    }

    /// Take every queued notification
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Run a command. Failures are turned into notifications; the return
    /// value says whether the command succeeded.
    pub fn execute(&mut self, command: EditorCommand, store: &mut dyn CollisionStore) -> bool {
        self.execute_with(command, |session, command| session.apply(command, store))
    }

    fn execute_with(
        &mut self,
        command: EditorCommand,
        run: impl FnOnce(&mut Self, EditorCommand) -> Result<(), AuthoringError>,
    ) -> bool {
        let label = format!("{command:?}");
        match run(self, command) {
            Ok(()) => true,
            Err(e) => {
                self.notify(NotificationLevel::Error, format!("{label}: {e}"));
                false
            }
        }
    }

    fn apply(&mut self, command: EditorCommand, store: &mut dyn CollisionStore) -> Result<(), AuthoringError> {
        match command {
            EditorCommand::Place(kind) => {
                self.place_collider(kind);
            }
            EditorCommand::Select(id) => self.select_collider(id)?,
            EditorCommand::Deselect => self.deselect(),
            EditorCommand::SetTool(tool) => self.set_tool(tool),
            EditorCommand::Drag(delta) => self.drag(delta)?,
            EditorCommand::DeleteSelected => {
                self.delete_selected()?;
            }
            EditorCommand::ClearAll => self.clear_all(),
            EditorCommand::Save => self.save(store)?,
            EditorCommand::Wipe => self.wipe(store)?,
            other => self.apply_persistence(other, store)?,
        }
        Ok(())
    }

    /// Commands that only read from the store or touch files
    fn apply_persistence(&mut self, command: EditorCommand, store: &dyn CollisionStore) -> Result<(), AuthoringError> {
        match command {
            EditorCommand::Load => self.load(store),
            EditorCommand::Export(path) => self.export_to(&path),
            EditorCommand::Import(path) => self.import_from(&path),
            _ => Ok(()),
        }
    }

    /// Key pressed. Camera keys only fly; other keys run their shortcut.
    pub fn key_down(&mut self, key: KeyCode, store: &mut dyn CollisionStore) -> bool {
        let fresh = self.input.handle_key_input(key, true);
        if !fresh || FlyCamera::owns_key(key) {
            return false;
        }
        match self.bindings.command_for(key).cloned() {
            Some(command) => self.execute(command, store),
            None => false,
        }
    }

    /// Key released
    pub fn key_up(&mut self, key: KeyCode) {
        self.input.handle_key_input(key, false);
    }

    /// Advance time: flies the camera with the held keys
    pub fn update(&mut self, dt: f32) {
        self.camera.update(dt, &self.input);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use approx::assert_relative_eq;

    fn session() -> AuthoringSession {
        AuthoringSession::new("shed", "shed.obj", AuthoringConfig::default())
    }

    #[test]
    fn test_place_selects_with_select_tool() {
        let mut session = session();
        session.set_tool(ToolMode::Move);
        let first = session.place_collider(ShapeKind::Box);
        let second = session.place_collider(ShapeKind::Cylinder);

        assert_eq!(session.tool(), ToolMode::Select);
        assert_eq!(session.selected(), Some(second));
        assert!(!session.proxy(first).unwrap().highlighted);
        assert!(session.proxy(second).unwrap().highlighted);
        assert_relative_eq!(session.collider(second).unwrap().dimensions(), Vec3::new(2.0, 3.0, 2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_drag_applies_active_tool() {
        let mut session = session();
        let id = session.place_collider(ShapeKind::Box);
        session.set_tool(ToolMode::Move);
        session.drag(Vec3::new(1.0, 0.0, -2.0)).unwrap();
        assert_eq!(session.collider(id).unwrap().position, Vec3::new(1.0, 0.0, -2.0));
        assert_eq!(session.proxy(id).unwrap().gizmo, Some(ToolMode::Move));
        assert_relative_eq!(session.bounds(id).unwrap().center(), Vec3::new(1.0, 0.0, -2.0), epsilon = 1e-5);

        session.set_tool(ToolMode::Rotate);
        session.drag(Vec3::new(0.0, 0.5, 0.0)).unwrap();
        assert_eq!(session.collider(id).unwrap().rotation.y, 0.5);
    }

    #[test]
    fn test_resize_constraints() {
        let mut session = session();
        let cylinder = session.place_collider(ShapeKind::Cylinder);
        session.set_tool(ToolMode::Resize);
        session.drag(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let scale = session.collider(cylinder).unwrap().scale;
        assert_relative_eq!(scale.x, 2.5);
        assert_relative_eq!(scale.z, 2.5);

        let floor = session.place_collider(ShapeKind::Floor);
        session.set_tool(ToolMode::Resize);
        session.drag(Vec3::new(0.0, 3.0, 0.0)).unwrap();
        assert_relative_eq!(session.collider(floor).unwrap().scale.y, 0.5);
        session.drag(Vec3::new(0.0, -3.0, 0.0)).unwrap();
        assert_relative_eq!(session.collider(floor).unwrap().scale.y, 0.1);
    }

    #[test]
    fn test_delete_and_errors_become_notifications() {
        let mut store = MemoryStore::new();
        let mut session = session();
        assert!(!session.execute(EditorCommand::DeleteSelected, &mut store));
        let notes = session.drain_notifications();
        assert_eq!(notes.len(), 1);
        assert_eq!(notes[0].level, NotificationLevel::Error);

        let id = session.place_collider(ShapeKind::Ramp);
        assert!(session.execute(EditorCommand::DeleteSelected, &mut store));
        assert!(session.collider(id).is_none());
        assert!(session.proxy(id).is_none());
        assert!(!session.execute(EditorCommand::Select(id), &mut store));
    }

    #[test]
    fn test_pick_nearest_collider() {
        let mut session = session();
        let near = session.place_collider(ShapeKind::Box);
        session.set_tool(ToolMode::Move);
        session.drag(Vec3::new(0.0, 0.0, 5.0)).unwrap();
        let far = session.place_collider(ShapeKind::Box);
        session.deselect();

        let ray = Ray::new(Vec3::new(0.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(session.pick(&ray), Some(near));
        let miss = Ray::new(Vec3::new(10.0, 0.0, 20.0), Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(session.pick(&miss), None);
        assert_ne!(near, far);
    }

    #[test]
    fn test_mouse_click_picks_but_drag_does_not() {
        let mut session = session();
        let id = session.place_collider(ShapeKind::Box);
        session.deselect();
        session.camera_mut().position = Vec3::new(0.0, 0.0, 12.0);
        session.resize_viewport(800, 600);

        session.mouse_moved(400.0, 300.0);
        session.mouse_pressed();
        assert_eq!(session.mouse_released(), Some(id));
        assert_eq!(session.selected(), Some(id));

        session.deselect();
        session.mouse_pressed();
        session.mouse_moved(440.0, 300.0);
        assert_eq!(session.mouse_released(), None);
        assert_eq!(session.selected(), None);
    }

    #[test]
    fn test_camera_keys_never_edit() {
        let mut store = MemoryStore::new();
        let mut session = session();
        assert!(!session.key_down(KeyCode::W, &mut store));
        session.update(1.0);
        assert!(session.camera().position.z < 12.0);
        assert!(session.is_empty());

        assert!(session.key_down(KeyCode::F, &mut store));
        assert_eq!(session.len(), 1);
    }
}

//! Command-driven editor state
//!
//! Wraps one authoring session plus a scene made of registered model
//! instances, so a script can author colliders, save them and walk an
//! actor through the result.

use std::io;

use collider_engine::assets::{GeometrySource, MeshLoadError, ObjLoader};
use collider_engine::authoring::{AuthoringSession, EditorCommand, NotificationLevel};
use collider_engine::collider::ModelRegistry;
use collider_engine::config::ConfigError;
use collider_engine::core::config::CollisionConfig;
use collider_engine::decomposition::{Decomposer, DecompositionError};
use collider_engine::foundation::math::Vec3;
use collider_engine::physics::{ColliderSet, MovementResolver};
use collider_engine::placement::Placement;
use collider_engine::scene::SceneBuilder;
use collider_engine::store::{CollisionStore, StoreError};
use thiserror::Error;

use crate::script::{ParseError, ScriptCommand};

/// Session name used until a script opens another
pub const SCRATCH_SESSION: &str = "scratch";

/// Editor errors
#[derive(Error, Debug)]
pub enum EditorError {
    /// Script line did not parse
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// OBJ file could not be read
    #[error("mesh: {0}")]
    Mesh(#[from] MeshLoadError),
    /// Decomposition failed
    #[error("decomposition: {0}")]
    Decomposition(#[from] DecompositionError),
    /// Store access failed
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Script could not be read
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Listing index past the end
    #[error("no collider at index {0}")]
    NoCollider(usize),
    /// An authoring command failed; its notification says why
    #[error("command failed")]
    CommandFailed,
}

/// Editor state driven by script commands
pub struct Editor {
    config: CollisionConfig,
    store: Box<dyn CollisionStore>,
    session: AuthoringSession,
    registry: ModelRegistry,
    scene: ColliderSet,
    decomposer: Decomposer,
    resolver: MovementResolver,
}

impl Editor {
    /// Editor over `store` with a scratch session
    pub fn new(config: CollisionConfig, store: Box<dyn CollisionStore>) -> Self {
        let session = AuthoringSession::new(SCRATCH_SESSION, "", config.authoring.clone());
        Self {
            decomposer: Decomposer::new(config.decomposition.clone()),
            resolver: MovementResolver::new(config.resolver.clone()),
            config,
            store,
            session,
            registry: ModelRegistry::new(),
            scene: ColliderSet::new(),
        }
    }

    /// Current authoring session
    pub fn session(&self) -> &AuthoringSession {
        &self.session
    }

    /// Run one command; returns the lines to show the user
    pub fn run(&mut self, command: ScriptCommand) -> Result<Vec<String>, EditorError> {
        let mut output = Vec::new();
        let result = self.dispatch(command, &mut output);

        for notification in self.session.drain_notifications() {
            let marker = match notification.level {
                NotificationLevel::Info => "ok",
                NotificationLevel::Error => "error",
            };
            output.push(format!("[{marker}] {}", notification.message));
        }
        result.map(|()| output)
    }

    fn dispatch(&mut self, command: ScriptCommand, output: &mut Vec<String>) -> Result<(), EditorError> {
        match command {
            ScriptCommand::Open { name, model_path } => {
                if self.session.is_dirty() {
                    log::warn!("Discarding unsaved changes to '{}'", self.session.name());
                }
                self.session =
                    AuthoringSession::open(name, model_path, self.config.authoring.clone(), self.store.as_ref());
            }
            ScriptCommand::Edit(command) => self.edit(command)?,
            ScriptCommand::SelectIndex(index) => {
                let (id, _) = self.session.colliders().nth(index).ok_or(EditorError::NoCollider(index))?;
                self.edit(EditorCommand::Select(id))?;
            }
            ScriptCommand::Key(key) => {
                self.session.key_down(key, self.store.as_mut());
                self.session.key_up(key);
            }
            ScriptCommand::Click(x, y) => {
                self.session.mouse_moved(x, y);
                self.session.mouse_pressed();
                match self.session.mouse_released() {
                    Some(_) => output.push("selected collider under cursor".to_string()),
                    None => output.push("nothing under cursor".to_string()),
                }
            }
            ScriptCommand::Viewport(width, height) => self.session.resize_viewport(width, height),
            ScriptCommand::Fly { keys, seconds } => {
                for &key in &keys {
                    self.session.key_down(key, self.store.as_mut());
                }
                self.session.update(seconds);
                for &key in &keys {
                    self.session.key_up(key);
                }
                let at = self.session.camera().position;
                output.push(format!("camera at ({:.2}, {:.2}, {:.2})", at.x, at.y, at.z));
            }
            ScriptCommand::Decompose { path, origin } => {
                let mesh = ObjLoader::load_obj(&path)?;
                let decomposition = self.decomposer.decompose(&GeometrySource::Ready(mesh))?;
                let placement = Placement::new(origin, Vec3::new(1.0, 1.0, 1.0));
                let setup = decomposition.into_setup(self.session.model_path(), &placement);
                self.session.replace_with(&setup);
                self.session.notify(
                    NotificationLevel::Info,
                    format!("Derived {} colliders from {}", setup.colliders.len(), path.display()),
                );
            }
            ScriptCommand::Register(model) => {
                output.push(format!("registered '{}'", model.name));
                self.registry.register(model);
            }
            ScriptCommand::Build => {
                let (scene, report) = SceneBuilder::new(self.store.as_ref()).build(&self.registry);
                self.scene = scene;
                output.push(format!(
                    "scene: {} colliders from {} instances",
                    report.collider_count,
                    report.registered.len()
                ));
                for name in &report.missing {
                    output.push(format!("  {name}: no colliders"));
                }
                for (name, reason) in &report.failed {
                    output.push(format!("  {name}: skipped ({reason})"));
                }
            }
            ScriptCommand::Walk { from, dx, dz } => {
                let actor = self.resolver.actor_at(from);
                let step = self.resolver.resolve(&self.scene, &actor, dx, dz);
                let to = step.apply(from);
                output.push(format!(
                    "walk to ({:.3}, {:.3}, {:.3}) x:{} z:{}",
                    to.x,
                    to.y,
                    to.z,
                    if step.can_move_x { "free" } else { "blocked" },
                    if step.can_move_z { "free" } else { "blocked" },
                ));
            }
            ScriptCommand::List => {
                output.push(format!(
                    "{} ({} colliders, tool {})",
                    self.session.name(),
                    self.session.len(),
                    self.session.tool()
                ));
                let selected = self.session.selected();
                for (index, (id, collider)) in self.session.colliders().enumerate() {
                    let p = collider.position;
                    let d = collider.dimensions();
                    output.push(format!(
                        "{}{index}: {} at ({:.2}, {:.2}, {:.2}) size {:.2} x {:.2} x {:.2}",
                        if selected == Some(id) { "*" } else { " " },
                        collider.kind,
                        p.x,
                        p.y,
                        p.z,
                        d.x,
                        d.y,
                        d.z
                    ));
                }
            }
            ScriptCommand::Stored => {
                output.extend(self.store.list()?);
            }
        }
        Ok(())
    }

    fn edit(&mut self, command: EditorCommand) -> Result<(), EditorError> {
        if self.session.execute(command, self.store.as_mut()) {
            Ok(())
        } else {
            Err(EditorError::CommandFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse_line;
    use collider_engine::store::MemoryStore;

    fn run_script(editor: &mut Editor, script: &str) -> Vec<String> {
        let mut output = Vec::new();
        for line in script.lines() {
            if let Some(command) = parse_line(line).unwrap() {
                output.extend(editor.run(command).unwrap());
            }
        }
        output
    }

    #[test]
    fn test_authored_box_blocks_walk() {
        let mut editor = Editor::new(CollisionConfig::default(), Box::new(MemoryStore::new()));
        let output = run_script(
            &mut editor,
            "open shed shed.obj
             place box
             tool move
             drag 3 1 0
             save
             register shed shed.obj 0 0 0
             build
             walk 1.3 0 0 0.5 0.2",
        );
        assert!(output.iter().any(|line| line.contains("scene: 1 colliders")));
        let walk = output.iter().find(|line| line.starts_with("walk")).unwrap();
        assert!(walk.contains("x:blocked z:free"), "{walk}");
    }

    #[test]
    fn test_failed_command_reports_notification() {
        let mut editor = Editor::new(CollisionConfig::default(), Box::new(MemoryStore::new()));
        let result = editor.run(ScriptCommand::Edit(EditorCommand::DeleteSelected));
        assert!(matches!(result, Err(EditorError::CommandFailed)));
        assert!(matches!(
            editor.run(ScriptCommand::SelectIndex(3)),
            Err(EditorError::NoCollider(3))
        ));
    }

    #[test]
    fn test_shortcut_keys_place_shapes() {
        let mut editor = Editor::new(CollisionConfig::default(), Box::new(MemoryStore::new()));
        run_script(&mut editor, "key c\nkey f\nkey w");
        assert_eq!(editor.session().len(), 2);
    }

    #[test]
    fn test_decompose_obj_replaces_colliders() {
        let path = std::env::temp_dir().join(format!("collider_editor_deck_{}.obj", std::process::id()));
        std::fs::write(
            &path,
            "v -2 1 -2\nv 2 1 -2\nv 2 1 2\nv -2 1 2\nf 1 3 2\nf 1 4 3\n",
        )
        .unwrap();

        let mut editor = Editor::new(CollisionConfig::default(), Box::new(MemoryStore::new()));
        let output = editor
            .run(ScriptCommand::Decompose {
                path: path.clone(),
                origin: Vec3::zeros(),
            })
            .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(editor.session().len(), 1);
        assert!(output[0].starts_with("[ok] Derived 1 colliders"));
    }
}

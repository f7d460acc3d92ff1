//! Editor script commands
//!
//! One command per line, words separated by whitespace. Blank lines and
//! lines starting with `#` are skipped.

use std::path::PathBuf;

use collider_engine::authoring::{EditorCommand, ToolMode};
use collider_engine::collider::{RegisteredModel, ShapeKind};
use collider_engine::foundation::math::Vec3;
use collider_engine::input::KeyCode;
use thiserror::Error;

/// Script parse errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// First word is not a command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// Wrong number of arguments
    #[error("'{command}' expects {expected}")]
    Arguments {
        /// Command name
        command: &'static str,
        /// Usage text
        expected: &'static str,
    },
    /// An argument did not parse
    #[error("invalid {what} '{value}'")]
    InvalidValue {
        /// Kind of value
        what: &'static str,
        /// Text given
        value: String,
    },
}

/// A parsed script line
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Switch to the setup stored as `name`
    Open {
        /// Store key
        name: String,
        /// Model the setup belongs to
        model_path: String,
    },
    /// Run an authoring command
    Edit(EditorCommand),
    /// Select the collider at a listing index
    SelectIndex(usize),
    /// Press and release a key
    Key(KeyCode),
    /// Click at a pixel position
    Click(f64, f64),
    /// Resize the viewport
    Viewport(u32, u32),
    /// Hold keys for a while: advance the camera
    Fly {
        /// Keys held
        keys: Vec<KeyCode>,
        /// Seconds
        seconds: f32,
    },
    /// Replace the session's colliders with ones derived from an OBJ file
    Decompose {
        /// OBJ file
        path: PathBuf,
        /// Where the model's canonical pose sits in the file's space
        origin: Vec3,
    },
    /// Add a model instance to the scene
    Register(RegisteredModel),
    /// Build the scene from registered instances
    Build,
    /// Move an actor once against the last built scene
    Walk {
        /// Start position
        from: Vec3,
        /// Requested X movement
        dx: f32,
        /// Requested Z movement
        dz: f32,
    },
    /// Print the session's colliders
    List,
    /// Print stored setup names
    Stored,
}

/// Parse one line; `None` for blank lines and comments
pub fn parse_line(line: &str) -> Result<Option<ScriptCommand>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    let (head, args) = (words[0], &words[1..]);

    let command = match head.to_ascii_lowercase().as_str() {
        "open" => match args {
            [name, model_path] => ScriptCommand::Open {
                name: (*name).to_string(),
                model_path: (*model_path).to_string(),
            },
            _ => return Err(usage("open", "<name> <model_path>")),
        },
        "place" => match args {
            [kind] => ScriptCommand::Edit(EditorCommand::Place(shape(kind)?)),
            _ => return Err(usage("place", "box|cylinder|floor|ramp")),
        },
        "select" => match args {
            [index] => ScriptCommand::SelectIndex(index.parse().map_err(|_| invalid("index", index))?),
            _ => return Err(usage("select", "<index>")),
        },
        "deselect" => no_args(args, "deselect", ScriptCommand::Edit(EditorCommand::Deselect))?,
        "tool" => match args {
            [name] => ScriptCommand::Edit(EditorCommand::SetTool(
                ToolMode::from_name(name).ok_or_else(|| invalid("tool", name))?,
            )),
            _ => return Err(usage("tool", "select|move|resize|rotate")),
        },
        "drag" => match args {
            [x, y, z] => ScriptCommand::Edit(EditorCommand::Drag(vec3(x, y, z)?)),
            _ => return Err(usage("drag", "<x> <y> <z>")),
        },
        "delete" => no_args(args, "delete", ScriptCommand::Edit(EditorCommand::DeleteSelected))?,
        "clear" => no_args(args, "clear", ScriptCommand::Edit(EditorCommand::ClearAll))?,
        "save" => no_args(args, "save", ScriptCommand::Edit(EditorCommand::Save))?,
        "load" => no_args(args, "load", ScriptCommand::Edit(EditorCommand::Load))?,
        "wipe" => no_args(args, "wipe", ScriptCommand::Edit(EditorCommand::Wipe))?,
        "export" => match args {
            [path] => ScriptCommand::Edit(EditorCommand::Export(PathBuf::from(path))),
            _ => return Err(usage("export", "<file.json>")),
        },
        "import" => match args {
            [path] => ScriptCommand::Edit(EditorCommand::Import(PathBuf::from(path))),
            _ => return Err(usage("import", "<file.json>")),
        },
        "key" => match args {
            [name] => ScriptCommand::Key(key(name)?),
            _ => return Err(usage("key", "<key>")),
        },
        "click" => match args {
            [x, y] => ScriptCommand::Click(f64::from(number(x)?), f64::from(number(y)?)),
            _ => return Err(usage("click", "<px> <py>")),
        },
        "viewport" => match args {
            [w, h] => ScriptCommand::Viewport(
                w.parse().map_err(|_| invalid("width", w))?,
                h.parse().map_err(|_| invalid("height", h))?,
            ),
            _ => return Err(usage("viewport", "<width> <height>")),
        },
        "fly" => match args {
            [seconds, keys @ ..] if !keys.is_empty() => ScriptCommand::Fly {
                keys: keys.iter().map(|k| key(k)).collect::<Result<_, _>>()?,
                seconds: number(seconds)?,
            },
            _ => return Err(usage("fly", "<seconds> <key>...")),
        },
        "decompose" => match args {
            [path] => ScriptCommand::Decompose {
                path: PathBuf::from(path),
                origin: Vec3::zeros(),
            },
            [path, x, y, z] => ScriptCommand::Decompose {
                path: PathBuf::from(path),
                origin: vec3(x, y, z)?,
            },
            _ => return Err(usage("decompose", "<file.obj> [<x> <y> <z>]")),
        },
        "register" => match args {
            [name, path, x, y, z] => ScriptCommand::Register(RegisteredModel::new(*name, *path, vec3(x, y, z)?)),
            [name, path, x, y, z, sx, sy, sz] => ScriptCommand::Register(
                RegisteredModel::new(*name, *path, vec3(x, y, z)?).with_scale(vec3(sx, sy, sz)?),
            ),
            [name, path, x, y, z, sx, sy, sz, snap] => ScriptCommand::Register(
                RegisteredModel::new(*name, *path, vec3(x, y, z)?)
                    .with_scale(vec3(sx, sy, sz)?)
                    .with_ground_snap_offset(number(snap)?),
            ),
            _ => {
                return Err(usage(
                    "register",
                    "<name> <model_path> <x> <y> <z> [<sx> <sy> <sz> [<snap_offset>]]",
                ))
            }
        },
        "build" => no_args(args, "build", ScriptCommand::Build)?,
        "walk" => match args {
            [x, y, z, dx, dz] => ScriptCommand::Walk {
                from: vec3(x, y, z)?,
                dx: number(dx)?,
                dz: number(dz)?,
            },
            _ => return Err(usage("walk", "<x> <y> <z> <dx> <dz>")),
        },
        "list" => no_args(args, "list", ScriptCommand::List)?,
        "stored" => no_args(args, "stored", ScriptCommand::Stored)?,
        _ => return Err(ParseError::UnknownCommand(head.to_string())),
    };
    Ok(Some(command))
}

fn usage(command: &'static str, expected: &'static str) -> ParseError {
    ParseError::Arguments { command, expected }
}

fn invalid(what: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        what,
        value: value.to_string(),
    }
}

fn no_args(args: &[&str], command: &'static str, parsed: ScriptCommand) -> Result<ScriptCommand, ParseError> {
    if args.is_empty() {
        Ok(parsed)
    } else {
        Err(usage(command, "no arguments"))
    }
}

fn number(text: &str) -> Result<f32, ParseError> {
    text.parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid("number", text))
}

fn vec3(x: &str, y: &str, z: &str) -> Result<Vec3, ParseError> {
    Ok(Vec3::new(number(x)?, number(y)?, number(z)?))
}

fn shape(name: &str) -> Result<ShapeKind, ParseError> {
    ShapeKind::from_name(name).ok_or_else(|| invalid("shape", name))
}

fn key(name: &str) -> Result<KeyCode, ParseError> {
    KeyCode::from_name(name).ok_or_else(|| invalid("key", name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        assert_eq!(parse_line("   "), Ok(None));
        assert_eq!(parse_line("# place box"), Ok(None));
    }

    #[test]
    fn test_editing_commands() {
        assert_eq!(
            parse_line("place Ramp"),
            Ok(Some(ScriptCommand::Edit(EditorCommand::Place(ShapeKind::Ramp))))
        );
        assert_eq!(
            parse_line("drag 1 0 -2.5"),
            Ok(Some(ScriptCommand::Edit(EditorCommand::Drag(Vec3::new(1.0, 0.0, -2.5)))))
        );
        assert_eq!(
            parse_line("tool resize"),
            Ok(Some(ScriptCommand::Edit(EditorCommand::SetTool(ToolMode::Resize))))
        );
    }

    #[test]
    fn test_scene_commands() {
        let Ok(Some(ScriptCommand::Register(model))) = parse_line("register hut hut.obj 4 0 2 2 1 2") else {
            panic!("register did not parse");
        };
        assert_eq!(model.name, "hut");
        assert_eq!(model.scale, Vec3::new(2.0, 1.0, 2.0));
        assert_eq!(model.ground_snap_offset, 0.0);

        let Ok(Some(ScriptCommand::Register(model))) = parse_line("register rock rock.obj 0 0 0 1 1 1 0.4") else {
            panic!("register with snap offset did not parse");
        };
        assert_eq!(model.ground_snap_offset, 0.4);

        assert_eq!(
            parse_line("walk 0 0 0 0.1 -0.1"),
            Ok(Some(ScriptCommand::Walk {
                from: Vec3::zeros(),
                dx: 0.1,
                dz: -0.1,
            }))
        );
    }

    #[test]
    fn test_bad_lines_are_rejected() {
        assert_eq!(parse_line("jump"), Err(ParseError::UnknownCommand("jump".into())));
        assert!(matches!(parse_line("place sphere"), Err(ParseError::InvalidValue { what: "shape", .. })));
        assert!(matches!(parse_line("drag 1 2"), Err(ParseError::Arguments { command: "drag", .. })));
        assert!(matches!(parse_line("drag 1 2 nan"), Err(ParseError::InvalidValue { .. })));
        assert!(matches!(parse_line("save now"), Err(ParseError::Arguments { .. })));
    }
}

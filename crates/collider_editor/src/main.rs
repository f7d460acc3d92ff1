//! Collider editor
//!
//! Authors collision setups from a command script read from a file or
//! stdin, one command per line:
//!
//! ```text
//! collider_editor [--config <file.toml|file.ron>] [--store <dir>] [script]
//! ```
//!
//! `collider_editor --help` lists the script commands.

mod editor;
mod script;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use collider_engine::config::Config;
use collider_engine::core::config::CollisionConfig;
use collider_engine::foundation::logging;
use collider_engine::store::FileStore;

use editor::{Editor, EditorError};

const COMMANDS: &str = "\
Script commands:
open <name> <model_path>       switch to a stored setup
place box|cylinder|floor|ramp  add a shape at the origin and select it
select <index> | deselect      change the selection
tool select|move|resize|rotate change the active tool
drag <x> <y> <z>               apply the tool to the selection
delete | clear                 remove the selection or everything
save | load | wipe             store operations for the session
export <file> | import <file>  JSON file transfer
key <key> | click <px> <py>    keyboard shortcut or pick under the cursor
viewport <width> <height>      resize the picking viewport
fly <seconds> <key>...         move the camera
decompose <obj> [<x> <y> <z>]  derive colliders from geometry
register <name> <model> <x> <y> <z> [<sx> <sy> <sz> [<snap>]]
build                          build the scene from registered models
walk <x> <y> <z> <dx> <dz>     resolve one actor step
list | stored                  show colliders or stored names";

/// Command-driven collider authoring
#[derive(Parser, Debug)]
#[command(name = "collider_editor", version, after_help = COMMANDS)]
struct Args {
    /// Configuration file (.toml or .ron)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory of stored collision setups; overrides the configuration
    #[arg(long, value_name = "DIR")]
    store: Option<PathBuf>,

    /// Script to run; commands are read from stdin when omitted
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<CollisionConfig, EditorError> {
    match &args.config {
        Some(path) => Ok(CollisionConfig::load_from_file(path)?),
        None => Ok(CollisionConfig::default()),
    }
}

fn run(args: &Args) -> Result<usize, EditorError> {
    let config = load_config(args)?;
    logging::init_with_level(&config.engine.log_level);

    let directory = args
        .store
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.store.directory));
    log::info!("Using collider store at {}", directory.display());
    let mut editor = Editor::new(config, Box::new(FileStore::new(directory)));

    let reader: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let mut failures = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let outcome = script::parse_line(&line)
            .map_err(EditorError::from)
            .and_then(|command| command.map_or(Ok(Vec::new()), |command| editor.run(command)));
        match outcome {
            Ok(output) => output.iter().for_each(|text| println!("{text}")),
            Err(e) => {
                failures += 1;
                eprintln!("line {}: {e}", number + 1);
            }
        }
    }

    if editor.session().is_dirty() {
        log::warn!("Unsaved changes to '{}' were discarded", editor.session().name());
    }
    Ok(failures)
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failures) => {
            eprintln!("{failures} command(s) failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            logging::init();
            log::error!("{e}");
            eprintln!("collider_editor: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_arguments() {
        Args::command().debug_assert();

        let args = Args::try_parse_from(["collider_editor", "--store", "data", "level.txt"]).unwrap();
        assert_eq!(args.store, Some(PathBuf::from("data")));
        assert_eq!(args.script, Some(PathBuf::from("level.txt")));
        assert!(args.config.is_none());

        assert!(Args::try_parse_from(["collider_editor", "--config"]).is_err());
        assert!(Args::try_parse_from(["collider_editor", "a.txt", "b.txt"]).is_err());
    }
}

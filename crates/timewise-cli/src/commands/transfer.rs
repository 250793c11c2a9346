//! Export and import of the whole planner state.

use std::path::{Path, PathBuf};

use timewise_core::{data_dir, StateStore};

use super::Session;

pub fn export(output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open()?;
    match output {
        Some(path) => {
            session.store().export_to(session.planner.state(), &path)?;
            println!(
                "exported {} events to {}",
                session.planner.events().len(),
                path.display()
            );
        }
        None => println!("{}", session.planner.export_json()?),
    }
    Ok(())
}

/// Validate `path` and store it before the current state is opened, so a
/// corrupt `state.json` can be replaced.
pub fn import(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let store = StateStore::in_dir(data_dir()?);
    store
        .import_from(path)
        .map_err(|e| format!("failed to import {}: {e}", path.display()))?;
    let mut session = Session::open()?;
    session.save()?;
    println!("imported {} events", session.planner.events().len());
    Ok(())
}

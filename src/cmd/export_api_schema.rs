use std::{fs, path::PathBuf};

use crate::{api, prelude::*};


/// Writes the GraphQL schema of our API to the given file or stdout.
pub(crate) fn run(target: Option<&PathBuf>) -> Result<()> {
    let schema = api::root_node().as_sdl();

    match target {
        Some(path) => fs::write(path, schema)
            .with_context(|| format!("failed to write schema to '{}'", path.display()))?,
        None => println!("{schema}"),
    }

    Ok(())
}

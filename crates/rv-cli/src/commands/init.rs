use std::path::Path;

use miette::{IntoDiagnostic, WrapErr, bail};
use rv_core::{JsonFileStorage, sample};

pub fn run(path: &Path, force: bool) -> miette::Result<()> {
    if path.exists() && !force {
        bail!("file already exists: {} (use --force to overwrite)", path.display());
    }

    let world = sample::marketplace().into_diagnostic()?;
    JsonFileStorage::create(path, &world)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot write {}", path.display()))?;

    println!("Created world '{}' in {}", world.meta.name, path.display());
    println!(
        "  {} entities, {} relationships",
        world.entity_count(),
        world.relationship_count()
    );
    println!();
    println!("Get started:");
    println!("  rv check {}   # Validate the world", path.display());
    println!("  rv play --world {}", path.display());

    Ok(())
}

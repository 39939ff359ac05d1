use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use miette::{IntoDiagnostic, WrapErr};
use rv_core::{EntityKind, JsonFileStorage, WorldStore};

pub fn run(path: &Path) -> miette::Result<()> {
    let storage = JsonFileStorage::open(path)
        .into_diagnostic()
        .wrap_err("cannot open world")?;
    let store = WorldStore::open(Box::new(storage))
        .into_diagnostic()
        .wrap_err_with(|| format!("not a valid world: {}", path.display()))?;
    let world = store.world();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Count", "Names"]);
    for kind in [EntityKind::Location, EntityKind::Item, EntityKind::Player] {
        let entities = world.entities_by_kind(kind);
        let names = entities
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![kind.to_string(), entities.len().to_string(), names]);
    }

    let start = store.current_location().into_diagnostic()?.name;
    let vectors = world.meta.embedding_model.as_deref().unwrap_or("none");

    println!("{table}");
    println!();
    println!("  All checks passed for '{}'.", world.meta.name);
    println!(
        "  {} entities, {} relationships",
        world.entity_count(),
        world.relationship_count()
    );
    println!("  Player starts in {start}; name vectors: {vectors}");

    Ok(())
}

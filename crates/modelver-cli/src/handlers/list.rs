//! List command handler.
//!
//! Displays registered versions in a table, oldest first per model, with the
//! latest version of each model marked.

use anyhow::Result;
use modelver_core::ArtifactRecord;

use crate::bootstrap::CliContext;
use crate::presentation::{format_timestamp, print_separator, truncate_string};

/// Execute the list command for every model, or only `model`.
pub fn execute(ctx: &CliContext, model: Option<&str>) -> Result<()> {
    let registry = ctx.app().registry();
    let records = match model {
        Some(model) => registry.versions(model)?,
        None => registry.load()?.records().cloned().collect(),
    };

    if records.is_empty() {
        match model {
            Some(model) => println!("No versions of '{model}' are registered."),
            None => {
                println!("No versions registered in {}.", registry.location().display());
                println!("Use 'modelver add-data <path> <version> <model>' to register one.");
            }
        }
        return Ok(());
    }

    println!(
        "Found {} version(s) in {}:\n",
        records.len(),
        registry.location().display()
    );
    println!(
        "  {:<20} {:<12} {:<12} {:<8} {:<20} {:<30} Description",
        "Model", "Version", "Kind", "Revision", "Registered", "Path"
    );
    print_separator(130);

    for (index, record) in records.iter().enumerate() {
        let marker = if is_latest(&records, index) { "*" } else { " " };
        println!("{marker} {}", row(record));
    }
    println!("\n* latest version of the model");
    Ok(())
}

fn row(record: &ArtifactRecord) -> String {
    format!(
        "{:<20} {:<12} {:<12} {:<8} {:<20} {:<30} {}",
        truncate_string(&record.model, 19),
        truncate_string(&record.version, 11),
        record.kind.label(),
        record.revision_id.short(),
        format_timestamp(&record.created_at),
        truncate_string(&record.path.display().to_string(), 29),
        truncate_string(record.description.trim(), 40)
    )
}

/// Records are grouped by model, so the last of each group is the latest.
fn is_latest(records: &[ArtifactRecord], index: usize) -> bool {
    records
        .get(index + 1)
        .is_none_or(|next| next.model != records[index].model)
}

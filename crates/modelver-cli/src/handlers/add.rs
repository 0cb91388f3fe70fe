//! Add command handler (`add-data`, `add-model`).
//!
//! Registers a new version: track, commit the pointer, record it in the
//! registry, commit the registry. With `--push` the version is published
//! afterwards.

use std::cmp::Ordering;

use anyhow::Result;
use modelver_core::{ArtifactKind, CoreError, RegistrationRequest, RegistryCommit, compare_tags};

use crate::bootstrap::CliContext;
use crate::commands::AddArgs;
use crate::error::CliError;
use crate::handlers::push;
use crate::presentation::display_record;
use crate::utils::prompt_confirmation;

/// Execute `add-data` (`ArtifactKind::Data`) or `add-model` (`ArtifactKind::Model`).
pub fn execute(ctx: &CliContext, args: &AddArgs, kind: ArtifactKind) -> Result<()> {
    if !args.yes {
        if let Some(latest) = newer_latest(ctx, &args.model, &args.version)? {
            eprintln!("Latest version of {} is {latest}", args.model);
            let proceed = prompt_confirmation(
                "You are adding changes to an older version. This may disrupt the model. Proceed?",
            )?;
            if !proceed {
                return Err(CliError::Cancelled.into());
            }
        }
    }

    let request = RegistrationRequest::new(&args.model, &args.version, &args.path, &args.description)
        .with_kind(kind);
    let outcome = ctx.app().registration().register(&request)?;
    let record = &outcome.record;

    println!("{} '{}' added with version {}.", kind.label(), record.model, record.version);
    display_record(record);
    match &outcome.registry_commit {
        RegistryCommit::Committed(revision) => {
            println!("Registry committed in {}.", revision.short());
        }
        RegistryCommit::Skipped(reason) => println!("Registry not committed: {reason}."),
        RegistryCommit::Failed(reason) => eprintln!(
            "Warning: the registry entry is saved but {} was not committed ({reason}). Commit it by hand.",
            ctx.paths().registry_path.display()
        ),
    }

    if args.push {
        push::execute(ctx, &record.model, &record.version)?;
    }
    Ok(())
}

/// Latest registered version of `model`, when it sorts above `version`.
fn newer_latest(ctx: &CliContext, model: &str, version: &str) -> Result<Option<String>, CoreError> {
    match ctx.app().registry().latest(model) {
        Ok(latest) => Ok(is_older(version, &latest.version).then_some(latest.version)),
        Err(CoreError::VersionNotFound { .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

/// Whether `version` is an older `vX.Y.Z` tag than `latest`.
///
/// Versions of any other shape are never considered older.
fn is_older(version: &str, latest: &str) -> bool {
    compare_tags(version, latest) == Some(Ordering::Less)
}

//! Sync command: one reconciliation pass over the server and app trees.

use crate::commands::{PathSource, ResolvedTrees, TreeArgs};
use crate::core::{CliError, LocaleNotFoundError};
use crate::utils::ui;
use clap::Parser;
use std::collections::BTreeSet;
use strings_sync::{SyncOptions, SyncReport, Synchronizer};

/// Arguments for the sync command.
#[derive(Debug, Parser)]
pub struct SyncArgs {
    #[command(flatten)]
    pub trees: TreeArgs,

    /// Specific locale(s) to sync (can be specified multiple times). Defaults to all.
    #[arg(short, long)]
    pub locale: Vec<String>,

    /// Dry run - show what would be synced without making changes.
    #[arg(long)]
    pub dry_run: bool,
}

/// Run the sync command.
pub fn run_sync(args: SyncArgs) -> Result<(), CliError> {
    ui::print_sync_header();

    let ResolvedTrees {
        trees,
        reference_locale,
        source,
    } = args.trees.resolve()?;

    match &source {
        PathSource::Arguments {
            saved_to: Some(config),
        } => ui::print_saved_paths(config),
        PathSource::Config(config) => ui::print_loaded_paths(config),
        PathSource::Arguments { saved_to: None } => {},
    }
    ui::print_trees(&trees.server, &trees.app);

    let mut options = SyncOptions {
        reference_locale,
        only_languages: None,
        dry_run: args.dry_run,
    };

    let synchronizer = Synchronizer::new(trees.clone(), options.clone());

    if !args.locale.is_empty() {
        let available = synchronizer.languages()?;
        for locale in &args.locale {
            if !available.contains(locale) {
                let available = if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                };
                return Err(LocaleNotFoundError {
                    locale: locale.clone(),
                    available,
                }
                .into());
            }
        }
        options.only_languages = Some(args.locale.iter().cloned().collect::<BTreeSet<_>>());
    }

    let pb = ui::create_spinner("Synchronizing translations...");
    let result = Synchronizer::new(trees, options).run();
    pb.finish_and_clear();

    let report = result?;
    render_report(&report);

    Ok(())
}

fn render_report(report: &SyncReport) {
    let dry_run = report.dry_run;

    if !report.collisions.is_empty() {
        ui::print_collisions(&report.collisions);
    }

    for dir in &report.created_dirs {
        ui::print_created_dir(dir, dry_run);
    }

    let mut languages_affected = 0;
    for (language, language_report) in &report.languages {
        if language_report.is_unchanged() {
            continue;
        }
        languages_affected += 1;
        ui::print_language(language);

        for copy in &language_report.copies {
            ui::print_copied(copy, dry_run);
        }

        for file in &language_report.files {
            if !file.stats.is_zero() {
                ui::print_file_stats(&file.name, &file.stats);
            }
            if dry_run {
                for change in &file.changes {
                    ui::print_change(change);
                }
            }
        }
    }

    if report.is_in_sync() {
        ui::print_all_in_sync();
    } else {
        ui::print_sync_summary(&report.totals(), languages_affected, dry_run);
    }
}

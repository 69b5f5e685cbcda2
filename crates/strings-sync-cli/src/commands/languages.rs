use crate::commands::TreeArgs;
use crate::core::CliError;
use crate::utils::ui;
use clap::Parser;
use strings_sync::{SyncOptions, Synchronizer};

/// Arguments for the languages command.
#[derive(Debug, Parser)]
pub struct LanguagesArgs {
    #[command(flatten)]
    pub trees: TreeArgs,
}

/// List every language of either tree and where it is present.
pub fn run_languages(args: LanguagesArgs) -> Result<(), CliError> {
    let resolved = args.trees.resolve()?;
    ui::print_languages_header(&resolved.reference_locale);

    let options = SyncOptions {
        reference_locale: resolved.reference_locale,
        ..Default::default()
    };
    let survey = Synchronizer::new(resolved.trees, options).survey()?;

    if survey.is_empty() {
        ui::print_no_languages();
        return Ok(());
    }

    for presence in &survey {
        ui::print_language_presence(&presence.language, presence.in_server, presence.in_app);
    }

    Ok(())
}

use clap::{Parser, Subcommand};
use miette::Result as MietteResult;
use strings_sync_cli::commands::{LanguagesArgs, SyncArgs, run_languages, run_sync};
use strings_sync_cli::utils::ui;

#[derive(Parser)]
#[command(name = "strings-sync")]
#[command(about = "Reconcile translations between a server and an app string tree")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log every copy, prune and propagation to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Deterministic output for end-to-end tests.
    #[arg(long, global = true, hide = true)]
    e2e: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy missing translations between the trees and prune stale keys
    Sync(SyncArgs),

    /// List the languages of both trees
    Languages(LanguagesArgs),
}

fn main() -> MietteResult<()> {
    let cli = Cli::parse();

    let color = !cli.e2e;
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(color)
                .unicode(color)
                .context_lines(2)
                .tab_width(4)
                .color(color)
                .build(),
        )
    }))
    .ok();

    ui::set_e2e_mode(cli.e2e);
    ui::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Sync(args) => run_sync(args),
        Commands::Languages(args) => run_languages(args),
    };

    result.map_err(miette::Report::new)
}

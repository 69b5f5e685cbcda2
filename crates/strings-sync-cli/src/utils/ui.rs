// CLI output formatting with consistent styling using indicatif and colored.
// We stick to standard println!/eprintln! for textual output to ensure ANSI color compatibility.

use colored::Colorize as _;
use indicatif::{ProgressBar, ProgressStyle};
use similar::{ChangeTag, TextDiff};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use strings_sync::{FileChange, FileCopy, LanguageStats, TreeSide};
use tracing_subscriber::EnvFilter;

const PD_TICK: Duration = Duration::from_millis(100);

static E2E_MODE: AtomicBool = AtomicBool::new(false);

/// Enable E2E mode for deterministic output (no colors, hidden progress bars).
pub fn set_e2e_mode(enabled: bool) {
    E2E_MODE.store(enabled, Ordering::SeqCst);
    if enabled {
        colored::control::set_override(false);
    }
}

pub fn is_e2e() -> bool {
    E2E_MODE.load(Ordering::SeqCst)
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default_directive = if verbose { "strings_sync=info" } else { "error" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .ok();
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    if is_e2e() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(PD_TICK);
    pb
}

pub fn print_sync_header() {
    println!("{}", "Strings Sync".dimmed());
}

pub fn print_languages_header(reference: &str) {
    println!(
        "{} {}",
        "Languages".dimmed(),
        format!("(reference: {})", reference).dimmed()
    );
}

pub fn print_trees(server: &Path, app: &Path) {
    println!("{} {}", "Server:".dimmed(), server.display());
    println!("{} {}", "App:   ".dimmed(), app.display());
}

pub fn print_saved_paths(config: &Path) {
    println!("{} {}", "Saved tree paths to".dimmed(), config.display());
}

pub fn print_loaded_paths(config: &Path) {
    println!("{} {}", "Loaded tree paths from".dimmed(), config.display());
}

pub fn print_collisions(keys: &[String]) {
    println!(
        "{} {} key(s) whose reference text differs between trees:",
        "Not propagating".yellow(),
        keys.len()
    );
    for key in keys {
        println!("  {} {}", "->".dimmed(), key.yellow());
    }
}

pub fn print_created_dir(path: &Path, dry_run: bool) {
    let verb = if dry_run { "Would create" } else { "Created" };
    println!("{} {}", verb.green(), path.display());
}

pub fn print_language(language: &str) {
    println!("{}", language.cyan().bold());
}

pub fn print_copied(copy: &FileCopy, dry_run: bool) {
    let verb = if dry_run { "Would copy" } else { "Copied" };
    println!(
        "  {} {} {} {}",
        verb.green(),
        copy.from.display(),
        "->".dimmed(),
        copy.to.display()
    );
}

fn side_counts(stats: &LanguageStats, side: TreeSide) -> String {
    format!(
        "{} {} {}",
        side,
        format!("+{}", stats.added(side)).green(),
        format!("-{}", stats.removed(side)).red()
    )
}

pub fn print_file_stats(name: &str, stats: &LanguageStats) {
    println!(
        "  {} {}  {}",
        name,
        side_counts(stats, TreeSide::Server),
        side_counts(stats, TreeSide::App)
    );
}

/// Print the file a dry run would rewrite and a unified diff of the rewrite.
pub fn print_change(change: &FileChange) {
    println!("  {} {}", "Would update:".yellow(), change.path.display());

    let diff = TextDiff::from_lines(&change.before, &change.after);
    let mut unified = diff.unified_diff();
    unified.context_radius(2);

    for hunk in unified.iter_hunks() {
        println!("    {}", hunk.header().to_string().cyan());
        for line in hunk.iter_changes() {
            let text = line.value().trim_end_matches('\n');
            match line.tag() {
                ChangeTag::Delete => println!("    {}", format!("-{text}").red()),
                ChangeTag::Insert => println!("    {}", format!("+{text}").green()),
                ChangeTag::Equal => println!("    {}", format!(" {text}").dimmed()),
            }
        }
    }
}

pub fn print_all_in_sync() {
    println!("{}", "All trees are in sync!".green());
}

pub fn print_sync_summary(totals: &LanguageStats, languages: usize, dry_run: bool) {
    let label = if dry_run {
        "Would sync:".yellow()
    } else {
        "Done:".green()
    };
    println!(
        "{} {}, {} across {} language(s)",
        label,
        side_counts(totals, TreeSide::Server),
        side_counts(totals, TreeSide::App),
        languages
    );
}

pub fn print_language_presence(language: &str, in_server: bool, in_app: bool) {
    let presence = match (in_server, in_app) {
        (true, true) => "server, app".green(),
        (true, false) => "server only".yellow(),
        (false, true) => "app only".yellow(),
        (false, false) => "missing".red(),
    };
    println!("  {:<12} {}", language, presence);
}

pub fn print_no_languages() {
    println!("{}", "No translation languages found.".yellow());
}

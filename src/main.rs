//! CLI entry point for `mailstash`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{CommandFactory, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::warn;

use mailstash::clean;
use mailstash::config::{ArchiveDirs, Config};
use mailstash::purge;

#[derive(Parser)]
#[command(
    name = "mailstash",
    version,
    about = "Archive Gmail messages as tidy local text files"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override the raw email directory
    #[arg(long, global = true, env = "MAILSTASH_RAW_DIR", value_name = "DIR")]
    raw_dir: Option<PathBuf>,

    /// Override the cleaned email directory
    #[arg(long, global = true, env = "MAILSTASH_CLEAN_DIR", value_name = "DIR")]
    clean_dir: Option<PathBuf>,

    /// Override the attachments directory
    #[arg(
        long,
        global = true,
        env = "MAILSTASH_ATTACHMENTS_DIR",
        value_name = "DIR"
    )]
    attachments_dir: Option<PathBuf>,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean one raw email file
    Process {
        file: PathBuf,
        /// Append this id to the document name to avoid collisions
        #[arg(long, value_name = "ID")]
        message_id: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Clean every raw email in the archive
    Run {
        #[arg(long)]
        json: bool,
    },
    /// Delete the archive's raw, cleaned, and attachment files
    Purge {
        /// Report what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = mailstash::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    let dirs = archive_dirs(&cli, &config);

    match cli.command {
        Commands::Process {
            file,
            message_id,
            json,
        } => cmd_process(&file, &dirs, message_id.as_deref(), json),
        Commands::Run { json } => cmd_run(&dirs, json),
        Commands::Purge { dry_run, json } => cmd_purge(&dirs, dry_run, json),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Resolve archive directories from config, then apply CLI overrides.
fn archive_dirs(cli: &Cli, config: &Config) -> ArchiveDirs {
    let mut dirs = ArchiveDirs::from_config(&config.archive);
    if let Some(dir) = &cli.raw_dir {
        dirs.raw_dir = dir.clone();
    }
    if let Some(dir) = &cli.clean_dir {
        dirs.clean_dir = dir.clone();
    }
    if let Some(dir) = &cli.attachments_dir {
        dirs.attachments_dir = dir.clone();
    }
    dirs
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    // Try to set up file logging
    let log_dir = mailstash::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mailstash.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        // Fall back to stderr only
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailstash", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Clean a single raw email file and print the result.
fn cmd_process(
    file: &Path,
    dirs: &ArchiveDirs,
    message_id: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    if !file.exists() {
        anyhow::bail!("File not found: {}", file.display());
    }

    dirs.ensure()?;

    let outcome = clean::process_with_id(file, &dirs.clean_dir, &dirs.attachments_dir, message_id)?;

    if json {
        print_process_json(&outcome)?;
    } else {
        print_process_table(&outcome);
    }

    Ok(())
}

/// Counters from one batch run.
struct BatchStats {
    raw_messages: usize,
    cleaned: usize,
    failed: usize,
    attachments_saved: usize,
}

/// Clean every raw email in the archive.
fn cmd_run(dirs: &ArchiveDirs, json: bool) -> anyhow::Result<()> {
    dirs.ensure()?;

    let files = raw_email_files(&dirs.raw_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} Cleaning [{bar:40.cyan/blue}] {pos}/{len}")
            .expect("valid template")
            .progress_chars("#>-"),
    );

    let start = Instant::now();

    let mut stats = BatchStats {
        raw_messages: files.len(),
        cleaned: 0,
        failed: 0,
        attachments_saved: 0,
    };

    for path in &files {
        let message_id = message_id_from_filename(path);
        match clean::process_with_id(
            path,
            &dirs.clean_dir,
            &dirs.attachments_dir,
            message_id.as_deref(),
        ) {
            Ok(outcome) => {
                stats.cleaned += 1;
                stats.attachments_saved += outcome.attachments.len();
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to clean message");
                stats.failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();
    let elapsed = start.elapsed();

    if json {
        let output = serde_json::json!({
            "raw_messages": stats.raw_messages,
            "cleaned": stats.cleaned,
            "failed": stats.failed,
            "attachments_saved": stats.attachments_saved,
            "elapsed_ms": elapsed.as_millis(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!();
        println!("  {:<25} {}", "Raw messages", stats.raw_messages);
        println!("  {:<25} {}", "Cleaned", stats.cleaned);
        println!("  {:<25} {}", "Failed", stats.failed);
        println!("  {:<25} {}", "Attachments saved", stats.attachments_saved);
        println!("  {:<25} {:.2?}", "Elapsed", elapsed);
        println!();
    }

    Ok(())
}

/// Delete archived files and print what went.
fn cmd_purge(dirs: &ArchiveDirs, dry_run: bool, json: bool) -> anyhow::Result<()> {
    let stats = purge::purge_archive(dirs, dry_run)?;

    if json {
        let output = serde_json::json!({
            "dry_run": dry_run,
            "raw_deleted": stats.raw_deleted,
            "cleaned_deleted": stats.cleaned_deleted,
            "attachments_deleted": stats.attachments_deleted,
            "bytes_freed": stats.bytes_freed,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    use humansize::{format_size, BINARY};
    println!();
    if dry_run {
        println!("  Purge dry run, nothing deleted:");
    } else {
        println!("  Purge complete:");
    }
    println!("  {:<25} {}", "Raw emails", stats.raw_deleted);
    println!("  {:<25} {}", "Cleaned documents", stats.cleaned_deleted);
    println!("  {:<25} {}", "Attachments", stats.attachments_deleted);
    println!(
        "  {:<25} {}",
        "Space freed",
        format_size(stats.bytes_freed, BINARY)
    );
    println!();

    Ok(())
}

/// List the `.eml` files directly inside the raw directory, sorted.
fn raw_email_files(raw_dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(raw_dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("eml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Recover the Gmail message id from a raw file named `email_{id}.eml`.
fn message_id_from_filename(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let id = stem.strip_prefix("email_")?;
    if id.is_empty() {
        return None;
    }
    Some(id.to_string())
}

/// Print a cleaning outcome as a human-readable table.
fn print_process_table(outcome: &clean::CleanOutcome) {
    use humansize::{format_size, BINARY};

    println!();
    println!(
        "  {:<25} {}",
        "Cleaned document",
        outcome.document_path.display()
    );
    println!("  {:<25} {}", "Attachments", outcome.attachments.len());
    for attachment in &outcome.attachments {
        println!(
            "    {:>9}  {}",
            format_size(attachment.size, BINARY),
            attachment.filename
        );
    }
    println!();
}

/// Print a cleaning outcome as JSON.
fn print_process_json(outcome: &clean::CleanOutcome) -> anyhow::Result<()> {
    let attachments: Vec<serde_json::Value> = outcome
        .attachments
        .iter()
        .map(|a| {
            serde_json::json!({
                "filename": a.filename,
                "content_type": a.content_type,
                "size": a.size,
            })
        })
        .collect();

    let output = serde_json::json!({
        "document": outcome.document_path.to_string_lossy(),
        "attachment_count": outcome.attachments.len(),
        "attachments": attachments,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

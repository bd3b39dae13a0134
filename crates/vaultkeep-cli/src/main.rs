mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use vaultkeep_core::{
    add_permalinks, extract_frontmatter_urls, list_publish_tagged, validate_files,
    validate_references, Extraction, NoteStore, ReferenceIssue,
};
use vaultkeep_store::FsVault;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "vaultkeep",
    version,
    about = "Frontmatter checks and fixes for a markdown note vault"
)]
struct Cli {
    /// Vault root directory (overrides vault.path from the config file)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report reference notes missing page-title or url
    ValidateReferences,

    /// Validate references, then require matching id/permalink on every note
    ValidateFiles,

    /// Move each reference's url into a tagged link at the top of its body
    ExtractFrontmatterUrls,

    /// List all notes in the vault
    ListVaultFiles,

    /// List notes whose frontmatter has `publish: "true"`
    ListPublishTagged,

    /// Add id and permalink fields to notes that lack them
    AddPermalinks,

    /// Show current configuration
    Config,
}

fn open_vault(flag: Option<PathBuf>, cfg: &Config) -> Result<FsVault> {
    let root = config::resolve_vault_root(flag, cfg)?;
    tracing::debug!(root = %root.display(), "opening vault");
    let vault = FsVault::open(&root)
        .with_context(|| format!("failed to open vault at {}", root.display()))?
        .with_references_dir(cfg.vault.references_dir.clone())
        .with_rules(cfg.walk.rules());
    Ok(vault)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;

    match cli.command {
        Commands::ValidateReferences => cmd_validate_references(&open_vault(cli.vault, &cfg)?),
        Commands::ValidateFiles => cmd_validate_files(&open_vault(cli.vault, &cfg)?),
        Commands::ExtractFrontmatterUrls => {
            cmd_extract_frontmatter_urls(&open_vault(cli.vault, &cfg)?)
        }
        Commands::ListVaultFiles => cmd_list_vault_files(&open_vault(cli.vault, &cfg)?),
        Commands::ListPublishTagged => cmd_list_publish_tagged(&open_vault(cli.vault, &cfg)?),
        Commands::AddPermalinks => cmd_add_permalinks(&open_vault(cli.vault, &cfg)?),
        Commands::Config => cmd_config(&cfg),
    }
}

// ---------------------------------------------------------------------------
// Validation commands
// ---------------------------------------------------------------------------

fn print_issue(issue: &ReferenceIssue) {
    println!("{issue}");
    if let Some(meta) = &issue.metadata {
        match meta.encode() {
            Ok(yaml) => {
                for line in yaml.lines() {
                    println!("  {line}");
                }
            }
            Err(e) => println!("  (unprintable frontmatter: {e})"),
        }
    }
}

fn cmd_validate_references(vault: &FsVault) -> Result<()> {
    let reported =
        validate_references(vault, print_issue).context("reference validation failed")?;
    if reported == 0 {
        println!("All references valid.");
    }
    Ok(())
}

fn cmd_validate_files(vault: &FsVault) -> Result<()> {
    let checked = validate_files(vault, print_issue).context("vault validation failed")?;
    println!("Validated {checked} notes.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Rewrite commands
// ---------------------------------------------------------------------------

fn cmd_extract_frontmatter_urls(vault: &FsVault) -> Result<()> {
    let rewritten = extract_frontmatter_urls(vault, |event| match event {
        Extraction::Rewritten { path, name, url } => {
            println!("Tagged {}: [{name}]({url})", path.display());
        }
        Extraction::Skipped { path, line } => {
            println!("Already tagged, skipping {}: {line}", path.display());
        }
    })
    .context("url extraction failed")?;
    println!("Rewrote {rewritten} references.");
    Ok(())
}

fn cmd_add_permalinks(vault: &FsVault) -> Result<()> {
    let summary = add_permalinks(vault, |change| {
        println!("{} ({}): {}", change.path.display(), change.fix, change.value);
    })
    .context("adding permalinks failed")?;
    println!("Updated {} of {} notes.", summary.updated, summary.checked);
    Ok(())
}

// ---------------------------------------------------------------------------
// Listing commands
// ---------------------------------------------------------------------------

fn cmd_list_vault_files(vault: &FsVault) -> Result<()> {
    for path in vault.notes() {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_list_publish_tagged(vault: &FsVault) -> Result<()> {
    for path in list_publish_tagged(vault)? {
        println!("{}", path.display());
    }
    Ok(())
}

fn cmd_config(cfg: &Config) -> Result<()> {
    println!("Config: {}", config::show_config_path());
    println!();
    println!("[vault]");
    println!(
        "  path = {}",
        cfg.vault.path.as_deref().unwrap_or("(unset, pass --vault)")
    );
    println!("  references_dir = {}", cfg.vault.references_dir);
    println!();
    println!("[walk]");
    println!("  extension = {}", cfg.walk.extension);
    println!("  exclude_dirs = {:?}", cfg.walk.exclude_dirs);
    println!("  exclude_suffixes = {:?}", cfg.walk.exclude_suffixes);
    Ok(())
}

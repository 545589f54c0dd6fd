
use anyhow::bail;
use clap::{Parser, Subcommand};
use chrono::Datelike;
use lazy_static::lazy_static;
use std::path::Path;

use crate::cli::compare::CompareSettings;

lazy_static! {
    /// Package version plus the git describe string emitted by build.rs, e.g. `0.1.0-6bb9635` or `0.1.0-6bb9635-dirty`.
    /// Also recorded in `cli_settings.json`.
    pub static ref FULL_VERSION: String = format!("{}-{}", env!("CARGO_PKG_VERSION"), env!("VERGEN_GIT_DESCRIBE"));

    /// License notice appended to every help page
    pub static ref AFTER_HELP: String = format!("Copyright (C) 2024-{}     hapreplay contributors.
This program comes with ABSOLUTELY NO WARRANTY; it is distributed under the MIT license.", chrono::Utc::now().year());
}

#[derive(Parser)]
#[clap(author, 
    version = &**FULL_VERSION, 
    about, 
    after_help = &**AFTER_HELP)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands
}

/// hapreplay, a variant comparison tool that replays both call sets onto the reference.
/// Select a subcommand to see more usage information:
#[derive(Subcommand)]
pub enum Commands {
    /// Compares a called variant set against a baseline by haplotype replay
    Compare(Box<CompareSettings>)
}

pub fn get_cli() -> Cli {
    Cli::parse()
}

/// Fails with a labelled error if an input file is missing
/// # Arguments
/// * `filename` - input path that must exist
/// * `label` - input name used in the error, e.g. "Input problem"
pub fn check_required_filename(filename: &Path, label: &str) -> anyhow::Result<()> {
    if !filename.exists() {
        bail!("{} does not exist: \"{}\"", label, filename.display());
    }

    Ok(())
}

/// Same as [`check_required_filename`], but an unset input passes
/// # Arguments
/// * `opt_filename` - optional input path
/// * `label` - input name used in the error
pub fn check_optional_filename(opt_filename: Option<&Path>, label: &str) -> anyhow::Result<()> {
    if let Some(filename) = opt_filename {
        if !filename.exists() {
            bail!("{} does not exist: \"{}\"", label, filename.display());
        }
    }

    Ok(())
}

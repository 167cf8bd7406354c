use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use wildex_core::{AnnotationCount, DEFAULT_ANNOTATIONS_PER_ID};
use wildex_fetch::DEFAULT_TIMEOUT_SECS;

#[derive(Parser)]
#[command(name = "wildex")]
#[command(version)]
#[command(about = "Download viewpoint-diverse annotation crops from wildlife encounter exports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download and crop the shortlisted annotations of an export
    Download(DownloadArgs),

    /// Print the shortlisted annotations per individual without downloading
    Plan {
        /// Encounter export (xlsx, xls or ods)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        selection: Selection,
    },

    /// Print the submission parameters stored in a resume file
    ResumeInfo {
        /// Resume file written by an earlier download
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Encounter export, or a resume file to retry its failures
    #[arg(short, long)]
    pub input: PathBuf,

    /// Folder the run folder is created in (defaults to Downloads)
    #[arg(short, long, env = "WILDEX_DOWNLOAD_ROOT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub selection: Selection,

    /// Seconds before an image request is abandoned
    #[arg(long, env = "WILDEX_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct Selection {
    /// Annotations kept per individual: a positive number or "all"
    #[arg(long, default_value = DEFAULT_ANNOTATIONS_PER_ID)]
    pub per_id: AnnotationCount,

    /// Keep annotations without an individual identity
    #[arg(long)]
    pub include_unidentified: bool,
}

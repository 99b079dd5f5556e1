use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "bookdigest",
    version,
    about = "Outline-driven knowledge routing and per-chapter digests for long documents"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Outline(OutlineArgs),
    Digest(DigestArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct OutlineArgs {
    #[arg(long, default_value = ".cache/bookdigest")]
    pub work_root: PathBuf,

    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub knowledge_base_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Args, Debug, Clone)]
pub struct DigestArgs {
    #[arg(long, default_value = ".cache/bookdigest")]
    pub work_root: PathBuf,

    #[arg(long)]
    pub input: PathBuf,

    #[arg(long)]
    pub knowledge_base_path: Option<PathBuf>,

    #[arg(long)]
    pub summaries_dir: Option<PathBuf>,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,

    #[arg(long)]
    pub max_pages: Option<usize>,

    #[arg(long, default_value_t = false)]
    pub clean: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = ".cache/bookdigest")]
    pub work_root: PathBuf,
}

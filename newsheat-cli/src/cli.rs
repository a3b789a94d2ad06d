use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use newsheat_core::{MediaKind, Region};

#[derive(Parser)]
#[command(name = "newsheat")]
#[command(about = "Search technology news ranked by heat, and extract file-share links from web pages")]
#[command(version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search news sources and print ranked results as JSON
    Search(SearchArgs),

    /// Find pages and extract file-share links from them
    #[command(subcommand)]
    Links(LinksCommand),

    /// Serve the news search over HTTP
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search keyword
    pub keyword: String,

    /// Max articles fetched per source [default: NEWSHEAT_PER_SOURCE_LIMIT or 15]
    #[arg(long)]
    pub limit: Option<usize>,

    /// Max articles per source in the output
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_per_source: u64,

    /// Show every result instead of capping each source
    #[arg(long)]
    pub no_balance: bool,

    /// Query every reachable source instead of routing by keyword domain
    #[arg(long)]
    pub all_sources: bool,

    /// Network region; overrides NEWSHEAT_REGION
    #[arg(long, value_enum)]
    pub region: Option<RegionArg>,

    /// sources.json to use instead of the built-in list; overrides NEWSHEAT_SOURCES
    #[arg(long)]
    pub sources: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum LinksCommand {
    /// Search the web for candidate pages
    Search(LinkSearchArgs),

    /// Read a JSON page list from stdin and print one JSON line of links per page
    Extract(LinkExtractArgs),
}

#[derive(Args)]
pub struct LinkSearchArgs {
    /// JSON array of queries, or a single query
    pub queries: String,

    /// Results requested per query
    #[arg(long, default_value_t = 10)]
    pub max_results: usize,
}

#[derive(Args)]
pub struct LinkExtractArgs {
    /// Pages fetched at once (clamped to 1..=8)
    #[arg(long, default_value_t = 4)]
    pub workers: usize,

    /// Tag links with video quality or audio format
    #[arg(long, value_enum, default_value = "film")]
    pub media: MediaArg,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Listen port; defaults to SERVER_PORT, then 3001
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum RegionArg {
    Auto,
    Cn,
    Global,
}

impl RegionArg {
    pub fn forced(self) -> Option<Region> {
        match self {
            RegionArg::Auto => None,
            RegionArg::Cn => Some(Region::Cn),
            RegionArg::Global => Some(Region::Global),
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum MediaArg {
    Film,
    Music,
}

impl From<MediaArg> for MediaKind {
    fn from(arg: MediaArg) -> Self {
        match arg {
            MediaArg::Film => MediaKind::Film,
            MediaArg::Music => MediaKind::Music,
        }
    }
}

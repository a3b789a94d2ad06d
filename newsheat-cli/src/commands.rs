//! Subcommand runners. JSON goes to stdout, logs to stderr.

use std::io::Write;

use anyhow::{Context, Result};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tracing::info;

use newsheat_core::PageRef;
use newsheat_services::{LinkConfig, LinkExtractionService, NewsSearchService, SearchConfig};

use crate::cli::{LinkExtractArgs, LinkSearchArgs, SearchArgs};

pub async fn search(args: SearchArgs) -> Result<()> {
    let mut config = SearchConfig::from_env()?;
    if let Some(region) = args.region {
        config.region = region.forced();
    }
    if let Some(path) = args.sources {
        config.sources_path = Some(path);
    }

    let service = NewsSearchService::new(config).context("failed to set up news search")?;

    let mut request = service.request(args.keyword);
    if let Some(limit) = args.limit {
        request.limit = limit;
    }
    request.max_per_source = args.max_per_source as usize;
    request.balance = !args.no_balance;
    request.all_sources = args.all_sources;

    let result = service.search(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    info!("Search complete, {} articles", result.total_found);
    Ok(())
}

pub async fn link_search(args: LinkSearchArgs) -> Result<()> {
    let queries = parse_queries(&args.queries);
    if queries.is_empty() {
        print_failure("no search queries given");
        return Ok(());
    }

    let service = LinkExtractionService::new(LinkConfig::default());
    let pages = service.search_pages(&queries, args.max_results).await;
    println!("{}", serde_json::to_string(&pages)?);
    Ok(())
}

pub async fn link_extract(args: LinkExtractArgs) -> Result<()> {
    let mut raw = String::new();
    tokio::io::stdin()
        .read_to_string(&mut raw)
        .await
        .context("failed to read stdin")?;

    let pages = match parse_pages(&raw) {
        Ok(Some(pages)) => pages,
        Ok(None) => return Ok(()),
        Err(e) => {
            print_failure(&format!("invalid page list: {}", e));
            return Ok(());
        }
    };

    let config = LinkConfig::default()
        .with_workers(args.workers)
        .with_media(args.media.into());
    let service = LinkExtractionService::new(config);

    let stdout = std::io::stdout();
    service
        .extract(pages, |links| {
            if let Ok(line) = serde_json::to_string(&links) {
                let mut out = stdout.lock();
                let _ = writeln!(out, "{}", line);
                let _ = out.flush();
            }
        })
        .await;
    Ok(())
}

/// A JSON array of strings, or the whole argument as one query
pub fn parse_queries(raw: &str) -> Vec<String> {
    match serde_json::from_str::<Vec<String>>(raw) {
        Ok(queries) => queries.into_iter().filter(|q| !q.trim().is_empty()).collect(),
        Err(_) if raw.trim().is_empty() => Vec::new(),
        Err(_) => vec![raw.to_string()],
    }
}

/// Page list from stdin. Blank input or an empty array means nothing to do.
pub fn parse_pages(raw: &str) -> Result<Option<Vec<PageRef>>, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let pages: Vec<PageRef> = serde_json::from_str(raw)?;
    Ok(Some(pages).filter(|pages| !pages.is_empty()))
}

pub fn failure_line(error: &str) -> String {
    json!({ "success": false, "error": error }).to_string()
}

pub fn print_failure(error: &str) {
    println!("{}", failure_line(error));
}

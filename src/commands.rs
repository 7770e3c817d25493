//! CLI command implementations.
//!
//! Record commands (`cases`, `capabilities`) print pretty JSON so the output
//! can be piped into other tools. Catalog commands print aligned text.

use anyhow::{bail, Context, Result};
use serde::Serialize;
use showcase_core::categories::{self, CATEGORIES, DEPARTMENTS, PURPOSE_GROUPS};
use showcase_core::groups::{self, POPULAR_TAGS};
use showcase_core::search::{search_from_history, SearchHistory, SearchOutcome};
use showcase_core::views::{CapabilityOutline, CaseCard};
use std::path::Path;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::content::ContentService;
use crate::source::build_source;

fn service(config: &Config) -> Result<ContentService> {
    let service = ContentService::new(build_source(config)?);
    tracing::debug!(source = service.source_name(), "content source selected");
    Ok(service)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One case in full, or the case list as cards.
pub async fn run_cases(config: &Config, id: Option<&str>) -> Result<()> {
    let service = service(config)?;
    match id {
        Some(id) => print_json(&service.get_case_by_id(id).await?),
        None => {
            let cases = service.get_cases(&[]).await?;
            print_json(&cases.map(|case| CaseCard::from(&case)))
        }
    }
}

/// With `outline`, prints the detail page outline instead of the record.
pub async fn run_capabilities(config: &Config, id: Option<&str>, outline: bool) -> Result<()> {
    let service = service(config)?;
    match id {
        Some(id) => {
            let capability = service.get_capability_by_id(id).await?;
            if outline {
                print_json(&CapabilityOutline::from(&capability))
            } else {
                print_json(&capability)
            }
        }
        None => print_json(&service.get_capabilities(&[]).await?),
    }
}

fn print_outcome(outcome: &SearchOutcome<'_>) {
    let shown: Vec<_> = outcome
        .groups
        .iter()
        .filter(|g| outcome.filtering || !g.grouped.all_capabilities.is_empty())
        .collect();

    if shown.is_empty() {
        println!("No groups match \"{}\".", outcome.query);
        return;
    }

    for scored in shown {
        let grouped = scored.grouped;
        if outcome.filtering {
            print!("{:>6.1}  ", scored.score);
        }
        println!(
            "{:<28} {:>3}  {}",
            grouped.group.id,
            grouped.all_capabilities.len(),
            grouped.group.title
        );
        for cap in &grouped.capabilities {
            println!("        - {} ({})", cap.title, cap.id);
        }
    }
}

/// Prints every group (or those matching `query`) with its preview list.
///
/// `tag` picks a popular tag and searches its keywords.
pub async fn run_groups(config: &Config, query: Option<&str>, tag: Option<&str>) -> Result<()> {
    let query = match tag {
        Some(label) => match groups::popular_tag(label) {
            Some(tag) => Some(tag.keyword),
            None => bail!("Unknown tag: {}", label),
        },
        None => query,
    };

    let catalog = Catalog::load(&service(config)?).await?;
    let mut history = SearchHistory::new();
    let outcome = catalog.search(query.unwrap_or_default(), &mut history);
    print_outcome(&outcome);

    if query.is_none() {
        let labels: Vec<&str> = POPULAR_TAGS.iter().map(|t| t.label).collect();
        println!();
        println!("Popular tags: {}", labels.join(", "));
    }

    let unmatched = catalog.unmatched();
    if query.is_none() && !unmatched.is_empty() {
        println!();
        println!("Not shown in any group: {}", unmatched.len());
        for cap in unmatched {
            println!("        - {} ({})", cap.title, cap.id);
        }
    }
    Ok(())
}

/// `key` is a category id or its display name.
pub async fn run_category(config: &Config, key: &str) -> Result<()> {
    let Some(category) = categories::lookup(key) else {
        bail!("Unknown category: {}. Run `showcase categories` for the list.", key);
    };

    let catalog = Catalog::load(&service(config)?).await?;
    let page = catalog.category(category.id);

    println!("{} ({})", page.display_name, page.category);
    if page.primary.is_empty() && page.secondary.is_empty() {
        println!("  (no capabilities)");
        return Ok(());
    }
    for cap in &page.primary {
        println!("  {:<16} {}", cap.id, cap.title);
    }
    for cap in &page.secondary {
        println!("  {:<16} {}  [related]", cap.id, cap.title);
    }
    Ok(())
}

fn load_history(path: &Path) -> Result<SearchHistory> {
    if !path.exists() {
        return Ok(SearchHistory::new());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;
    let entries: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse history file: {}", path.display()))?;
    Ok(SearchHistory::from_entries(entries))
}

fn save_history(path: &Path, history: &SearchHistory) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string(history)?)
        .with_context(|| format!("Failed to write history file: {}", path.display()))
}

/// Empties the history file.
pub fn run_clear_history(history_path: &Path) -> Result<()> {
    let mut history = load_history(history_path)?;
    let removed = history.len();
    history.clear();
    save_history(history_path, &history)?;
    println!("Cleared {} recent searches.", removed);
    Ok(())
}

/// Runs a search, or re-runs the `recent`-th stored query. With neither,
/// prints the stored history.
pub async fn run_search(
    config: &Config,
    query: Option<&str>,
    recent: Option<usize>,
    history_path: Option<&Path>,
) -> Result<()> {
    let mut history = match history_path {
        Some(path) => load_history(path)?,
        None => SearchHistory::new(),
    };

    if query.is_none() && recent.is_none() {
        if history.is_empty() {
            println!("No recent searches.");
        }
        for (i, entry) in history.entries().iter().enumerate() {
            println!("{}  {}", i, entry);
        }
        return Ok(());
    }

    let catalog = Catalog::load(&service(config)?).await?;
    let outcome = match query {
        Some(q) => catalog.search(q, &mut history),
        None => {
            let index = recent.unwrap_or(0);
            search_from_history(catalog.grouped(), &mut history, index)
                .with_context(|| format!("No recent search at index {}", index))?
        }
    };
    print_outcome(&outcome);

    if let Some(path) = history_path {
        save_history(path, &history)?;
    }
    Ok(())
}

/// Prints the catalog, then purpose groups and departments.
pub fn run_categories() -> Result<()> {
    println!("{:<26} {:<24} RELATED", "ID", "NAME");
    for category in CATEGORIES {
        println!(
            "{:<26} {:<24} {}",
            category.id,
            category.display,
            categories::related(category.id).join(", ")
        );
    }

    println!();
    println!("PURPOSES");
    for purpose in PURPOSE_GROUPS {
        println!("  {}  {}", purpose.title, purpose.description);
        println!("        {}", purpose.categories.join(", "));
    }

    println!();
    println!("DEPARTMENTS");
    for department in DEPARTMENTS {
        println!(
            "  {:<20} {:<12} {}",
            department.id,
            department.title,
            department.related_capabilities.join(", ")
        );
    }
    Ok(())
}

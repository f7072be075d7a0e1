use std::fmt::Write as _;

use planboard_core::SearchResultSet;
use planboard_service::{Gateway, SearchService};

/// `planboard search <keyword>`: grouped hits across projects, phases and tasks.
pub async fn execute<G: Gateway + ?Sized>(
    gateway: &G,
    keyword: &str,
    json: bool,
) -> anyhow::Result<String> {
    let results = SearchService::new(gateway).general_search(keyword).await?;
    if json {
        return Ok(serde_json::to_string_pretty(&results)?);
    }
    Ok(format_human(keyword, &results))
}

fn format_human(keyword: &str, results: &SearchResultSet) -> String {
    if results.is_empty() {
        return format!("No results found for: {keyword}");
    }
    let mut out = String::new();
    if !results.projects.is_empty() {
        let _ = writeln!(out, "Projects ({}):", results.projects.len());
        for p in &results.projects {
            let _ = writeln!(out, "  #{} {}", p.id, p.title);
        }
    }
    if !results.phases.is_empty() {
        let _ = writeln!(out, "Phases ({}):", results.phases.len());
        for p in &results.phases {
            let _ = writeln!(
                out,
                "  #{} {}  [project: {} #{}]",
                p.id, p.title, p.project.title, p.project.id
            );
        }
    }
    if !results.tasks.is_empty() {
        let _ = writeln!(out, "Tasks ({}):", results.tasks.len());
        for t in &results.tasks {
            let _ = writeln!(
                out,
                "  #{} {}  [project: {} #{}, phase: {} #{}]",
                t.id, t.title, t.project.title, t.project.id, t.phase.title, t.phase.id
            );
        }
    }
    out.truncate(out.trim_end().len());
    out
}

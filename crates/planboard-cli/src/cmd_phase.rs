use std::fmt::Write as _;

use planboard_core::{PhaseSummary, Success};
use planboard_service::{Gateway, NewPhase, PhaseService, PhaseUpdate};

/// `planboard phases <project>`: phases with their task previews.
pub async fn list<G: Gateway + ?Sized>(
    gateway: &G,
    project_id: i64,
    concurrency: usize,
    json: bool,
) -> anyhow::Result<String> {
    let phases = PhaseService::new(gateway)
        .with_concurrency(concurrency)
        .list_phases(project_id)
        .await?;
    if json {
        return Ok(serde_json::to_string_pretty(&phases)?);
    }
    Ok(format_board(project_id, &phases))
}

pub async fn create<G: Gateway + ?Sized>(
    gateway: &G,
    project_id: i64,
    input: NewPhase,
    json: bool,
) -> anyhow::Result<String> {
    let phase = PhaseService::new(gateway)
        .create_phase(project_id, input)
        .await?;
    render_one("Created", &phase, json)
}

pub async fn copy<G: Gateway + ?Sized>(
    gateway: &G,
    project_id: i64,
    input: NewPhase,
    json: bool,
) -> anyhow::Result<String> {
    let phase = PhaseService::new(gateway)
        .copy_phase(project_id, input)
        .await?;
    render_one("Copied", &phase, json)
}

pub async fn update<G: Gateway + ?Sized>(
    gateway: &G,
    phase_id: i64,
    update: PhaseUpdate,
    project_id: i64,
    json: bool,
) -> anyhow::Result<String> {
    if update.is_empty() {
        anyhow::bail!("nothing to update: pass --name, --description or --position");
    }
    let phase = PhaseService::new(gateway)
        .update_phase(phase_id, update, project_id)
        .await?;
    render_one("Updated", &phase, json)
}

pub async fn move_to<G: Gateway + ?Sized>(
    gateway: &G,
    phase_id: i64,
    position: i32,
) -> anyhow::Result<String> {
    let ok = PhaseService::new(gateway)
        .move_phase(phase_id, position)
        .await?;
    Ok(acknowledge(&ok, &format!("Moved phase #{phase_id} to {position}")))
}

pub async fn delete<G: Gateway + ?Sized>(gateway: &G, phase_id: i64) -> anyhow::Result<String> {
    let ok = PhaseService::new(gateway).delete_phase(phase_id).await?;
    Ok(acknowledge(&ok, &format!("Deleted phase #{phase_id}")))
}

// ── Rendering ──

fn render_one(verb: &str, phase: &PhaseSummary, json: bool) -> anyhow::Result<String> {
    if json {
        return Ok(serde_json::to_string_pretty(phase)?);
    }
    Ok(format!(
        "{verb} phase #{} \"{}\" at position {}",
        phase.id, phase.title, phase.position
    ))
}

fn acknowledge(ok: &Success, fallback: &str) -> String {
    if ok.message.is_empty() {
        fallback.to_string()
    } else {
        ok.message.clone()
    }
}

pub(crate) fn format_board(project_id: i64, phases: &[PhaseSummary]) -> String {
    let mut out = String::new();
    if phases.is_empty() {
        let _ = write!(out, "Project #{project_id} has no phases");
        return out;
    }
    let _ = writeln!(out, "Project #{project_id}: {} phase(s)", phases.len());
    for phase in phases {
        let _ = writeln!(
            out,
            "\n[{}] {} (#{}), {} task(s)",
            phase.position,
            phase.title,
            phase.id,
            phase.task_previews.len()
        );
        for task in &phase.task_previews {
            let _ = write!(out, "  - [{}] {} (#{})", task.status, task.title, task.id);
            if let Some(due) = &task.due_date {
                let _ = write!(out, " due {due}");
            }
            if task.has_description {
                let _ = write!(out, " *");
            }
            out.push('\n');
        }
    }
    out.truncate(out.trim_end().len());
    out
}

use super::*;

#[derive(Debug, Default)]
pub struct EmitReport {
    pub written: Vec<PathBuf>,
    pub warnings: Vec<DigestWarning>,
}

/// Summarizes each unit and writes the non-empty results below
/// `summaries_dir`. A failing or empty summary, or a file that cannot be
/// written, skips only that unit.
pub fn emit_units(
    units: &[ExportUnit],
    summarizer: &mut dyn Summarizer,
    summaries_dir: &Path,
    generated_at: &str,
) -> Result<EmitReport> {
    let mut report = EmitReport::default();

    for unit in units {
        info!(title = %unit.title, fragments = unit.fragments.len(), "summarizing export unit");

        let body = match summarizer.summarize(&unit.title, &unit.fragments) {
            Ok(body) => body,
            Err(err) => {
                skip_unit(&mut report, unit, format!("summarizer failed: {err:#}"));
                continue;
            }
        };
        if body.trim().is_empty() {
            skip_unit(&mut report, unit, "summary was empty".to_string());
            continue;
        }

        let path = summaries_dir.join(unit.relative_path());
        if let Err(err) = write_text(&path, &render_markdown(&unit.title, &body, generated_at)) {
            skip_unit(&mut report, unit, format!("write failed: {err:#}"));
            continue;
        }
        info!(path = %path.display(), "wrote summary");
        report.written.push(path);
    }

    Ok(report)
}

fn skip_unit(report: &mut EmitReport, unit: &ExportUnit, reason: String) {
    let warning = DigestWarning::SkippedUnit {
        title: unit.title.clone(),
        reason,
    };
    warn!(warning = %warning, "recorded digest warning");
    report.warnings.push(warning);
}

pub fn render_markdown(title: &str, body: &str, generated_at: &str) -> String {
    format!(
        "# {title}\nGenerated on: {generated_at}\n\n{}\n\n---\n*Digest generated by bookdigest*\n",
        body.trim_end()
    )
}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::{DigestRunManifest, KnowledgeBase};
use crate::util::read_json;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct KnowledgeBaseTotals {
    pub parts: usize,
    pub chapters: usize,
    pub sections: usize,
    pub fragments: usize,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.work_root.join("manifests");
    let knowledge_dir = args.work_root.join("knowledge_bases");

    info!(work_root = %args.work_root.display(), "status requested");

    match latest_json_with_prefix(&manifest_dir, "digest_run_")? {
        Some(path) => {
            let manifest: DigestRunManifest = read_json(&path)?;
            info!(
                path = %path.display(),
                run_id = %manifest.run_id,
                status = %manifest.status,
                updated_at = %manifest.updated_at,
                pages_routed = manifest.counts.pages_routed,
                fragments_routed = manifest.counts.fragments_routed,
                units_written = manifest.counts.export_units_written,
                units_skipped = manifest.counts.export_units_skipped,
                warnings = manifest.warnings.len(),
                "loaded latest digest run manifest"
            );
        }
        None => warn!(path = %manifest_dir.display(), "no digest run manifest found"),
    }

    let knowledge_bases = json_files(&knowledge_dir)?;
    if knowledge_bases.is_empty() {
        warn!(path = %knowledge_dir.display(), "no knowledge bases found");
    }

    for path in knowledge_bases {
        let knowledge_base: KnowledgeBase = read_json(&path)?;
        let totals = knowledge_base_totals(&knowledge_base);
        info!(
            path = %path.display(),
            parts = totals.parts,
            chapters = totals.chapters,
            sections = totals.sections,
            fragments = totals.fragments,
            "knowledge base status"
        );
    }

    Ok(())
}

pub fn knowledge_base_totals(knowledge_base: &KnowledgeBase) -> KnowledgeBaseTotals {
    let mut totals = KnowledgeBaseTotals {
        parts: knowledge_base.len(),
        ..KnowledgeBaseTotals::default()
    };

    for part in knowledge_base.values() {
        totals.fragments += part.part_knowledge.len();
        totals.sections += part.other_sections.len();
        totals.fragments += part
            .other_sections
            .iter()
            .map(|section| section.knowledge.len())
            .sum::<usize>();

        totals.chapters += part.chapters.len();
        for chapter in part.chapters.values() {
            totals.fragments += chapter.chapter_knowledge.len();
            totals.sections += chapter.sections.len();
            totals.fragments += chapter
                .sections
                .iter()
                .map(|section| section.knowledge.len())
                .sum::<usize>();
        }
    }

    totals
}

fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let entries = fs::read_dir(dir).with_context(|| format!("failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to read entry in {}", dir.display()))?;
        let path = entry.path();

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if is_json && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Run manifests embed a compact UTC timestamp, so the lexically last name is
/// the newest run.
fn latest_json_with_prefix(dir: &Path, prefix: &str) -> Result<Option<PathBuf>> {
    let latest = json_files(dir)?.into_iter().rev().find(|path| {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with(prefix))
            .unwrap_or(false)
    });
    Ok(latest)
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::model::{ChapterRecord, PartRecord, SectionRecord};

    fn section(title: &str, knowledge: &[&str]) -> SectionRecord {
        SectionRecord {
            title: title.to_string(),
            start: 0,
            end: 0,
            knowledge: knowledge.iter().map(|point| point.to_string()).collect(),
        }
    }

    #[test]
    fn knowledge_base_totals_count_every_tier() {
        let mut chapters = IndexMap::new();
        chapters.insert(
            "Chapter 1".to_string(),
            ChapterRecord {
                start: 0,
                end: 4,
                chapter_knowledge: vec!["c".to_string()],
                sections: vec![section("1.1", &["s1", "s2"])],
            },
        );

        let mut knowledge_base = KnowledgeBase::new();
        knowledge_base.insert(
            "Part I".to_string(),
            PartRecord {
                start: 0,
                end: 9,
                part_knowledge: vec!["p".to_string()],
                chapters,
                other_sections: vec![section("Overview", &["o"]), section("Empty", &[])],
            },
        );

        let totals = knowledge_base_totals(&knowledge_base);
        assert_eq!(
            totals,
            KnowledgeBaseTotals {
                parts: 1,
                chapters: 1,
                sections: 3,
                fragments: 5,
            }
        );
    }

    #[test]
    fn latest_manifest_is_the_lexically_last_run() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "digest_run_20260101T000000Z.json",
            "digest_run_20260301T000000Z.json",
            "other.json",
        ] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }

        let latest = latest_json_with_prefix(dir.path(), "digest_run_").unwrap();
        assert_eq!(
            latest.unwrap().file_name().unwrap(),
            "digest_run_20260301T000000Z.json"
        );
    }
}

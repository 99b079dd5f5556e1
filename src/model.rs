use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One `(level, title, page)` heading from the document outline. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u32, String, u32)", into = "(u32, String, u32)")]
pub struct OutlineEntry {
    pub level: u32,
    pub title: String,
    pub page: u32,
}

impl OutlineEntry {
    pub fn new(level: u32, title: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            title: title.into(),
            page,
        }
    }
}

impl From<(u32, String, u32)> for OutlineEntry {
    fn from((level, title, page): (u32, String, u32)) -> Self {
        Self { level, title, page }
    }
}

impl From<OutlineEntry> for (u32, String, u32) {
    fn from(entry: OutlineEntry) -> Self {
        (entry.level, entry.title, entry.page)
    }
}

/// Page-level extraction reply for a single 1-based page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    pub page: u32,
    #[serde(default = "default_has_content")]
    pub has_content: bool,
    #[serde(default)]
    pub knowledge: Vec<String>,
}

fn default_has_content() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInput {
    pub total_pages: usize,
    #[serde(default)]
    pub outline: Vec<OutlineEntry>,
    #[serde(default)]
    pub pages: Vec<PageRecord>,
}

pub type KnowledgeBase = IndexMap<String, PartRecord>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PartRecord {
    pub start: usize,
    pub end: usize,
    pub part_knowledge: Vec<String>,
    pub chapters: IndexMap<String, ChapterRecord>,
    pub other_sections: Vec<SectionRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChapterRecord {
    pub start: usize,
    pub end: usize,
    pub chapter_knowledge: Vec<String>,
    pub sections: Vec<SectionRecord>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionRecord {
    pub title: String,
    pub start: usize,
    pub end: usize,
    pub knowledge: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestPaths {
    pub work_root: String,
    pub input_path: String,
    pub knowledge_base_path: String,
    pub summaries_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DigestCounts {
    pub total_pages: usize,
    pub pages_requested: usize,
    pub pages_routed: usize,
    pub pages_without_content: usize,
    pub pages_dropped: usize,
    pub fragments_routed: usize,
    pub fragments_dropped: usize,
    pub part_nodes: usize,
    pub chapter_nodes: usize,
    pub section_nodes: usize,
    pub loose_section_nodes: usize,
    pub export_units_planned: usize,
    pub export_units_written: usize,
    pub export_units_skipped: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub input_sha256: String,
    pub paths: DigestPaths,
    pub counts: DigestCounts,
    pub warnings: Vec<String>,
}

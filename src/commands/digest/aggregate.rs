use super::*;

pub const OVERVIEW_STEM: &str = "00-readme";

/// Upper bound on slug length in bytes, well below common file name limits
/// even with a sequence prefix and extension.
pub const MAX_SLUG_BYTES: usize = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    PartOverview,
    ChapterOverview,
    LooseSection,
    ChapterSection,
}

/// A piece of output handed to the summarizer and written as one file.
#[derive(Debug, Clone)]
pub struct ExportUnit {
    pub kind: UnitKind,
    pub title: String,
    /// Folder segments below the summaries root.
    pub folder: Vec<String>,
    pub file_stem: String,
    pub fragments: Vec<String>,
}

impl ExportUnit {
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.folder.iter().collect();
        path.push(format!("{}.md", self.file_stem));
        path
    }
}

/// A node's own fragments followed by those of its direct section children.
/// Chapters are their own export units and are never folded into a part.
pub fn combined_fragments(tree: &DocumentTree, id: NodeId) -> Vec<String> {
    let mut combined = tree.node(id).own_fragments();
    for section in tree.children_of_kind(id, NodeKind::Section) {
        combined.extend(tree.node(section).own_fragments());
    }
    combined
}

/// Lists export units in outline order: each part overview, the part's loose
/// sections, then every chapter overview followed by its sections. Units with
/// no fragments are left out and do not consume a sequence number.
pub fn plan_export(tree: &DocumentTree) -> Vec<ExportUnit> {
    let mut units = Vec::new();
    let mut part_folders = SlugAllocator::default();

    for part in tree.parts().iter().copied() {
        let part_folder = vec![part_folders.allocate(&tree.node(part).title)];

        push_overview(&mut units, tree, part, UnitKind::PartOverview, &part_folder);
        let loose: Vec<NodeId> = tree.loose_sections(part).collect();
        push_sections(&mut units, tree, &loose, UnitKind::LooseSection, &part_folder);

        let mut chapter_folders = SlugAllocator::default();
        for chapter in tree.chapters(part) {
            let mut chapter_folder = part_folder.clone();
            chapter_folder.push(chapter_folders.allocate(&tree.node(chapter).title));

            push_overview(&mut units, tree, chapter, UnitKind::ChapterOverview, &chapter_folder);
            push_sections(
                &mut units,
                tree,
                tree.children(chapter),
                UnitKind::ChapterSection,
                &chapter_folder,
            );
        }
    }

    units
}

fn push_overview(
    units: &mut Vec<ExportUnit>,
    tree: &DocumentTree,
    id: NodeId,
    kind: UnitKind,
    folder: &[String],
) {
    let fragments = combined_fragments(tree, id);
    if fragments.is_empty() {
        debug!(title = %tree.node(id).title, "no knowledge for overview");
        return;
    }

    units.push(ExportUnit {
        kind,
        title: format!("{} (Overview)", tree.node(id).title),
        folder: folder.to_vec(),
        file_stem: OVERVIEW_STEM.to_string(),
        fragments,
    });
}

fn push_sections(
    units: &mut Vec<ExportUnit>,
    tree: &DocumentTree,
    sections: &[NodeId],
    kind: UnitKind,
    folder: &[String],
) {
    let mut ordinal = 0;
    for section in sections.iter().copied() {
        let node = tree.node(section);
        let fragments = node.own_fragments();
        if fragments.is_empty() {
            continue;
        }

        ordinal += 1;
        units.push(ExportUnit {
            kind,
            title: node.title.clone(),
            folder: folder.to_vec(),
            file_stem: format!("{:02}-{}", ordinal, slugify(&node.title)),
            fragments,
        });
    }
}

/// Lower-cases `title`, collapses every run of non-word characters into one
/// `-`, and trims separators from both ends. The result is cut on a
/// character boundary to at most `MAX_SLUG_BYTES`.
pub fn slugify(title: &str) -> String {
    let mut out = String::with_capacity(title.len().min(MAX_SLUG_BYTES));
    let mut pending_separator = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() || ch == '_' {
            let separator = pending_separator && !out.is_empty();
            let lowered: String = ch.to_lowercase().collect();
            if out.len() + usize::from(separator) + lowered.len() > MAX_SLUG_BYTES {
                break;
            }
            if separator {
                out.push('-');
            }
            pending_separator = false;
            out.push_str(&lowered);
        } else {
            pending_separator = true;
        }
    }

    if out.is_empty() {
        return "untitled".to_string();
    }
    out
}

/// Hands out slugs that are unique among one set of sibling folders.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    used: HashSet<String>,
}

impl SlugAllocator {
    pub fn allocate(&mut self, title: &str) -> String {
        let base = slugify(title);
        let mut candidate = base.clone();
        let mut suffix = 1;

        while !self.used.insert(candidate.clone()) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }

        candidate
    }
}

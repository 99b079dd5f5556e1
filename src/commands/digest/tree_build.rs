use super::*;

pub const SYNTHETIC_PART_TITLE: &str = "Part I (Entire Document)";

#[derive(Debug, Clone, Copy, Default)]
struct BuildCursor {
    part: Option<NodeId>,
    chapter: Option<NodeId>,
}

/// Classifies, builds, and range-resolves the outline in one call. The
/// returned tree is ready for routing.
pub fn build_document_tree(
    entries: &[OutlineEntry],
    classifier: &OutlineClassifier,
    total_pages: usize,
) -> Result<DocumentTree> {
    let mut tree = build_tree(entries, classifier, total_pages)?;
    resolve_ranges(&mut tree);
    Ok(tree)
}

pub fn build_tree(
    entries: &[OutlineEntry],
    classifier: &OutlineClassifier,
    total_pages: usize,
) -> Result<DocumentTree> {
    if total_pages == 0 {
        bail!("document reports zero pages; there is nothing to structure");
    }

    let mut tree = DocumentTree::new(total_pages);
    let classified: Vec<(EntryKind, &OutlineEntry)> = entries
        .iter()
        .map(|entry| (classifier.classify(entry), entry))
        .collect();

    let initial = if classified.iter().any(|(kind, _)| *kind == EntryKind::Part) {
        BuildCursor::default()
    } else {
        let root = tree.root();
        let part = tree.add_child(root, SYNTHETIC_PART_TITLE, NodeKind::Part, 0);
        info!(
            entries = entries.len(),
            title = SYNTHETIC_PART_TITLE,
            "outline has no part entries; synthesized a whole-document part"
        );
        BuildCursor {
            part: Some(part),
            chapter: None,
        }
    };

    classified
        .into_iter()
        .fold(initial, |cursor, (kind, entry)| {
            attach_entry(&mut tree, cursor, kind, entry)
        });

    debug!(nodes = tree.node_count(), "outline tree built");
    Ok(tree)
}

fn attach_entry(
    tree: &mut DocumentTree,
    cursor: BuildCursor,
    kind: EntryKind,
    entry: &OutlineEntry,
) -> BuildCursor {
    let start = outline_page_to_index(entry.page);
    let title = entry.title.trim();

    match (kind, cursor.part, cursor.chapter) {
        (EntryKind::Part, _, _) => {
            let root = tree.root();
            let part = tree.add_child(root, title, NodeKind::Part, start);
            BuildCursor {
                part: Some(part),
                chapter: None,
            }
        }
        (EntryKind::Chapter, Some(part), _) => {
            let chapter = tree.add_child(part, title, NodeKind::Chapter, start);
            BuildCursor {
                part: Some(part),
                chapter: Some(chapter),
            }
        }
        (_, Some(_), Some(chapter)) => {
            tree.add_child(chapter, title, NodeKind::Section, start);
            cursor
        }
        (_, Some(part), None) => {
            tree.add_child(part, title, NodeKind::Section, start);
            cursor
        }
        (_, None, _) => {
            tree.record_warning(DigestWarning::OrphanEntry {
                title: title.to_string(),
                level: entry.level,
                page: entry.page,
            });
            cursor
        }
    }
}

fn outline_page_to_index(page: u32) -> usize {
    page.saturating_sub(1) as usize
}

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    Assigned(NodeId),
    /// Nothing to route; the page had no usable fragments.
    Empty,
    Dropped,
}

#[derive(Debug, Default, Clone)]
pub struct RoutingStats {
    pub pages_requested: usize,
    pub pages_routed: usize,
    pub pages_without_content: usize,
    pub pages_dropped: usize,
    pub fragments_routed: usize,
    pub fragments_dropped: usize,
}

/// Appends `fragments` to the most specific node whose range holds `page_index`.
pub fn route(tree: &mut DocumentTree, page_index: usize, fragments: &[String]) -> RouteOutcome {
    if fragments.is_empty() {
        return RouteOutcome::Empty;
    }

    let Some(target) = locate(tree, page_index) else {
        tree.record_warning(DigestWarning::UnroutablePage {
            page_index,
            fragments: fragments.len(),
        });
        return RouteOutcome::Dropped;
    };

    tree.append_fragments(target, page_index, fragments);
    RouteOutcome::Assigned(target)
}

/// Finds the deepest node containing `page_index`.
///
/// Candidates at every tier are searched most-recently-declared first, so
/// when a malformed outline produces overlapping ranges the later entry wins.
/// Inside a part, chapters are tried before loose sections; a page covered by
/// neither stays at part level.
pub fn locate(tree: &DocumentTree, page_index: usize) -> Option<NodeId> {
    let part = latest_containing(tree, tree.parts().iter().copied(), page_index)?;

    if let Some(chapter) = latest_containing(tree, tree.chapters(part), page_index) {
        let section = latest_containing(tree, tree.children(chapter).iter().copied(), page_index);
        return Some(section.unwrap_or(chapter));
    }

    Some(latest_containing(tree, tree.loose_sections(part), page_index).unwrap_or(part))
}

fn latest_containing(
    tree: &DocumentTree,
    candidates: impl DoubleEndedIterator<Item = NodeId>,
    page_index: usize,
) -> Option<NodeId> {
    candidates
        .rev()
        .find(|candidate| tree.node(*candidate).contains(page_index))
}

/// Visits pages in increasing order and routes whatever the extractor returns.
/// Pages at or beyond `max_pages` are never requested.
pub fn route_pages(
    tree: &mut DocumentTree,
    extractor: &mut dyn FragmentExtractor,
    max_pages: Option<usize>,
) -> RoutingStats {
    let total_pages = tree.total_pages();
    let limit = max_pages.map_or(total_pages, |max| max.min(total_pages));
    let mut stats = RoutingStats::default();

    if limit < total_pages {
        info!(
            total_pages,
            limit, "page limit active; later pages are not requested"
        );
    }

    for page_index in 0..limit {
        stats.pages_requested += 1;

        let fragments = match extractor.extract(page_index) {
            Ok(fragments) => fragments,
            Err(err) => {
                tree.record_warning(DigestWarning::SkippedPage {
                    page_index,
                    reason: format!("{err:#}"),
                });
                stats.pages_without_content += 1;
                continue;
            }
        };

        match route(tree, page_index, &fragments) {
            RouteOutcome::Assigned(target) => {
                let node = tree.node(target);
                info!(
                    page = page_index + 1,
                    fragments = fragments.len(),
                    kind = node.kind.as_str(),
                    node = %node.title,
                    "routed page knowledge"
                );
                stats.pages_routed += 1;
                stats.fragments_routed += fragments.len();
            }
            RouteOutcome::Empty => {
                debug!(page = page_index + 1, "skipping page without content");
                stats.pages_without_content += 1;
            }
            RouteOutcome::Dropped => {
                stats.pages_dropped += 1;
                stats.fragments_dropped += fragments.len();
            }
        }
    }

    stats
}

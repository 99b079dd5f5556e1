use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Document,
    Part,
    Chapter,
    Section,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Part => "part",
            NodeKind::Chapter => "chapter",
            NodeKind::Section => "section",
        }
    }
}

/// A knowledge fragment tagged with the 0-based page it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub page: usize,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Node {
    pub title: String,
    pub kind: NodeKind,
    /// 0-based, inclusive.
    pub start: usize,
    /// 0-based, inclusive. Only meaningful once ranges are resolved.
    pub end: usize,
    pub fragments: Vec<Fragment>,
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn contains(&self, page_index: usize) -> bool {
        self.start <= page_index && page_index <= self.end
    }

    /// Own fragments in page order. Fragments routed for the same page keep
    /// their arrival order.
    pub fn own_fragments(&self) -> Vec<String> {
        let mut ordered: Vec<&Fragment> = self.fragments.iter().collect();
        ordered.sort_by_key(|fragment| fragment.page);
        ordered
            .into_iter()
            .map(|fragment| fragment.text.clone())
            .collect()
    }
}

/// Recoverable conditions recorded while structuring, routing, or exporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DigestWarning {
    DegenerateRange {
        title: String,
        kind: NodeKind,
        declared_start: usize,
        declared_end: i64,
        start: usize,
        end: usize,
    },
    OrphanEntry {
        title: String,
        level: u32,
        page: u32,
    },
    UnroutablePage {
        page_index: usize,
        fragments: usize,
    },
    SkippedPage {
        page_index: usize,
        reason: String,
    },
    SkippedUnit {
        title: String,
        reason: String,
    },
}

impl fmt::Display for DigestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DigestWarning::DegenerateRange {
                title,
                kind,
                declared_start,
                declared_end,
                start,
                end,
            } => write!(
                f,
                "degenerate {} range for '{}': declared [{}, {}], clamped to [{}, {}]",
                kind.as_str(),
                title,
                declared_start,
                declared_end,
                start,
                end
            ),
            DigestWarning::OrphanEntry { title, level, page } => write!(
                f,
                "outline entry '{}' (level {}, page {}) has no enclosing part and was dropped",
                title, level, page
            ),
            DigestWarning::UnroutablePage {
                page_index,
                fragments,
            } => write!(
                f,
                "page {} is outside every part; dropped {} fragments",
                page_index + 1,
                fragments
            ),
            DigestWarning::SkippedPage { page_index, reason } => {
                write!(f, "page {} skipped: {}", page_index + 1, reason)
            }
            DigestWarning::SkippedUnit { title, reason } => {
                write!(f, "export unit '{}' skipped: {}", title, reason)
            }
        }
    }
}

/// Arena-backed document hierarchy. Index 0 is always the document root.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    total_pages: usize,
    warnings: Vec<DigestWarning>,
}

impl DocumentTree {
    pub fn new(total_pages: usize) -> Self {
        let root = Node {
            title: String::new(),
            kind: NodeKind::Document,
            start: 0,
            end: total_pages.saturating_sub(1),
            fragments: Vec::new(),
            children: Vec::new(),
        };

        Self {
            nodes: vec![root],
            total_pages,
            warnings: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parts(&self) -> &[NodeId] {
        self.children(self.root())
    }

    pub fn chapters(&self, part: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children_of_kind(part, NodeKind::Chapter)
    }

    /// Sections attached directly to a part, with no chapter in between.
    pub fn loose_sections(&self, part: NodeId) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children_of_kind(part, NodeKind::Section)
    }

    pub fn children_of_kind(
        &self,
        id: NodeId,
        kind: NodeKind,
    ) -> impl DoubleEndedIterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.node(*child).kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }

    pub fn count_kind(&self, kind: NodeKind) -> usize {
        self.iter().filter(|(_, node)| node.kind == kind).count()
    }

    pub fn loose_section_count(&self) -> usize {
        self.parts()
            .iter()
            .map(|part| self.loose_sections(*part).count())
            .sum()
    }

    /// First node in outline order carrying `title`. Titles are display data,
    /// so this is a convenience lookup only.
    #[cfg(test)]
    pub fn find(&self, title: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.title == title)
            .map(|(id, _)| id)
    }

    pub(super) fn add_child(
        &mut self,
        parent: NodeId,
        title: &str,
        kind: NodeKind,
        start: usize,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            title: title.to_string(),
            kind,
            start,
            end: start,
            fragments: Vec::new(),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(super) fn append_fragments(&mut self, id: NodeId, page_index: usize, fragments: &[String]) {
        self.nodes[id.0]
            .fragments
            .extend(fragments.iter().map(|text| Fragment {
                page: page_index,
                text: text.clone(),
            }));
    }

    pub fn warnings(&self) -> &[DigestWarning] {
        &self.warnings
    }

    pub(super) fn record_warning(&mut self, warning: DigestWarning) {
        warn!(warning = %warning, "recorded digest warning");
        self.warnings.push(warning);
    }

    pub fn log_structure(&self) {
        for part in self.parts() {
            let node = self.node(*part);
            info!(
                part = %node.title,
                start_page = node.start + 1,
                end_page = node.end + 1,
                chapters = self.chapters(*part).count(),
                loose_sections = self.loose_sections(*part).count(),
                "resolved part"
            );
            for chapter in self.chapters(*part) {
                let chapter_node = self.node(chapter);
                debug!(
                    chapter = %chapter_node.title,
                    start_page = chapter_node.start + 1,
                    end_page = chapter_node.end + 1,
                    sections = chapter_node.children.len(),
                    "resolved chapter"
                );
            }
        }
    }
}

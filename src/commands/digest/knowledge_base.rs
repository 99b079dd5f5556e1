use super::*;

/// Serializable view of the routed tree, keyed by part title in outline order.
pub fn knowledge_base_from_tree(tree: &DocumentTree) -> KnowledgeBase {
    let mut knowledge_base = KnowledgeBase::new();

    for part in tree.parts().iter().copied() {
        let node = tree.node(part);

        let mut chapters = IndexMap::new();
        for chapter in tree.chapters(part) {
            let chapter_node = tree.node(chapter);
            let record = ChapterRecord {
                start: chapter_node.start,
                end: chapter_node.end,
                chapter_knowledge: chapter_node.own_fragments(),
                sections: tree
                    .children(chapter)
                    .iter()
                    .map(|section| section_record(tree, *section))
                    .collect(),
            };
            let key = unique_key(&chapters, &chapter_node.title);
            chapters.insert(key, record);
        }

        let record = PartRecord {
            start: node.start,
            end: node.end,
            part_knowledge: node.own_fragments(),
            chapters,
            other_sections: tree
                .loose_sections(part)
                .map(|section| section_record(tree, section))
                .collect(),
        };
        let key = unique_key(&knowledge_base, &node.title);
        knowledge_base.insert(key, record);
    }

    knowledge_base
}

fn section_record(tree: &DocumentTree, id: NodeId) -> SectionRecord {
    let node = tree.node(id);
    SectionRecord {
        title: node.title.clone(),
        start: node.start,
        end: node.end,
        knowledge: node.own_fragments(),
    }
}

fn unique_key<V>(map: &IndexMap<String, V>, title: &str) -> String {
    if !map.contains_key(title) {
        return title.to_string();
    }

    let mut suffix = 2;
    loop {
        let candidate = format!("{title} ({suffix})");
        if !map.contains_key(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

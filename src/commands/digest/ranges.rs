use super::*;

/// Assigns every node its inclusive page range, level by level from the root.
///
/// Each non-last sibling ends one page before the next sibling starts and the
/// last sibling ends with its parent. Starts are clamped into the parent and
/// an `end < start` is clamped to `end = start`; both are recorded as
/// degenerate ranges. The first part is stretched down to the root's start so
/// that front matter is still owned by a part.
pub fn resolve_ranges(tree: &mut DocumentTree) {
    let root = tree.root();
    if let Some(first_part) = tree.parts().first().copied() {
        let root_start = tree.node(root).start;
        tree.node_mut(first_part).start = root_start;
    }

    let mut pending = VecDeque::from([root]);
    while let Some(parent) = pending.pop_front() {
        resolve_siblings(tree, parent);
        pending.extend(tree.children(parent).iter().copied());
    }
}

fn resolve_siblings(tree: &mut DocumentTree, parent: NodeId) {
    let (parent_start, parent_end) = {
        let node = tree.node(parent);
        (node.start, node.end)
    };
    let siblings = tree.children(parent).to_vec();

    for (position, id) in siblings.iter().enumerate() {
        let declared_start = tree.node(*id).start;
        let declared_end = match siblings.get(position + 1) {
            Some(next) => tree.node(*next).start as i64 - 1,
            None => parent_end as i64,
        };

        let start = declared_start.clamp(parent_start, parent_end);
        let end = declared_end.clamp(start as i64, parent_end as i64) as usize;

        let node = tree.node_mut(*id);
        node.start = start;
        node.end = end;

        if start != declared_start || end as i64 != declared_end {
            let warning = DigestWarning::DegenerateRange {
                title: node.title.clone(),
                kind: node.kind,
                declared_start,
                declared_end,
                start,
                end,
            };
            tree.record_warning(warning);
        }
    }
}

use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Part,
    Chapter,
    Other,
}

/// Labels outline entries from their nesting level and title alone.
#[derive(Debug)]
pub struct OutlineClassifier {
    part_pattern: Regex,
    chapter_pattern: Regex,
}

impl OutlineClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            part_pattern: Regex::new(r"(?i)^part\s+").context("failed to compile part regex")?,
            chapter_pattern: Regex::new(r"(?i)^chapter\s+\d+")
                .context("failed to compile chapter regex")?,
        })
    }

    pub fn classify(&self, entry: &OutlineEntry) -> EntryKind {
        let title = entry.title.trim();

        if entry.level == 1 && self.part_pattern.is_match(title) {
            EntryKind::Part
        } else if entry.level == 2 && self.chapter_pattern.is_match(title) {
            EntryKind::Chapter
        } else {
            EntryKind::Other
        }
    }
}

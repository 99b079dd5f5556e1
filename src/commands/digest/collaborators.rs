use super::*;

/// Per-page knowledge extraction. An empty list means the page carried
/// nothing usable.
pub trait FragmentExtractor {
    fn extract(&mut self, page_index: usize) -> Result<Vec<String>>;
}

/// Turns an export unit's fragments into markdown. Empty output is treated as
/// "nothing to write".
pub trait Summarizer {
    fn summarize(&mut self, title: &str, fragments: &[String]) -> Result<String>;
}

/// Extraction replies recorded ahead of time in the book input file.
#[derive(Debug, Default)]
pub struct RecordedPages {
    pages: HashMap<usize, Vec<String>>,
}

impl RecordedPages {
    pub fn new(records: &[PageRecord]) -> Self {
        let mut pages: HashMap<usize, Vec<String>> = HashMap::new();

        for record in records {
            if record.page == 0 {
                warn!("ignoring page record with page number 0; pages are 1-based");
                continue;
            }
            if !record.has_content {
                continue;
            }

            let knowledge = record
                .knowledge
                .iter()
                .map(|point| point.trim())
                .filter(|point| !point.is_empty())
                .map(ToOwned::to_owned);
            pages
                .entry(record.page as usize - 1)
                .or_default()
                .extend(knowledge);
        }

        Self { pages }
    }
}

impl FragmentExtractor for RecordedPages {
    fn extract(&mut self, page_index: usize) -> Result<Vec<String>> {
        Ok(self.pages.get(&page_index).cloned().unwrap_or_default())
    }
}

/// Local summarizer that lays the knowledge points out as a markdown digest.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyPointSummarizer;

impl Summarizer for KeyPointSummarizer {
    fn summarize(&mut self, title: &str, fragments: &[String]) -> Result<String> {
        let points: Vec<&str> = fragments
            .iter()
            .map(|fragment| fragment.trim())
            .filter(|fragment| !fragment.is_empty())
            .collect();
        if points.is_empty() {
            return Ok(String::new());
        }

        debug!(title, points = points.len(), "rendering key-point digest");

        let mut out = String::from("## Key points\n\n");
        for point in &points {
            out.push_str("- ");
            out.push_str(point);
            out.push('\n');
        }
        out.push_str(&format!(
            "\n_{} knowledge points collected for {}._\n",
            points.len(),
            title
        ));

        Ok(out)
    }
}

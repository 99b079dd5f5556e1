use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::OutlineArgs;
use crate::commands::digest::{
    OutlineClassifier, build_document_tree, default_knowledge_base_path, knowledge_base_from_tree,
};
use crate::model::BookInput;
use crate::util::{read_json, write_json_pretty};

pub fn run(args: OutlineArgs) -> Result<()> {
    let input: BookInput = read_json(&args.input)?;

    info!(
        input = %args.input.display(),
        total_pages = input.total_pages,
        entries = input.outline.len(),
        "structuring outline"
    );

    let classifier = OutlineClassifier::new()?;
    let tree = build_document_tree(&input.outline, &classifier, input.total_pages)
        .with_context(|| format!("failed to structure {}", args.input.display()))?;
    tree.log_structure();

    if !tree.warnings().is_empty() {
        warn!(
            warnings = tree.warnings().len(),
            "outline structured with warnings"
        );
    }

    let skeleton = knowledge_base_from_tree(&tree);

    if args.dry_run {
        info!(parts = skeleton.len(), "outline dry-run complete");
        return Ok(());
    }

    let path = args
        .knowledge_base_path
        .unwrap_or_else(|| default_knowledge_base_path(&args.work_root, &args.input));
    write_json_pretty(&path, &skeleton)?;
    info!(path = %path.display(), parts = skeleton.len(), "wrote knowledge base skeleton");

    Ok(())
}

use super::*;

pub fn run(args: DigestArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let work_root = args.work_root.clone();
    let manifest_dir = work_root.join("manifests");
    ensure_directory(&manifest_dir)?;

    let knowledge_base_path = args
        .knowledge_base_path
        .clone()
        .unwrap_or_else(|| default_knowledge_base_path(&work_root, &args.input));
    let summaries_dir = args
        .summaries_dir
        .clone()
        .unwrap_or_else(|| work_root.join("summaries"));
    let manifest_path = args.manifest_path.clone().unwrap_or_else(|| {
        manifest_dir.join(format!("digest_run_{}.json", utc_compact_string(started_ts)))
    });

    info!(work_root = %work_root.display(), run_id = %run_id, "starting digest");

    if args.clean {
        let removed = remove_files_with_extension(&summaries_dir, "md")?;
        if knowledge_base_path.exists() {
            fs::remove_file(&knowledge_base_path).with_context(|| {
                format!("failed to remove {}", knowledge_base_path.display())
            })?;
        }
        info!(
            summaries_dir = %summaries_dir.display(),
            summaries_removed = removed,
            "cleared previous output"
        );
    }

    let input: BookInput = read_json(&args.input)?;
    let input_sha256 = sha256_file(&args.input)?;

    let classifier = OutlineClassifier::new()?;
    let mut tree = build_document_tree(&input.outline, &classifier, input.total_pages)
        .with_context(|| format!("failed to structure {}", args.input.display()))?;
    tree.log_structure();

    let mut extractor = RecordedPages::new(&input.pages);
    let routing = route_pages(&mut tree, &mut extractor, args.max_pages);

    let knowledge_base = knowledge_base_from_tree(&tree);
    write_json_pretty(&knowledge_base_path, &knowledge_base)?;
    info!(path = %knowledge_base_path.display(), "wrote knowledge base");

    let units = plan_export(&tree);
    let generated_at = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let mut summarizer = KeyPointSummarizer;
    let report = emit_units(&units, &mut summarizer, &summaries_dir, &generated_at)?;

    let warnings: Vec<String> = tree
        .warnings()
        .iter()
        .chain(report.warnings.iter())
        .map(ToString::to_string)
        .collect();

    let manifest = DigestRunManifest {
        manifest_version: 1,
        run_id: run_id.clone(),
        status: "completed".to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_digest_command(&args),
        input_sha256,
        paths: DigestPaths {
            work_root: work_root.display().to_string(),
            input_path: args.input.display().to_string(),
            knowledge_base_path: knowledge_base_path.display().to_string(),
            summaries_dir: summaries_dir.display().to_string(),
        },
        counts: DigestCounts {
            total_pages: tree.total_pages(),
            pages_requested: routing.pages_requested,
            pages_routed: routing.pages_routed,
            pages_without_content: routing.pages_without_content,
            pages_dropped: routing.pages_dropped,
            fragments_routed: routing.fragments_routed,
            fragments_dropped: routing.fragments_dropped,
            part_nodes: tree.count_kind(NodeKind::Part),
            chapter_nodes: tree.count_kind(NodeKind::Chapter),
            section_nodes: tree.count_kind(NodeKind::Section),
            loose_section_nodes: tree.loose_section_count(),
            export_units_planned: units.len(),
            export_units_written: report.written.len(),
            export_units_skipped: report.warnings.len(),
        },
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote digest run manifest");
    info!(
        run_id = %run_id,
        fragments = routing.fragments_routed,
        summaries = report.written.len(),
        warnings = manifest.warnings.len(),
        "digest completed"
    );

    Ok(())
}

pub fn default_knowledge_base_path(work_root: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("book");
    work_root
        .join("knowledge_bases")
        .join(format!("{stem}_knowledge.json"))
}

pub(super) fn render_digest_command(args: &DigestArgs) -> String {
    let mut command = vec![
        "bookdigest".to_string(),
        "digest".to_string(),
        "--work-root".to_string(),
        args.work_root.display().to_string(),
        "--input".to_string(),
        args.input.display().to_string(),
    ];

    if let Some(path) = &args.knowledge_base_path {
        command.push("--knowledge-base-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.summaries_dir {
        command.push("--summaries-dir".to_string());
        command.push(path.display().to_string());
    }
    if let Some(path) = &args.manifest_path {
        command.push("--manifest-path".to_string());
        command.push(path.display().to_string());
    }
    if let Some(max_pages) = args.max_pages {
        command.push("--max-pages".to_string());
        command.push(max_pages.to_string());
    }
    if args.clean {
        command.push("--clean".to_string());
    }

    command.join(" ")
}

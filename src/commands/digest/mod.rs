use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::cli::DigestArgs;
use crate::model::{
    BookInput, ChapterRecord, DigestCounts, DigestPaths, DigestRunManifest, KnowledgeBase,
    OutlineEntry, PageRecord, PartRecord, SectionRecord,
};
use crate::util::{
    ensure_directory, now_utc_string, read_json, remove_files_with_extension, sha256_file,
    utc_compact_string, write_json_pretty, write_text,
};

mod aggregate;
mod classify;
mod collaborators;
mod emit;
mod knowledge_base;
mod ranges;
mod route;
mod run;
mod tree;
mod tree_build;

pub use classify::OutlineClassifier;
pub use knowledge_base::knowledge_base_from_tree;
pub use run::{default_knowledge_base_path, run};
pub use tree_build::build_document_tree;

use aggregate::*;
use classify::*;
use collaborators::*;
use emit::*;
use ranges::*;
use route::*;
use run::*;
use tree::*;
use tree_build::*;

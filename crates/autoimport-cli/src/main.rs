//! `autoimport imports check` — scan one file or a directory tree of Java
//! sources for unresolved identifiers, extending orphan classes against the
//! project's siblings and dependency classpath before reporting what's left.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autoimport_classpath::ClasspathIndex;
use autoimport_core::collect_java_files;
use autoimport_hir::{lower_item_tree, AstIdMap};
use autoimport_resolve::{ClassExtender, ClassHierarchy, NeverCancelled};
use autoimport_syntax::{AstNode, CompilationUnit, SyntaxNode};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, instrument, warn};

#[derive(Parser)]
#[command(name = "autoimport")]
#[command(about = "Unresolved-identifier scanning for a Java-like language")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Operations on a source tree's import/identifier state.
    Imports {
        #[command(subcommand)]
        action: ImportsCommand,
    },
}

#[derive(Subcommand)]
enum ImportsCommand {
    /// Scan a file, or every `.java` file under a directory, and report
    /// identifiers that don't resolve against anything in scope.
    Check {
        /// A `.java` file or a directory to walk.
        path: PathBuf,

        /// Directory of `.jar` dependency artifacts to extend orphans against.
        #[arg(long, value_name = "DIR")]
        dependency_dir: Option<PathBuf>,

        /// JDK (or other) bootclasspath directory of unpacked `.class` files.
        #[arg(long, value_name = "DIR")]
        bootclasspath: Option<PathBuf>,

        /// Emit machine-readable JSON instead of plain text.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Serialize)]
struct OrphanReport {
    class: String,
    superclass: Option<String>,
    unresolved: Vec<String>,
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    unresolved: Vec<String>,
    orphans: Vec<OrphanReport>,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Imports {
            action: ImportsCommand::Check { path, dependency_dir, bootclasspath, json },
        } => check(&path, dependency_dir.as_deref(), bootclasspath.as_deref(), json),
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

fn check(path: &Path, dependency_dir: Option<&Path>, bootclasspath: Option<&Path>, json: bool) -> Result<()> {
    let files = if path.is_dir() {
        collect_java_files(path).with_context(|| format!("walking {}", path.display()))?
    } else {
        vec![path.to_path_buf()]
    };

    if files.is_empty() {
        warn!(path = %path.display(), "no .java files found");
        return Ok(());
    }

    let classpath = build_classpath_index(path, dependency_dir, bootclasspath)?;

    let mut reports = Vec::with_capacity(files.len());
    let mut any_unresolved = false;
    for file in &files {
        let report = check_file(file, classpath.as_ref())?;
        if !report.unresolved.is_empty() || !report.orphans.is_empty() {
            any_unresolved = true;
        }
        reports.push(report);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print_report(report);
        }
    }

    if any_unresolved {
        std::process::exit(1);
    }
    Ok(())
}

fn build_classpath_index(
    anchor: &Path,
    dependency_dir: Option<&Path>,
    bootclasspath: Option<&Path>,
) -> Result<Option<ClasspathIndex>> {
    let entries = autoimport_project::dependency_artifacts(anchor, dependency_dir, bootclasspath)
        .context("resolving dependency artifacts")?;
    if entries.is_empty() {
        return Ok(None);
    }
    info!(count = entries.len(), "indexing classpath entries");
    let index = ClasspathIndex::build(&entries).context("building classpath index")?;
    Ok(Some(index))
}

#[instrument(skip(classpath), fields(file = %file.display()))]
fn check_file(file: &Path, classpath: Option<&ClasspathIndex>) -> Result<FileReport> {
    let text = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;

    let scan_result = autoimport_resolve::scan(&text, &NeverCancelled)
        .with_context(|| format!("scanning {}", file.display()))?;

    let mut hierarchy = ClassHierarchy::new(classpath.cloned());
    for cu in own_and_sibling_units(file, &text)? {
        hierarchy.add_item_tree(&item_tree_of(&cu));
    }

    let mut extender = ClassExtender::new();
    let orphans = scan_result
        .orphans
        .into_iter()
        .map(|mut orphan| {
            // `extend` walks the whole reachable chain in one call; a single
            // call always leaves `fully_extended` true.
            extender.extend(&mut orphan, &hierarchy);
            OrphanReport {
                class: orphan.name.to_string(),
                superclass: orphan.superclass.as_ref().map(ToString::to_string),
                unresolved: orphan.unresolved.iter().map(ToString::to_string).collect(),
            }
        })
        .collect();

    Ok(FileReport {
        path: file.display().to_string(),
        unresolved: scan_result.unresolved.iter().map(ToString::to_string).collect(),
        orphans,
    })
}

fn own_and_sibling_units(file: &Path, own_text: &str) -> Result<Vec<CompilationUnit>> {
    let mut units = autoimport_project::siblings(file).with_context(|| format!("reading siblings of {}", file.display()))?;
    let parse = autoimport_syntax::parse_java(own_text);
    let root = SyntaxNode::new_root(parse.green_node);
    if let Some(cu) = CompilationUnit::cast(root) {
        units.push(cu);
    }
    Ok(units)
}

fn item_tree_of(cu: &CompilationUnit) -> autoimport_hir::ItemTree {
    let ast_id_map = AstIdMap::new(cu.syntax());
    lower_item_tree(cu, &ast_id_map)
}

fn print_report(report: &FileReport) {
    println!("{}", report.path);
    if report.unresolved.is_empty() && report.orphans.is_empty() {
        println!("  (clean)");
        return;
    }
    for name in &report.unresolved {
        println!("  unresolved: {name}");
    }
    for orphan in &report.orphans {
        if orphan.unresolved.is_empty() {
            continue;
        }
        let via = orphan
            .superclass
            .as_deref()
            .map(|s| format!(" (extends {s}, chain exhausted)"))
            .unwrap_or_default();
        for name in &orphan.unresolved {
            println!("  unresolved: {name} [in {}{via}]", orphan.class);
        }
    }
}

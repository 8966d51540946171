//! # Diff Subcommand
//!
//! Structural diff of two JSON files with the same engine the API uses for
//! update and save previews. Exit code follows `diff(1)`: 0 when equal,
//! 1 when different.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use ogw_core::{diff_texts, ChangeKind, DiffResult};

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Original file.
    pub old: PathBuf,

    /// Changed file.
    pub new: PathBuf,

    /// Print only the added/changed/removed counts.
    #[arg(long)]
    pub summary: bool,

    /// Print the full diff result as JSON.
    #[arg(long, conflicts_with = "summary")]
    pub json: bool,
}

pub fn run_diff(args: &DiffArgs) -> Result<u8> {
    let diff = diff_files(&args.old, &args.new)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        if !args.summary {
            for line in render(&diff) {
                println!("{line}");
            }
        }
        let s = &diff.summary;
        println!("{} added, {} changed, {} removed", s.added, s.changed, s.removed);
    }
    Ok(u8::from(!diff.is_empty()))
}

pub fn diff_files(old: &Path, new: &Path) -> Result<DiffResult> {
    let old_text =
        std::fs::read_to_string(old).with_context(|| format!("failed to read {}", old.display()))?;
    let new_text =
        std::fs::read_to_string(new).with_context(|| format!("failed to read {}", new.display()))?;
    diff_texts(&old_text, &new_text)
        .with_context(|| format!("{} or {} is not valid JSON", old.display(), new.display()))
}

/// One line per change: `+ path new`, `~ path old -> new`, `- path old`.
fn render(diff: &DiffResult) -> Vec<String> {
    let show = |v: &Option<serde_json::Value>| {
        v.as_ref().map(ToString::to_string).unwrap_or_default()
    };
    diff.details
        .iter()
        .map(|change| match change.change {
            ChangeKind::Added => format!("+ {} {}", change.path, show(&change.new)),
            ChangeKind::Changed => format!(
                "~ {} {} -> {}",
                change.path,
                show(&change.old),
                show(&change.new)
            ),
            ChangeKind::Removed => format!("- {} {}", change.path, show(&change.old)),
        })
        .collect()
}

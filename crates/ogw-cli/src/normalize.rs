//! # Normalize Subcommand
//!
//! Rewrites a catalog in the layout every API write produces (2-space
//! indentation, trailing newline, key order preserved), so later diffs of
//! the file only show content changes.

use anyhow::{Context, Result};
use clap::Args;
use ogw_core::{parse_document, to_document_text};
use ogw_store::{DocumentStore, StoreConfig, StoreError};

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Logical catalog name, e.g. `sdm_privacy_catalog`.
    pub name: String,

    /// Only report whether the file is normalized; exit 1 if it is not.
    #[arg(long)]
    pub check: bool,
}

pub fn run_normalize(args: &NormalizeArgs, config: &StoreConfig) -> Result<u8> {
    let store = DocumentStore::new(config.clone());
    if args.check {
        let normalized = is_normalized(&store, &args.name)?;
        println!(
            "{} {}",
            args.name,
            if normalized { "is normalized" } else { "needs normalizing" }
        );
        return Ok(u8::from(!normalized));
    }
    let written = normalize(&store, &args.name)?;
    println!(
        "{} {}",
        args.name,
        if written { "rewritten" } else { "already normalized" }
    );
    Ok(0)
}

/// Whether the stored text equals its canonical serialization.
pub fn is_normalized(store: &DocumentStore, name: &str) -> Result<bool> {
    let text = store.read(name)?;
    let doc = parse_document(&text).with_context(|| format!("{name} is not valid JSON"))?;
    Ok(to_document_text(&doc)? == text)
}

/// Rewrite the catalog canonically. Returns whether the file changed.
pub fn normalize(store: &DocumentStore, name: &str) -> Result<bool> {
    let committed = store.transact(name, None, |_| Ok::<_, StoreError>(()))?;
    if !committed.diff.is_empty() {
        anyhow::bail!("normalizing {name} changed its content");
    }
    tracing::info!(catalog = name, written = committed.written, "catalog normalized");
    Ok(committed.written)
}

//! # Catalog Subcommands
//!
//! `catalogs`, `controls` and `show`: read-only views over the configured
//! catalog files through the same services the API uses.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use ogw_catalog::{
    CatalogService, CatalogVariant, PrivacyControls, ResilienceControls, SdmControls,
    SdmTomControls,
};
use ogw_store::{DocumentStore, StoreConfig};
use serde::Serialize;
use serde_json::Value;

/// Which projection of which catalog to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// SDM controls with related mappings.
    Sdm,
    /// SDM technical and organisational measures.
    SdmCatalog,
    /// Resilience baseline controls.
    Resilience,
    /// Privacy risk catalog controls.
    Privacy,
}

#[derive(Args, Debug)]
pub struct ControlsArgs {
    #[arg(value_enum)]
    pub variant: Variant,

    /// Print the `{"items": [...]}` JSON instead of one line per control.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    #[arg(value_enum)]
    pub variant: Variant,

    /// Control id.
    pub id: String,
}

/// List configured logical names. Returns exit code 1 if any file is missing.
pub fn run_catalogs(config: &StoreConfig) -> Result<u8> {
    let mut missing = 0;
    for (name, path) in config.entries() {
        let state = if path.is_file() {
            "ok"
        } else {
            missing += 1;
            "missing"
        };
        println!("{name:<32} {state:<8} {}", path.display());
    }
    Ok(u8::from(missing > 0))
}

pub fn run_controls(args: &ControlsArgs, config: &StoreConfig) -> Result<u8> {
    let items = list_controls(args.variant, DocumentStore::new(config.clone()))?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "items": items }))?);
    } else {
        for item in &items {
            println!("{}", summary_line(item));
        }
    }
    Ok(0)
}

/// Print one control. Returns exit code 1 if it does not exist.
pub fn run_show(args: &ShowArgs, config: &StoreConfig) -> Result<u8> {
    match show_control(args.variant, DocumentStore::new(config.clone()), &args.id)? {
        Some(detail) => {
            println!("{}", serde_json::to_string_pretty(&detail)?);
            Ok(0)
        }
        None => {
            eprintln!("control {} not found", args.id);
            Ok(1)
        }
    }
}

/// Summaries of one variant as JSON values, in listing order.
pub fn list_controls(variant: Variant, store: DocumentStore) -> Result<Vec<Value>> {
    match variant {
        Variant::Sdm => summaries::<SdmControls>(store),
        Variant::SdmCatalog => summaries::<SdmTomControls>(store),
        Variant::Resilience => summaries::<ResilienceControls>(store),
        Variant::Privacy => summaries::<PrivacyControls>(store),
    }
}

/// Detail of one control as a JSON value.
pub fn show_control(variant: Variant, store: DocumentStore, id: &str) -> Result<Option<Value>> {
    match variant {
        Variant::Sdm => detail::<SdmControls>(store, id),
        Variant::SdmCatalog => detail::<SdmTomControls>(store, id),
        Variant::Resilience => detail::<ResilienceControls>(store, id),
        Variant::Privacy => detail::<PrivacyControls>(store, id),
    }
}

fn summaries<V>(store: DocumentStore) -> Result<Vec<Value>>
where
    V: CatalogVariant,
    V::Summary: Serialize,
{
    let loaded = CatalogService::<V>::new(store)
        .list_controls()
        .with_context(|| format!("failed to list {}", V::CATALOG))?;
    loaded
        .value
        .iter()
        .map(|s| serde_json::to_value(s).map_err(Into::into))
        .collect()
}

fn detail<V>(store: DocumentStore, id: &str) -> Result<Option<Value>>
where
    V: CatalogVariant,
    V::Detail: Serialize,
{
    let loaded = CatalogService::<V>::new(store)
        .get_control(id)
        .with_context(|| format!("failed to read {}", V::CATALOG))?;
    loaded
        .map(|l| serde_json::to_value(&l.value))
        .transpose()
        .map_err(Into::into)
}

fn summary_line(item: &Value) -> String {
    let id = item.get("id").and_then(Value::as_str).unwrap_or_default();
    let title = item.get("title").and_then(Value::as_str).unwrap_or_default();
    format!("{id:<24} {title}")
}

use anyhow::Context;
use chrono::{DateTime, Utc};
use file_signature::{Catalogue, FileInfo};
use tracing::debug;

use crate::cli::{GlobalArgs, InspectArgs};
use crate::config::{AppConfig, clamp_hex_bytes};
use crate::render::{RenderOptions, render_inspection};

pub async fn execute(global: GlobalArgs, args: InspectArgs) -> anyhow::Result<()> {
    let cfg = AppConfig::load_or_default(global.config.as_deref())?;

    let buffer = tokio::fs::read(&args.path)
        .await
        .with_context(|| format!("Failed to read {}", args.path.display()))?;
    let meta = tokio::fs::metadata(&args.path).await?;

    let file_name = args
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.path.display().to_string());
    let mut info = FileInfo::new(file_name, meta.len());
    if let Ok(modified) = meta.modified() {
        info = info.with_last_modified(DateTime::<Utc>::from(modified));
    }

    let catalogue = Catalogue::builtin().context("Invalid built-in signature")?;
    let inspection = catalogue.inspect(&buffer, &info);
    debug!(
        file = %info.file_name,
        format = inspection.format_name().unwrap_or("unknown"),
        alternatives = inspection.alternatives.len(),
        "inspected"
    );

    if args.json || cfg.json {
        println!("{}", serde_json::to_string_pretty(&inspection)?);
    } else {
        let opts = RenderOptions {
            hex_bytes: clamp_hex_bytes(args.bytes.unwrap_or(cfg.hex_bytes)),
            show_alternatives: cfg.show_alternatives,
        };
        print!("{}", render_inspection(&inspection, &buffer, opts));
    }
    Ok(())
}

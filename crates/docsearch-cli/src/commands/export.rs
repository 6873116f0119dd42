//! Re-serialize the loaded index

use anyhow::{Context, Result};
use docsearch_core::{DocIndex, to_js, to_json};
use std::path::Path;
use tracing::info;

pub fn execute(index: &DocIndex, js: bool, compact: bool, output: Option<&Path>) -> Result<()> {
    let mut content = if js {
        to_js(index)?
    } else {
        to_json(index, !compact)?
    };
    if !content.ends_with('\n') {
        content.push('\n');
    }

    match output {
        Some(path) => {
            std::fs::write(path, &content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} entries to {}", index.len(), path.display());
        },
        None => print!("{content}"),
    }
    Ok(())
}

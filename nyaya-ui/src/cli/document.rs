//! document command

use anyhow::{Context as _, Result};
use nyaya_common::models::{DocType, Language};
use std::path::PathBuf;

use super::Context;
use crate::forms::{parse_detail_pairs, DocumentForm};
use crate::ClientError;

pub async fn generate(
    ctx: &Context,
    doc_type: DocType,
    language: Language,
    fields: &[String],
    out: Option<PathBuf>,
) -> Result<()> {
    let form = DocumentForm {
        doc_type,
        language,
        details: parse_detail_pairs(fields).map_err(ClientError::from)?,
    };
    let request = form.validate().map_err(|errors| {
        let required = DocumentForm::required_fields(doc_type).join(", ");
        anyhow::Error::new(ClientError::from(errors))
            .context(format!("{} requires: {}", doc_type, required))
    })?;

    let document = ctx.client.generate_document(&request).await?;

    match out {
        Some(path) => {
            tokio::fs::write(&path, &document.content)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{}",
                ctx.renderer.success(&format!(
                    "{} draft saved to {} (id {})",
                    document.doc_type,
                    path.display(),
                    document.id
                ))
            );
        }
        None => print!("{}", ctx.renderer.document(&document)),
    }
    Ok(())
}

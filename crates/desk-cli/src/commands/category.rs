use std::path::Path;

use anyhow::Context;
use desk_core::entities::Category;
use desk_core::taxonomy::Taxonomy;
use desk_db::integrity::ScanReport;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CategoryCommands;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LoadResponse {
    path: String,
    categories: Vec<Category>,
    scan: ScanReport,
}

/// Handle `desk category`.
pub async fn handle(
    action: &CategoryCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CategoryCommands::List => {
            let categories = ctx.service.queries().categories_for_selection().await?;
            output(&categories, flags.format)
        }
        CategoryCommands::Load { path } => {
            let path = path.as_deref().unwrap_or(&ctx.config.taxonomy.path);
            let taxonomy = Taxonomy::load(Path::new(path))?;
            let (categories, scan) = ctx
                .service
                .reload_taxonomy(&taxonomy)
                .await
                .with_context(|| format!("failed to reload taxonomy from {path}"))?;
            output(
                &LoadResponse {
                    path: path.to_string(),
                    categories,
                    scan,
                },
                flags.format,
            )
        }
    }
}

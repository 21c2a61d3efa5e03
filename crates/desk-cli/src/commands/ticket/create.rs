use anyhow::bail;
use desk_core::entities::{Category, Ticket};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    category_name: &str,
    issue_type: &str,
    description: &str,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let Some(category) = ctx.service.catalog().find_by_name(category_name).await? else {
        bail!("category '{category_name}' not found");
    };
    let ticket = create_in_category(ctx, &category, issue_type, description).await?;
    let labeled = ctx.service.queries().label_ticket(ticket).await?;
    output(&labeled, flags.format)
}

/// Create a ticket under `category`, checking the issue type first when
/// `general.strict_issue_types` is on.
pub async fn create_in_category(
    ctx: &AppContext,
    category: &Category,
    issue_type: &str,
    description: &str,
) -> anyhow::Result<Ticket> {
    if ctx.config.general.strict_issue_types {
        ctx.service
            .queries()
            .check_selection(&category.id, issue_type)
            .await?;
    } else if !category.allows(issue_type) {
        tracing::debug!(
            category = %category.name,
            issue_type,
            "issue type not listed for category"
        );
    }

    let ticket = ctx
        .service
        .tickets()
        .create(&category.id, issue_type, description)
        .await?;
    Ok(ticket)
}

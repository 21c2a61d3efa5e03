use desk_core::enums::EntityType;
use desk_db::error::DatabaseError;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ticket = ctx
        .service
        .tickets()
        .find_by_id(id)
        .await?
        .ok_or_else(|| DatabaseError::not_found(EntityType::Ticket, id))?;
    let labeled = ctx.service.queries().label_ticket(ticket).await?;
    output(&labeled, flags.format)
}

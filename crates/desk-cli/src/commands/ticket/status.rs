use desk_core::enums::TicketStatus;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, status: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let status = parse_enum::<TicketStatus>(status, "status")?;
    let ticket = ctx.service.tickets().update_status(id, status).await?;
    let labeled = ctx.service.queries().label_ticket(ticket).await?;
    output(&labeled, flags.format)
}

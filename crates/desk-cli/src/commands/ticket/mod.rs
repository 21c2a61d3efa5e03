mod create;
mod delete;
mod get;
mod list;
mod status;

pub use create::create_in_category;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TicketCommands;
use crate::context::AppContext;

/// Handle `desk ticket`.
pub async fn handle(
    action: &TicketCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        TicketCommands::Create {
            category,
            issue_type,
            description,
        } => create::run(category, issue_type, description, ctx, flags).await,
        TicketCommands::List { status, category } => {
            list::run(status.as_deref(), category.as_deref(), ctx, flags).await
        }
        TicketCommands::Get { id } => get::run(id, ctx, flags).await,
        TicketCommands::Status { id, status } => status::run(id, status, ctx, flags).await,
        TicketCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}

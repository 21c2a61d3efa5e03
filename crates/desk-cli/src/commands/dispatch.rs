use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Menu => commands::menu::handle(ctx).await,
        Commands::Ticket { action } => commands::ticket::handle(&action, ctx, flags).await,
        Commands::Category { action } => commands::category::handle(&action, ctx, flags).await,
        Commands::Scan => commands::scan::handle(ctx, flags).await,
        Commands::Schema(_) => unreachable!("schema is pre-dispatched in main"),
    }
}

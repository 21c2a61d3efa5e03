use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `desk scan`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let report = ctx.service.scanner().scan().await?;
    output(&report, flags.format)
}

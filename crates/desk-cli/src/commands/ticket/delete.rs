use desk_core::responses::DeleteResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let deleted = ctx.service.tickets().delete(id).await?;
    output(
        &DeleteResponse {
            id: id.to_string(),
            deleted,
        },
        flags.format,
    )
}

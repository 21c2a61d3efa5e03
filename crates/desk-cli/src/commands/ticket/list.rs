use desk_core::enums::TicketStatus;
use desk_core::responses::LabeledTicket;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    status: Option<&str>,
    category: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let queries = ctx.service.queries();

    let tickets: Vec<LabeledTicket> = match (status, category) {
        (Some(status), _) => {
            let status = parse_enum::<TicketStatus>(status, "status")?;
            queries.list_tickets_by_status(status).await?
        }
        (None, Some(name)) => queries
            .list_tickets_by_category_name(name)
            .await?
            .into_iter()
            .map(|ticket| LabeledTicket {
                ticket,
                category: name.to_string(),
            })
            .collect(),
        (None, None) => queries.list_tickets_with_category().await?,
    };

    output(&tickets, flags.format)
}

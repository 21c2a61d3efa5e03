use desk_core::entities::{Category, Ticket};
use desk_core::responses::LabeledTicket;
use desk_core::trail::TrailOperation;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::{SchemaArgs, SchemaType};
use crate::output::output;

/// Handle `desk schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name {
        SchemaType::Category => schema_for!(Category),
        SchemaType::Ticket => schema_for!(Ticket),
        SchemaType::LabeledTicket => schema_for!(LabeledTicket),
        SchemaType::TrailOperation => schema_for!(TrailOperation),
    };
    output(&schema, flags.format)
}

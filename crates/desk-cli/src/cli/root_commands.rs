use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{CategoryCommands, TicketCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Interactive numbered menu.
    Menu,
    /// Tickets.
    Ticket {
        #[command(subcommand)]
        action: TicketCommands,
    },
    /// Category taxonomy.
    Category {
        #[command(subcommand)]
        action: CategoryCommands,
    },
    /// Delete tickets whose category no longer exists.
    Scan,
    /// Print the JSON Schema of a stored or emitted type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}

/// Types `desk schema` can describe.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    Category,
    Ticket,
    LabeledTicket,
    TrailOperation,
}

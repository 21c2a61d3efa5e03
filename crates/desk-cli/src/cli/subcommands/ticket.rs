use clap::Subcommand;

/// Ticket commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TicketCommands {
    /// Create a ticket under a category.
    Create {
        /// Category name.
        #[arg(long)]
        category: String,
        #[arg(long)]
        issue_type: String,
        #[arg(long)]
        description: String,
    },
    /// List tickets with their category names.
    List {
        #[arg(long)]
        status: Option<String>,
        /// Category name.
        #[arg(long, conflicts_with = "status")]
        category: Option<String>,
    },
    /// Get a ticket by ID.
    Get { id: String },
    /// Set a ticket's status.
    Status { id: String, status: String },
    /// Delete a ticket.
    Delete { id: String },
}

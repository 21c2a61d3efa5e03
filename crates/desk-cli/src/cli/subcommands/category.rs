use clap::Subcommand;

/// Category taxonomy commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CategoryCommands {
    /// List categories in menu order.
    List,
    /// Replace the taxonomy from a file, then repair orphaned tickets.
    Load {
        /// Taxonomy file (defaults to `taxonomy.path`).
        path: Option<String>,
    },
}

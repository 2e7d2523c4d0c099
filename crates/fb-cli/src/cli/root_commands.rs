use clap::{Args, Subcommand};

/// Root command set for `fb`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP API server
    Serve(ServeArgs),
    /// Create a feedback item (starts in "open")
    Create(CreateArgs),
    /// List feedback items with filters, search, sort, and paging
    List(ListArgs),
    /// Show one feedback item
    Get {
        /// Feedback ID
        id: String,
    },
    /// Move a feedback item to a new status
    Status {
        /// Feedback ID
        id: String,
        /// Target status (open, in-progress, done)
        status: String,
    },
    /// Apply several status changes; each entry succeeds or fails on its own
    BulkStatus {
        /// Updates as ID=STATUS pairs
        #[arg(required = true, value_name = "ID=STATUS")]
        updates: Vec<String>,
    },
    /// Delete a feedback item
    Delete {
        /// Feedback ID
        id: String,
    },
    /// Show item counts per status
    Stats,
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Bind host (overrides server.host)
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port (overrides server.port)
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Clone, Debug, Args)]
pub struct CreateArgs {
    /// Short summary, at most 100 characters
    #[arg(long)]
    pub title: String,

    /// Details, at most 500 characters
    #[arg(long)]
    pub description: String,
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Only items with this status
    #[arg(long)]
    pub status: Option<String>,

    /// Case-insensitive text matched against title or description
    #[arg(long)]
    pub search: Option<String>,

    /// Page number, starting at 1
    #[arg(long)]
    pub page: Option<u32>,

    /// Items per page
    #[arg(long)]
    pub limit: Option<u32>,

    /// Sort field: createdAt, updatedAt, title
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort order: asc, desc
    #[arg(long)]
    pub sort_order: Option<String>,
}

//! CLI parse: clap types for linear. No behavior; definitions only.

use crate::config::{API_KEY_ENV, CONFIG_PATH_ENV};
use crate::render::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Initiative statuses accepted by Linear.
pub const INITIATIVE_STATUSES: [&str; 3] = ["Planned", "Active", "Completed"];

/// Linear CLI - issues, documents and initiatives from the terminal
#[derive(Parser, Debug)]
#[command(name = "linear", version)]
#[command(about = "Work with Linear from the command line. Output is a JSON envelope by default.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (json, table, plain)
    #[arg(short = 'F', long, global = true, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Configuration file path (overrides the default location)
    #[arg(long, global = true, env = CONFIG_PATH_ENV)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the stored API key
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show the authenticated user
    #[command(visible_alias = "whoami")]
    Me,
    /// Issue commands (list, get, create, update, delete)
    Issues {
        #[command(subcommand)]
        command: IssuesCommands,
    },
    /// Issue comment commands (list, add)
    Comments {
        #[command(subcommand)]
        command: CommentsCommands,
    },
    /// Document commands (list, get, create, update, delete)
    Documents {
        #[command(subcommand)]
        command: DocumentsCommands,
    },
    /// Initiative commands (list, get, create, update, delete)
    Initiatives {
        #[command(subcommand)]
        command: InitiativesCommands,
    },
    /// Project commands
    Projects {
        #[command(subcommand)]
        command: ProjectsCommands,
    },
    /// User commands
    Users {
        #[command(subcommand)]
        command: UsersCommands,
    },
    /// Issue label commands
    Labels {
        #[command(subcommand)]
        command: LabelsCommands,
    },
    /// Workflow state commands
    States {
        #[command(subcommand)]
        command: StatesCommands,
    },
    /// Full-text issue search
    Search(SearchArgs),
    /// Describe entities, their fields and operations
    Schema {
        /// Entity name (issues, comments, documents, ...)
        entity: Option<String>,
        /// Show the schema of every entity
        #[arg(long)]
        full: bool,
        /// Include usage examples
        #[arg(long)]
        include_examples: bool,
    },
}

/// Cursor pagination shared by list commands.
#[derive(Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Number of results to fetch
    #[arg(long)]
    pub first: Option<u32>,
    /// Cursor to continue after (from pageInfo.endCursor)
    #[arg(long)]
    pub after: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Validate and store an API key
    Login {
        /// API key (lin_api_...)
        key: Option<String>,
        /// API key, as a flag
        #[arg(long = "key", env = API_KEY_ENV, hide_env_values = true)]
        key_flag: Option<String>,
    },
    /// Remove the stored API key
    Logout,
    /// Show authentication status
    Status,
}

#[derive(Subcommand, Debug)]
pub enum IssuesCommands {
    /// List issues
    List(IssueListArgs),
    /// Show one issue
    Get {
        /// Issue id or identifier (ENG-123)
        reference: String,
    },
    /// Create an issue
    Create(IssueCreateArgs),
    /// Update an issue
    Update(IssueUpdateArgs),
    /// Archive an issue, or delete it permanently
    Delete {
        /// Issue id or identifier (ENG-123)
        reference: String,
        /// Delete permanently instead of moving to trash
        #[arg(long)]
        permanent: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct IssueListArgs {
    /// Team key (ENG)
    #[arg(long)]
    pub team: Option<String>,
    /// Assignee user id, or "me"
    #[arg(long)]
    pub assignee: Option<String>,
    /// Workflow state name
    #[arg(long)]
    pub state: Option<String>,
    /// Raw IssueFilter as JSON
    #[arg(long)]
    pub filter: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Args, Debug, Clone, Default)]
pub struct IssueCreateArgs {
    /// Issue input as JSON (replaces the field flags)
    #[arg(long, conflicts_with_all = ["title", "team_id", "description", "priority", "assignee_id", "state_id", "project_id", "estimate", "label_ids"])]
    pub input: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    /// Team id (defaults to default_team_id from config)
    #[arg(long)]
    pub team_id: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Priority (0 none, 1 urgent, 2 high, 3 medium, 4 low)
    #[arg(long)]
    pub priority: Option<i64>,
    #[arg(long)]
    pub assignee_id: Option<String>,
    #[arg(long)]
    pub state_id: Option<String>,
    #[arg(long)]
    pub project_id: Option<String>,
    #[arg(long)]
    pub estimate: Option<i64>,
    /// Comma-separated label ids
    #[arg(long)]
    pub label_ids: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct IssueUpdateArgs {
    /// Issue id or identifier (ENG-123)
    pub reference: String,
    /// Update input as JSON (replaces the field flags)
    #[arg(long, conflicts_with_all = ["title", "description", "priority", "assignee_id", "state_id", "project_id", "estimate", "label_ids"])]
    pub input: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub priority: Option<i64>,
    /// Assignee user id ("" to unassign)
    #[arg(long)]
    pub assignee_id: Option<String>,
    #[arg(long)]
    pub state_id: Option<String>,
    #[arg(long)]
    pub project_id: Option<String>,
    #[arg(long)]
    pub estimate: Option<i64>,
    /// Comma-separated label ids
    #[arg(long)]
    pub label_ids: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum CommentsCommands {
    /// List comments on an issue
    List {
        /// Issue id or identifier (ENG-123)
        reference: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Comment on an issue
    Add {
        /// Issue id or identifier (ENG-123)
        reference: String,
        /// Comment body in markdown
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DocumentsCommands {
    /// List documents
    List {
        /// Only documents in this project
        #[arg(long)]
        project_id: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one document
    Get { id: String },
    /// Create a document
    Create(DocumentCreateArgs),
    /// Update a document
    Update(DocumentUpdateArgs),
    /// Delete a document
    Delete { id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct DocumentCreateArgs {
    #[arg(long)]
    pub title: Option<String>,
    /// Content in markdown
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long)]
    pub project_id: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DocumentUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    /// Project id ("" to detach)
    #[arg(long)]
    pub project_id: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum InitiativesCommands {
    /// List initiatives
    List {
        /// Only initiatives with this status
        #[arg(long, value_parser = INITIATIVE_STATUSES)]
        status: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Show one initiative
    Get { id: String },
    /// Create an initiative
    Create(InitiativeCreateArgs),
    /// Update an initiative
    Update(InitiativeUpdateArgs),
    /// Delete an initiative
    Delete { id: String },
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitiativeCreateArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = INITIATIVE_STATUSES)]
    pub status: Option<String>,
    /// Target date (YYYY-MM-DD)
    #[arg(long)]
    pub target_date: Option<String>,
    #[arg(long)]
    pub owner_id: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct InitiativeUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, value_parser = INITIATIVE_STATUSES)]
    pub status: Option<String>,
    #[arg(long)]
    pub target_date: Option<String>,
    #[arg(long)]
    pub owner_id: Option<String>,
    #[arg(long)]
    pub icon: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ProjectsCommands {
    /// List projects
    List {
        /// Only projects accessible to this team key
        #[arg(long)]
        team: Option<String>,
        /// Project state (planned, started, paused, completed, canceled)
        #[arg(long)]
        state: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum UsersCommands {
    /// List users
    List {
        /// Only active users
        #[arg(long)]
        active: bool,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum LabelsCommands {
    /// List issue labels
    List {
        /// Only labels of this team key
        #[arg(long)]
        team: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatesCommands {
    /// List workflow states
    List {
        /// Only states of this team key
        #[arg(long)]
        team: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// Search text
    pub query: String,
    /// Only issues of this team key
    #[arg(long)]
    pub team: Option<String>,
    #[command(flatten)]
    pub page: PageArgs,
}

//! CLI domain: parse, route, help, output, and presentation only.
//! Command handlers own the behavior; one route table dispatches to them.

mod help;
mod output;
mod parse;
pub mod presentation;
mod route;

pub use help::{command_name, is_mutation};
pub use output::{map_error, render_outcome, CommandOutput};
pub use parse::{
    AuthCommands, Cli, Commands, CommentsCommands, DocumentCreateArgs, DocumentUpdateArgs,
    DocumentsCommands, InitiativeCreateArgs, InitiativeUpdateArgs, InitiativesCommands,
    IssueCreateArgs, IssueListArgs, IssueUpdateArgs, IssuesCommands, LabelsCommands, PageArgs,
    ProjectsCommands, SearchArgs, StatesCommands, UsersCommands, INITIATIVE_STATUSES,
};
pub use route::RunContext;

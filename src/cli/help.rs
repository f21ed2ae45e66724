//! Command-name contract for logging and routing.

use crate::cli::parse::{
    AuthCommands, Commands, CommentsCommands, DocumentsCommands, InitiativesCommands,
    IssuesCommands,
};

/// Dotted command name (e.g. "issues.list", "auth.login").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Auth { command } => format!("auth.{}", auth_command_name(command)),
        Commands::Me => "me".to_string(),
        Commands::Issues { command } => format!("issues.{}", issues_command_name(command)),
        Commands::Comments { command } => format!("comments.{}", comments_command_name(command)),
        Commands::Documents { command } => {
            format!("documents.{}", documents_command_name(command))
        }
        Commands::Initiatives { command } => {
            format!("initiatives.{}", initiatives_command_name(command))
        }
        Commands::Projects { .. } => "projects.list".to_string(),
        Commands::Users { .. } => "users.list".to_string(),
        Commands::Labels { .. } => "labels.list".to_string(),
        Commands::States { .. } => "states.list".to_string(),
        Commands::Search(_) => "search".to_string(),
        Commands::Schema { .. } => "schema".to_string(),
    }
}

pub fn auth_command_name(command: &AuthCommands) -> &'static str {
    match command {
        AuthCommands::Login { .. } => "login",
        AuthCommands::Logout => "logout",
        AuthCommands::Status => "status",
    }
}

pub fn issues_command_name(command: &IssuesCommands) -> &'static str {
    match command {
        IssuesCommands::List(_) => "list",
        IssuesCommands::Get { .. } => "get",
        IssuesCommands::Create(_) => "create",
        IssuesCommands::Update(_) => "update",
        IssuesCommands::Delete { .. } => "delete",
    }
}

pub fn comments_command_name(command: &CommentsCommands) -> &'static str {
    match command {
        CommentsCommands::List { .. } => "list",
        CommentsCommands::Add { .. } => "add",
    }
}

pub fn documents_command_name(command: &DocumentsCommands) -> &'static str {
    match command {
        DocumentsCommands::List { .. } => "list",
        DocumentsCommands::Get { .. } => "get",
        DocumentsCommands::Create(_) => "create",
        DocumentsCommands::Update(_) => "update",
        DocumentsCommands::Delete { .. } => "delete",
    }
}

pub fn initiatives_command_name(command: &InitiativesCommands) -> &'static str {
    match command {
        InitiativesCommands::List { .. } => "list",
        InitiativesCommands::Get { .. } => "get",
        InitiativesCommands::Create(_) => "create",
        InitiativesCommands::Update(_) => "update",
        InitiativesCommands::Delete { .. } => "delete",
    }
}

/// Commands that change data in Linear.
pub fn is_mutation(command: &Commands) -> bool {
    match command {
        Commands::Issues { command } => matches!(
            command,
            IssuesCommands::Create(_) | IssuesCommands::Update(_) | IssuesCommands::Delete { .. }
        ),
        Commands::Comments { command } => matches!(command, CommentsCommands::Add { .. }),
        Commands::Documents { command } => matches!(
            command,
            DocumentsCommands::Create(_)
                | DocumentsCommands::Update(_)
                | DocumentsCommands::Delete { .. }
        ),
        Commands::Initiatives { command } => matches!(
            command,
            InitiativesCommands::Create(_)
                | InitiativesCommands::Update(_)
                | InitiativesCommands::Delete { .. }
        ),
        _ => false,
    }
}

//! CLI route: single route table and run context. Dispatches to command
//! handlers and attaches presentation.

use crate::api::{ApiConnector, GraphqlConnector, LinearApi};
use crate::classify::{classify, Failure};
use crate::commands;
use crate::config::{CredentialStore, LinearConfig};
use crate::envelope::ResponseEnvelope;
use crate::render::RenderOptions;
use crate::schema;
use serde_json::Value;
use std::io::IsTerminal;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cli::output::CommandOutput;
use crate::cli::parse::{
    AuthCommands, Commands, CommentsCommands, DocumentsCommands, InitiativesCommands,
    IssuesCommands, LabelsCommands, ProjectsCommands, StatesCommands, UsersCommands,
};
use crate::cli::presentation::{account, catalog, documents, initiatives, issues};
use crate::cli::{command_name, is_mutation};

/// Runtime context for CLI execution: loaded config, credentials, and the
/// connector that turns an API key into a client.
pub struct RunContext {
    config: LinearConfig,
    credentials: CredentialStore,
    connector: Arc<dyn ApiConnector>,
}

impl RunContext {
    /// Context talking to the configured GraphQL endpoint.
    pub fn new(config: LinearConfig, credentials: CredentialStore) -> Self {
        let connector = Arc::new(GraphqlConnector::new(config.api.clone()));
        Self {
            config,
            credentials,
            connector,
        }
    }

    /// Swap the connector (tests point it at a mock server or a fake).
    pub fn with_connector(mut self, connector: Arc<dyn ApiConnector>) -> Self {
        self.connector = connector;
        self
    }

    pub fn config(&self) -> &LinearConfig {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Client for the stored key, or `NOT_AUTHENTICATED`.
    fn api(&self) -> Result<Arc<dyn LinearApi>, Failure> {
        let key = self.credentials.require_api_key()?;
        Ok(self.connector.connect(&key)?)
    }

    /// Execute a command and pair its envelope with how to render it.
    pub async fn execute(&self, command: &Commands) -> Result<CommandOutput, Failure> {
        let name = command_name(command);
        let started = Instant::now();
        debug!(command = %name, mutation = is_mutation(command), "command started");

        let result = self.dispatch(command).await;

        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(output) => info!(
                command = %name,
                duration_ms,
                ok = output.envelope.is_success(),
                "command finished"
            ),
            Err(failure) => warn!(
                command = %name,
                duration_ms,
                code = %classify(failure).code,
                "command failed"
            ),
        }
        result
    }

    async fn dispatch(&self, command: &Commands) -> Result<CommandOutput, Failure> {
        match command {
            Commands::Auth { command } => self.handle_auth(command).await,
            Commands::Me => {
                let api = self.api()?;
                let envelope = commands::me::me(api.as_ref()).await?;
                Ok(with_data_options(envelope, account::me_options))
            }
            Commands::Issues { command } => self.handle_issues(command).await,
            Commands::Comments { command } => self.handle_comments(command).await,
            Commands::Documents { command } => self.handle_documents(command).await,
            Commands::Initiatives { command } => self.handle_initiatives(command).await,
            Commands::Projects {
                command: ProjectsCommands::List { team, state, page },
            } => {
                let api = self.api()?;
                let envelope = commands::catalog::projects(
                    api.as_ref(),
                    team.as_deref(),
                    state.as_deref(),
                    page,
                )
                .await?;
                Ok(CommandOutput::new(envelope, catalog::project_options()))
            }
            Commands::Users {
                command: UsersCommands::List { active, page },
            } => {
                let api = self.api()?;
                let envelope = commands::catalog::users(api.as_ref(), *active, page).await?;
                Ok(CommandOutput::new(envelope, catalog::user_options()))
            }
            Commands::Labels {
                command: LabelsCommands::List { team, page },
            } => {
                let api = self.api()?;
                let envelope =
                    commands::catalog::labels(api.as_ref(), team.as_deref(), page).await?;
                Ok(CommandOutput::new(envelope, catalog::label_options()))
            }
            Commands::States {
                command: StatesCommands::List { team, page },
            } => {
                let api = self.api()?;
                let envelope =
                    commands::catalog::states(api.as_ref(), team.as_deref(), page).await?;
                Ok(CommandOutput::new(envelope, catalog::state_options()))
            }
            Commands::Search(args) => {
                let api = self.api()?;
                let envelope = commands::search::search(api.as_ref(), args).await?;
                Ok(CommandOutput::new(envelope, issues::list_options()))
            }
            Commands::Schema {
                entity,
                full,
                include_examples,
            } => {
                let envelope = schema::describe(entity.as_deref(), *full, *include_examples)?;
                Ok(CommandOutput::new(envelope, RenderOptions::default()))
            }
        }
    }

    async fn handle_auth(&self, command: &AuthCommands) -> Result<CommandOutput, Failure> {
        match command {
            AuthCommands::Login { key, key_flag } => {
                let key = match key_flag.clone().or_else(|| key.clone()) {
                    Some(key) => Some(key),
                    None => prompt_for_key()?,
                };
                let envelope = commands::auth::login(
                    &self.credentials,
                    self.connector.as_ref(),
                    key.as_deref(),
                )
                .await?;
                Ok(CommandOutput::new(envelope, account::auth_options()))
            }
            AuthCommands::Logout => {
                let envelope = commands::auth::logout(&self.credentials)?;
                Ok(CommandOutput::new(envelope, account::auth_options()))
            }
            AuthCommands::Status => {
                let envelope =
                    commands::auth::status(&self.credentials, self.connector.as_ref()).await?;
                Ok(CommandOutput::new(envelope, account::auth_status_options()))
            }
        }
    }

    async fn handle_issues(&self, command: &IssuesCommands) -> Result<CommandOutput, Failure> {
        let api = self.api()?;
        let api = api.as_ref();
        match command {
            IssuesCommands::List(args) => {
                let envelope = commands::issues::list(api, args).await?;
                Ok(CommandOutput::new(envelope, issues::list_options()))
            }
            IssuesCommands::Get { reference } => {
                let envelope = commands::issues::get(api, reference).await?;
                Ok(with_data_options(envelope, issues::get_options))
            }
            IssuesCommands::Create(args) => {
                let default_team = self.config.default_team_id.as_deref();
                let envelope = commands::issues::create(api, args, default_team).await?;
                Ok(CommandOutput::new(envelope, issues::item_options()))
            }
            IssuesCommands::Update(args) => {
                let envelope = commands::issues::update(api, args).await?;
                Ok(CommandOutput::new(envelope, issues::item_options()))
            }
            IssuesCommands::Delete {
                reference,
                permanent,
            } => {
                let envelope = commands::issues::delete(api, reference, *permanent).await?;
                Ok(CommandOutput::new(envelope, issues::item_options()))
            }
        }
    }

    async fn handle_comments(&self, command: &CommentsCommands) -> Result<CommandOutput, Failure> {
        let api = self.api()?;
        match command {
            CommentsCommands::List { reference, page } => {
                let envelope = commands::comments::list(api.as_ref(), reference, page).await?;
                Ok(CommandOutput::new(envelope, issues::comment_list_options()))
            }
            CommentsCommands::Add { reference, body } => {
                let envelope =
                    commands::comments::add(api.as_ref(), reference, body.as_deref()).await?;
                Ok(with_data_options(envelope, issues::comment_options))
            }
        }
    }

    async fn handle_documents(
        &self,
        command: &DocumentsCommands,
    ) -> Result<CommandOutput, Failure> {
        let api = self.api()?;
        let api = api.as_ref();
        match command {
            DocumentsCommands::List { project_id, page } => {
                let envelope =
                    commands::documents::list(api, project_id.as_deref(), page).await?;
                Ok(CommandOutput::new(envelope, documents::list_options()))
            }
            DocumentsCommands::Get { id } => {
                let envelope = commands::documents::get(api, id).await?;
                Ok(with_data_options(envelope, documents::get_options))
            }
            DocumentsCommands::Create(args) => {
                let envelope = commands::documents::create(api, args).await?;
                Ok(CommandOutput::new(envelope, documents::item_options()))
            }
            DocumentsCommands::Update(args) => {
                let envelope = commands::documents::update(api, args).await?;
                Ok(CommandOutput::new(envelope, documents::item_options()))
            }
            DocumentsCommands::Delete { id } => {
                let envelope = commands::documents::delete(api, id).await?;
                Ok(CommandOutput::new(envelope, documents::item_options()))
            }
        }
    }

    async fn handle_initiatives(
        &self,
        command: &InitiativesCommands,
    ) -> Result<CommandOutput, Failure> {
        let api = self.api()?;
        let api = api.as_ref();
        match command {
            InitiativesCommands::List { status, page } => {
                let envelope =
                    commands::initiatives::list(api, status.as_deref(), page).await?;
                Ok(CommandOutput::new(envelope, initiatives::list_options()))
            }
            InitiativesCommands::Get { id } => {
                let envelope = commands::initiatives::get(api, id).await?;
                Ok(with_data_options(envelope, initiatives::get_options))
            }
            InitiativesCommands::Create(args) => {
                let envelope = commands::initiatives::create(api, args).await?;
                Ok(CommandOutput::new(envelope, initiatives::item_options()))
            }
            InitiativesCommands::Update(args) => {
                let envelope = commands::initiatives::update(api, args).await?;
                Ok(CommandOutput::new(envelope, initiatives::item_options()))
            }
            InitiativesCommands::Delete { id } => {
                let envelope = commands::initiatives::delete(api, id).await?;
                Ok(CommandOutput::new(envelope, initiatives::item_options()))
            }
        }
    }
}

/// Options that depend on the returned entity (tabular summaries).
fn with_data_options(
    envelope: ResponseEnvelope,
    options: impl FnOnce(&Value) -> RenderOptions,
) -> CommandOutput {
    let options = match &envelope {
        ResponseEnvelope::Success { data } => options(data),
        _ => RenderOptions::default(),
    };
    CommandOutput::new(envelope, options)
}

/// Ask for the key on an interactive terminal; `None` otherwise.
fn prompt_for_key() -> Result<Option<String>, Failure> {
    if !std::io::stdin().is_terminal() {
        return Ok(None);
    }
    let key = dialoguer::Password::new()
        .with_prompt("Linear API key")
        .allow_empty_password(true)
        .interact()
        .map_err(anyhow::Error::from)?;
    Ok(Some(key))
}

//! App commands - list, show, create, edit and delete app records.

use std::io::{self, Write};

use clap::Args;
use serde_json::Value;
use tracing::info;

use crate::cli::AppCommands;
use crate::editor;
use crate::errors::FreightError;
use crate::http::client::{ApiClient, Transport};
use crate::models::app::{editable_fields, flatten_for_update, AppCreateRequest};
use crate::prompt;
use crate::render::pretty_json;

/// Arguments for the app create command.
#[derive(Debug, Args)]
pub struct AppCreateArgs {
    /// App name.
    pub name: String,

    /// Repository URL.
    #[arg(long)]
    pub repository: Option<String>,

    /// Deploy provider.
    #[arg(long)]
    pub provider: Option<String>,

    /// Provider configuration as a JSON document.
    #[arg(long)]
    pub config: Option<String>,
}

/// Arguments for the app delete command.
#[derive(Debug, Args)]
pub struct AppDeleteArgs {
    /// App name.
    pub app: String,

    /// Skip the confirmation prompt.
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Execute an app subcommand with the interactive editor and terminal prompt.
pub async fn execute<T: Transport, W: Write>(
    command: AppCommands,
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    match command {
        AppCommands::List => list(client, out).await,
        AppCommands::Show { app } => show(&app, client, out).await,
        AppCommands::Create(args) => create(args, client, out).await,
        AppCommands::Edit { app } => {
            let editor = editor::get_editor()?;
            edit(&app, client, out, |initial| {
                editor::edit_text(&editor, initial, ".json")
            })
            .await
        }
        AppCommands::Delete(args) => {
            delete(args, client, out, |question| prompt::confirm(question, false)).await
        }
    }
}

/// Print all apps.
pub async fn list<T: Transport, W: Write>(
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    let data = client.list_apps().await?;
    out.write_all(pretty_json(&data)?.as_bytes())?;
    Ok(())
}

/// Print a single app.
pub async fn show<T: Transport, W: Write>(
    app: &str,
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    let data = client.get_app(app).await?;
    out.write_all(pretty_json(&data)?.as_bytes())?;
    Ok(())
}

/// Create an app and print the created record.
pub async fn create<T: Transport, W: Write>(
    args: AppCreateArgs,
    client: &ApiClient<T>,
    out: &mut W,
) -> Result<(), FreightError> {
    let request = AppCreateRequest::new(args.name, args.repository, args.provider, args.config)?;
    let data = client.create_app(&request).await?;
    info!("Created app {}", request.name);

    out.write_all(pretty_json(&data)?.as_bytes())?;
    Ok(())
}

/// Fetch an app, let `edit_fn` change its JSON and submit the result.
///
/// Nothing is sent when the edit fails, the buffer is emptied, the content is
/// unchanged or the result is not a JSON object.
pub async fn edit<T, W, E>(
    app: &str,
    client: &ApiClient<T>,
    out: &mut W,
    edit_fn: E,
) -> Result<(), FreightError>
where
    T: Transport,
    W: Write,
    E: FnOnce(&str) -> Result<String, FreightError>,
{
    let record = client.get_app(app).await?;
    let initial = pretty_json(&Value::Object(editable_fields(record)?))?;

    let edited = edit_fn(&initial)?;
    if edited.trim().is_empty() {
        return Err(FreightError::Aborted("empty app definition".to_string()));
    }
    if edited.trim() == initial.trim() {
        writeln!(out, "No changes made to app {}.", app)?;
        return Ok(());
    }

    let fields = match serde_json::from_str::<Value>(&edited) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => {
            return Err(FreightError::Editor(
                "edited app must be a JSON object".to_string(),
            ))
        }
        Err(e) => {
            return Err(FreightError::Editor(format!(
                "edited app is not valid JSON: {}",
                e
            )))
        }
    };

    let data = client.update_app(app, flatten_for_update(fields)).await?;
    info!("Updated app {}", app);

    out.write_all(pretty_json(&data)?.as_bytes())?;
    Ok(())
}

/// Delete an app after confirmation.
pub async fn delete<T, W, C>(
    args: AppDeleteArgs,
    client: &ApiClient<T>,
    out: &mut W,
    confirm_fn: C,
) -> Result<(), FreightError>
where
    T: Transport,
    W: Write,
    C: FnOnce(&str) -> io::Result<bool>,
{
    let question = format!("Are you sure you want to delete app {}?", args.app);
    if !args.yes && !confirm_fn(&question)? {
        return Err(FreightError::Aborted(format!("app {} was not deleted", args.app)));
    }

    client.delete_app(&args.app).await?;
    info!("Deleted app {}", args.app);

    writeln!(out, "App {} was deleted.", args.app)?;
    Ok(())
}

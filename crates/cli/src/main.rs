use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use navlist_api::links::{list_picker_options, list_view_url, new_list_url};
use navlist_api::{ACCESS_TOKEN_ENV, ListSource, SITE_URL_ENV, SharePointClient};
use navlist_engine::{FieldRole, NavigationController, infer};
use navlist_types::FieldDescriptor;
use navlist_util::SettingsStore;
use tracing::debug;

mod render;

#[derive(Debug, Parser)]
#[command(name = "navlist", version, about = "Render navigation links from a site list")]
struct Cli {
    /// Site whose lists back the navigation (overrides settings and NAVLIST_SITE_URL).
    #[arg(long, global = true)]
    site_url: Option<String>,

    /// Settings file (defaults to NAVLIST_SETTINGS_PATH or the config directory).
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the site's visible lists.
    Lists {
        #[arg(long)]
        json: bool,
    },
    /// Show a list's columns and the roles inferred for them.
    Fields {
        list_id: String,
        #[arg(long)]
        json: bool,
    },
    /// Build and render the navigation for the selected list.
    Show {
        /// List to render instead of the saved selection.
        #[arg(long)]
        list: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Header text instead of the saved one.
        #[arg(long)]
        header: Option<String>,
    },
    /// Print the "create list" and "view selected list" links.
    Links {
        #[arg(long)]
        list: Option<String>,
    },
    /// Inspect or change saved settings.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
enum ConfigAction {
    Show,
    SetSite { url: String },
    /// Select a list; pass an empty string to clear the selection.
    SetList { list_id: String },
    SetHeader { text: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let mut store = match &cli.settings {
        Some(path) => SettingsStore::open(path.clone()),
        None => SettingsStore::open_default(),
    }
    .context("load settings")?;
    debug!(path = %store.path().display(), "using settings file");

    match cli.command {
        Command::Config { action } => run_config(&mut store, action),
        Command::Lists { json } => {
            let client = build_client(cli.site_url.as_deref(), &store)?;
            run_lists(&client, json).await
        }
        Command::Fields { list_id, json } => {
            let client = build_client(cli.site_url.as_deref(), &store)?;
            run_fields(&client, &list_id, json).await
        }
        Command::Show { list, format, header } => {
            let client = build_client(cli.site_url.as_deref(), &store)?;
            let list_id = list.or_else(|| store.settings().selected_list().map(str::to_string));
            let header = header.or_else(|| store.settings().header_text.clone());
            run_show(client, list_id.as_deref(), format, header.as_deref()).await
        }
        Command::Links { list } => {
            let client = build_client(cli.site_url.as_deref(), &store)?;
            let list_id = list.or_else(|| store.settings().selected_list().map(str::to_string));
            run_links(&client, list_id.as_deref()).await
        }
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Site URL precedence: `--site-url`, then saved settings, then the environment.
fn build_client(flag: Option<&str>, store: &SettingsStore) -> Result<SharePointClient> {
    let site_url = flag
        .map(str::to_string)
        .or_else(|| store.settings().site_url.clone())
        .or_else(|| std::env::var(SITE_URL_ENV).ok())
        .context("no site URL configured; pass --site-url, run `navlist config set-site`, or set NAVLIST_SITE_URL")?;
    let token = std::env::var(ACCESS_TOKEN_ENV).ok();
    Ok(SharePointClient::new(&site_url, token.as_deref())?)
}

async fn run_lists(client: &SharePointClient, json: bool) -> Result<ExitCode> {
    let lists = client.fetch_catalog().await.map_err(|error| anyhow::anyhow!(error.user_message()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&lists)?);
        return Ok(ExitCode::SUCCESS);
    }

    for option in list_picker_options(&lists) {
        if option.key.is_empty() {
            println!("{}", option.text);
        } else {
            println!("  {}  {}", option.key, option.text);
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_fields(client: &SharePointClient, list_id: &str, json: bool) -> Result<ExitCode> {
    let fields = client
        .fetch_fields(list_id)
        .await
        .map_err(|error| anyhow::anyhow!(error.user_message()))?;
    let schema = infer(&fields);
    if json {
        let out = serde_json::json!({ "fields": fields, "schema": schema });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(ExitCode::SUCCESS);
    }

    let role_field = |role: FieldRole| -> Option<&FieldDescriptor> {
        match role {
            FieldRole::Display => schema.display_field.as_ref(),
            FieldRole::Link => schema.link_field.as_ref(),
            FieldRole::Section => schema.section_field.as_ref(),
        }
    };
    for field in &fields {
        let roles: Vec<String> = FieldRole::ALL
            .into_iter()
            .filter(|role| role_field(*role) == Some(field))
            .map(|role| format!("{role:?}").to_lowercase())
            .collect();
        println!(
            "{:<32} {:<32} {:<6} {}",
            field.internal_name,
            field.display_name,
            format!("{:?}", field.kind),
            roles.join(",")
        );
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_show(
    client: SharePointClient,
    list_id: Option<&str>,
    format: OutputFormat,
    header: Option<&str>,
) -> Result<ExitCode> {
    let controller = NavigationController::new(client);
    match list_id {
        Some(list_id) => {
            controller.select_list(list_id).await;
        }
        None => controller.clear_selection(),
    }

    let snapshot = controller.snapshot();
    let output = match format {
        OutputFormat::Text => render::render_text(header, &snapshot.model),
        OutputFormat::Html => render::render_html(header, &snapshot.model),
        OutputFormat::Json => render::render_json(header, &snapshot)?,
    };
    print!("{output}");

    if let Some(message) = snapshot.status.error_message() {
        eprintln!("error: {message}");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_links(client: &SharePointClient, list_id: Option<&str>) -> Result<ExitCode> {
    println!("Create New List: {}", new_list_url(&client.site_url));

    let selected = match list_id {
        Some(list_id) => {
            let lists = client.fetch_catalog().await.map_err(|error| anyhow::anyhow!(error.user_message()))?;
            lists.into_iter().find(|list| list.id == list_id)
        }
        None => None,
    };
    println!("View Selected List: {}", list_view_url(&client.site_url, selected.as_ref()));
    Ok(ExitCode::SUCCESS)
}

fn run_config(store: &mut SettingsStore, action: ConfigAction) -> Result<ExitCode> {
    match action {
        ConfigAction::Show => {
            println!("{}", serde_json::to_string_pretty(store.settings())?);
            println!("# {}", store.path().display());
        }
        ConfigAction::SetSite { url } => {
            let site_url = SharePointClient::new(&url, None)?.site_url;
            store.update(|settings| settings.site_url = Some(site_url))?;
        }
        ConfigAction::SetList { list_id } => {
            let list_id = Some(list_id.trim().to_string()).filter(|id| !id.is_empty());
            store.update(|settings| settings.selected_list_id = list_id)?;
        }
        ConfigAction::SetHeader { text } => {
            let header = Some(text).filter(|text| !text.trim().is_empty());
            store.update(|settings| settings.header_text = header)?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

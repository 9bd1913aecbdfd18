//! pokerdeck - Review and manage uploaded poker sessions

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use pokerdeck::config::{Config, Settings};
use pokerdeck::service::SessionClient;
use pokerdeck::view::Renderer;
use pokerdeck::{Dashboard, FilterConfig, SessionId, SortBy, SortOrder};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pokerdeck")]
#[command(about = "Filter, sort and manage uploaded poker sessions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session service base URL
    #[arg(long)]
    api_url: Option<String>,

    /// Colour theme (light or dark)
    #[arg(long)]
    theme: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List sessions, filtered and sorted
    List(ListArgs),
    /// List every tag in use
    Tags,
    /// List every player seen in any session
    Players,
    /// Manage session tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },
    /// Make sessions visible
    Show {
        #[arg(required = true)]
        ids: Vec<SessionId>,
    },
    /// Hide sessions
    Hide {
        #[arg(required = true)]
        ids: Vec<SessionId>,
    },
    /// Flip a session's visibility
    Toggle { id: SessionId },
    /// Delete sessions
    Delete {
        #[arg(required = true)]
        ids: Vec<SessionId>,
    },
    /// Check that the session service is reachable
    Health,
}

#[derive(Args, Default)]
struct ListArgs {
    /// Only sessions with this tag (repeatable, any may match)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Only sessions with this player (repeatable, any may match)
    #[arg(long = "player")]
    players: Vec<String>,

    /// Only sessions with this game type, e.g. NLHE (repeatable)
    #[arg(long = "game-type")]
    game_types: Vec<String>,

    /// Only sessions with this table size, e.g. 6 (repeatable)
    #[arg(long = "table-size")]
    table_sizes: Vec<String>,

    /// Sort key: session_date or upload_date
    #[arg(long)]
    sort_by: Option<SortBy>,

    /// Sort order: asc or desc
    #[arg(long)]
    order: Option<SortOrder>,

    /// Print the filtered sessions as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum TagAction {
    /// Add a tag to one session
    Add { id: SessionId, tag: String },
    /// Remove a tag from one session
    Remove { id: SessionId, tag: String },
    /// Add a tag to several sessions at once
    Bulk {
        tag: String,
        #[arg(required = true)]
        ids: Vec<SessionId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    }
    .apply_env()?
    .apply_overrides(cli.api_url, cli.theme)?;

    let settings = Settings::new(&config.appearance);
    let client = SessionClient::new(&config.service)
        .with_context(|| format!("Cannot use service at {}", config.service.base_url))?;
    let filters = FilterConfig::new().with_sort(config.view.sort_by, config.view.sort_order);
    let mut dashboard = Dashboard::new(client, filters);

    match cli.command.unwrap_or(Commands::List(ListArgs::default())) {
        Commands::List(args) => list(&mut dashboard, &settings, args).await,
        Commands::Tags => {
            dashboard.refresh().await?;
            Renderer::new(&settings).tags(&mut std::io::stdout(), dashboard.catalog())?;
            Ok(())
        }
        Commands::Players => {
            dashboard.refresh().await?;
            Renderer::new(&settings).players(&mut std::io::stdout(), dashboard.catalog())?;
            Ok(())
        }
        Commands::Tag { action } => tag(&mut dashboard, action).await,
        Commands::Show { ids } => set_visibility(&mut dashboard, ids, true).await,
        Commands::Hide { ids } => set_visibility(&mut dashboard, ids, false).await,
        Commands::Toggle { id } => {
            dashboard.refresh().await?;
            dashboard.toggle_active(&id).await?;
            report(&dashboard)
        }
        Commands::Delete { ids } => {
            dashboard.refresh().await?;
            select(&mut dashboard, ids);
            let outcome = dashboard.bulk_delete().await?;
            report(&dashboard)?;
            if !outcome.is_complete() {
                bail!("{} deletion(s) failed", outcome.failed.len());
            }
            Ok(())
        }
        Commands::Health => {
            let report = dashboard.client().health().await?;
            println!(
                "{}: {}",
                report.status,
                report.message.unwrap_or_default()
            );
            Ok(())
        }
    }
}

async fn list(dashboard: &mut Dashboard, settings: &Settings, args: ListArgs) -> Result<()> {
    let current = dashboard.filters().clone();
    let filters = FilterConfig::new()
        .with_tags(args.tags)
        .with_players(args.players)
        .with_game_types(args.game_types)
        .with_table_sizes(args.table_sizes)
        .with_sort(
            args.sort_by.unwrap_or(current.sort_by),
            args.order.unwrap_or(current.sort_order),
        );
    dashboard.set_filters(filters);
    dashboard.refresh().await?;

    let visible = dashboard.visible();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
    } else {
        Renderer::new(settings).session_list(
            &mut std::io::stdout(),
            &visible,
            dashboard.filters(),
        )?;
    }
    Ok(())
}

async fn tag(dashboard: &mut Dashboard, action: TagAction) -> Result<()> {
    match action {
        TagAction::Add { id, tag } => dashboard.add_tag(&id, &tag).await?,
        TagAction::Remove { id, tag } => dashboard.remove_tag(&id, &tag).await?,
        TagAction::Bulk { tag, ids } => {
            dashboard.refresh().await?;
            select(dashboard, ids);
            dashboard.bulk_add_tag(&tag).await?;
        }
    }
    report(dashboard)
}

async fn set_visibility(dashboard: &mut Dashboard, ids: Vec<SessionId>, active: bool) -> Result<()> {
    dashboard.refresh().await?;
    select(dashboard, ids);
    let outcome = dashboard.bulk_set_visibility(active).await?;
    report(dashboard)?;
    if !outcome.is_complete() {
        bail!("{} visibility change(s) failed", outcome.failed.len());
    }
    Ok(())
}

fn select(dashboard: &mut Dashboard, ids: Vec<SessionId>) {
    dashboard.clear_selection();
    for id in ids {
        if !dashboard.selection().contains(&id) {
            dashboard.toggle_selected(id);
        }
    }
}

fn report(dashboard: &Dashboard) -> Result<()> {
    if let Some(status) = dashboard.status() {
        if status.is_error() {
            eprintln!("{}", status.text());
        } else {
            println!("{}", status.text());
        }
    }
    Ok(())
}

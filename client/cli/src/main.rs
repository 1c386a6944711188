use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod check;
mod config;

use api::{
    FileActionParams, NasClient, PermissionParams, SearchFilesParams, SearchMediaParams,
    SkillsClient,
};
use config::{Config, Overrides, Settings};

#[derive(Parser)]
#[command(name = "ainas")]
#[command(about = "AI-NAS capability API client", long_about = None)]
struct Cli {
    /// Server root URL (default http://localhost:5000)
    #[arg(long, global = true, env = "AINAS_URL")]
    url: Option<String>,
    /// Bearer access token
    #[arg(long, global = true, env = "AINAS_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Assistant skills service root URL (default http://localhost:18789)
    #[arg(long, global = true, env = "AINAS_SKILLS_URL")]
    skills_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save the given --url/--token/--skills-url, or show the saved config
    Configure,
    /// Run the conformance checks against the server
    Check,
    /// Search files
    Search {
        query: String,
        /// personal, public or group
        #[arg(long)]
        space_type: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// Run a file operation (move, copy, rename, delete, create_folder)
    FileAction {
        action: String,
        /// Source file id (repeatable)
        #[arg(long = "source")]
        sources: Vec<String>,
        #[arg(long)]
        target: Option<String>,
        #[arg(long)]
        name: Option<String>,
    },
    /// Semantic photo/video search
    MediaSearch {
        query: String,
        /// photo, video or all
        #[arg(long, default_value = "all")]
        media_type: String,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        size: u32,
    },
    /// List album categories
    Categories {
        /// person, pet, scene or location
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Show appliance status
    Status,
    /// Ask whether an action is permitted
    Permission {
        #[arg(long)]
        action: String,
        #[arg(long)]
        resource_type: String,
        #[arg(long)]
        resource_id: String,
    },
    /// Assistant skills
    Skills {
        #[command(subcommand)]
        command: SkillCommands,
    },
}

#[derive(Subcommand)]
enum SkillCommands {
    /// List skills
    List,
    /// Enable or disable a skill
    Toggle {
        id: String,
        #[arg(long, action = clap::ArgAction::Set)]
        enabled: bool,
    },
    /// Toggle the first skill and restore it
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ainas=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;

    let settings = config.resolve(Overrides {
        server_url: cli.url.clone(),
        token: cli.token.clone(),
        skills_url: cli.skills_url.clone(),
    });
    let client = NasClient::new(&settings.server_url, settings.token.as_deref());

    match cli.command {
        Commands::Configure => configure(config, cli.url, cli.token, cli.skills_url)?,
        Commands::Check => {
            settings.require_token()?;
            println!("AI-NAS conformance check against {}", settings.server_url);
            let report = check::run(&client).await;
            finish(report)?;
        }
        Commands::Search { query, space_type, page, size } => {
            settings.require_token()?;
            let data = client
                .search_files(&SearchFilesParams { query, space_type, page, size })
                .await?;
            print_json(&data)?;
        }
        Commands::FileAction { action, sources, target, name } => {
            settings.require_token()?;
            let params = FileActionParams {
                action,
                source_file_ids: if sources.is_empty() { None } else { Some(sources) },
                target_folder_id: target,
                new_name: name,
            };
            print_json(&client.file_action(&params).await?)?;
        }
        Commands::MediaSearch { query, media_type, page, size } => {
            settings.require_token()?;
            let data = client
                .search_media(&SearchMediaParams { query, media_type, page, size })
                .await?;
            print_json(&data)?;
        }
        Commands::Categories { kind } => {
            settings.require_token()?;
            print_json(&client.album_categories(kind.as_deref()).await?)?;
        }
        Commands::Status => {
            settings.require_token()?;
            print_json(&client.system_status().await?)?;
        }
        Commands::Permission { action, resource_type, resource_id } => {
            settings.require_token()?;
            let granted = client
                .check_permission(&PermissionParams { action, resource_type, resource_id })
                .await?;
            println!("{}", if granted { "granted" } else { "denied" });
        }
        Commands::Skills { command } => skills(&settings, command).await?,
    }

    Ok(())
}

fn configure(
    mut config: Config,
    url: Option<String>,
    token: Option<String>,
    skills_url: Option<String>,
) -> anyhow::Result<()> {
    if url.is_none() && token.is_none() && skills_url.is_none() {
        println!("config: {}", Config::config_path()?.display());
        println!("  server: {}", config.server_url.as_deref().unwrap_or("(default)"));
        println!("  token: {}", if config.token.is_some() { "set" } else { "not set" });
        println!("  skills: {}", config.skills_url.as_deref().unwrap_or("(default)"));
        return Ok(());
    }

    if url.is_some() {
        config.server_url = url;
    }
    if token.is_some() {
        config.token = token;
    }
    if skills_url.is_some() {
        config.skills_url = skills_url;
    }
    config.save()?;
    println!("saved {}", Config::config_path()?.display());
    Ok(())
}

async fn skills(settings: &Settings, command: SkillCommands) -> anyhow::Result<()> {
    let client = SkillsClient::new(&settings.skills_url, settings.require_token()?);

    match command {
        SkillCommands::List => {
            let skills = client.list().await?;
            if skills.is_empty() {
                println!("no skills");
            }
            for skill in skills {
                let state = if skill.enabled { "on " } else { "off" };
                println!("[{}] {:<24} {}", state, skill.id, skill.name);
                if !skill.description.is_empty() {
                    println!("      {}", skill.description);
                }
                if let Some(prerequisites) = skill.prerequisites {
                    println!("      {}", prerequisites);
                }
            }
        }
        SkillCommands::Toggle { id, enabled } => {
            let update = client.toggle(&id, enabled).await?;
            match update.updated_time {
                Some(at) => println!("{} enabled={} ({})", update.id, update.enabled, at),
                None => println!("{} enabled={}", update.id, update.enabled),
            }
        }
        SkillCommands::Check => {
            finish(check::run_skills(&client).await)?;
        }
    }
    Ok(())
}

fn finish(report: check::Report) -> anyhow::Result<()> {
    println!();
    if report.failed() == 0 {
        println!("all {} checks passed", report.passed);
        Ok(())
    } else {
        println!("{} passed, {} failed", report.passed, report.failed());
        std::process::exit(1);
    }
}

fn print_json(data: &Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(data)?);
    Ok(())
}

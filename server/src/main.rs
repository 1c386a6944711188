//! AI-NAS capability API stub server (ainasd)

use clap::{Parser, Subcommand};
use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod auth;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "ainasd")]
#[command(about = "Stand-in server for the AI-NAS capability API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server (runs in background)
    Serve {
        /// Run in foreground (don't daemonize)
        #[arg(long)]
        foreground: bool,
    },
    /// Stop the server
    Down,
    /// Show server status
    Status,
    /// Show which access token clients must send
    Token,
}

fn pid_file() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ainasd.pid")
}

fn is_server_running() -> Option<u32> {
    let pid_path = pid_file();
    let pid = fs::read_to_string(&pid_path)
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok());

    if let Some(pid) = pid {
        if process_alive(pid) {
            return Some(pid);
        }
    }
    // Stale or unreadable pid file
    let _ = fs::remove_file(&pid_path);
    None
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    true
}

fn load_config() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    Config::from_env()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Down => stop_server(),
        Commands::Status => show_status(),
        Commands::Token => show_token(),
        Commands::Serve { foreground: false } => start_daemon(),
        Commands::Serve { foreground: true } => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "ainasd=info,tower_http=info".into()),
                )
                .with(tracing_subscriber::fmt::layer())
                .init();

            run_server(load_config()?).await
        }
    }
}

fn start_daemon() -> anyhow::Result<()> {
    if let Some(pid) = is_server_running() {
        println!("ainasd already running (pid {})", pid);
        return Ok(());
    }

    // Fail before detaching if the environment is unusable
    let config = load_config()?;

    let exe = std::env::current_exe()?;
    let child = Command::new(&exe)
        .args(["serve", "--foreground"])
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    let pid = child.id();
    write_pid(pid)?;

    println!("ainasd serving on {}", config.listen_addr());
    println!("pid: {}", pid);

    Ok(())
}

fn write_pid(pid: u32) -> anyhow::Result<()> {
    let pid_path = pid_file();
    if let Some(parent) = pid_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&pid_path, pid.to_string())?;
    Ok(())
}

fn stop_server() -> anyhow::Result<()> {
    if let Some(pid) = is_server_running() {
        #[cfg(unix)]
        {
            Command::new("kill").args([&pid.to_string()]).status()?;
        }
        #[cfg(not(unix))]
        {
            Command::new("taskkill")
                .args(["/PID", &pid.to_string(), "/F"])
                .status()?;
        }

        let _ = fs::remove_file(pid_file());
        println!("ainasd stopped");
    } else {
        println!("ainasd not running");
    }
    Ok(())
}

fn show_status() -> anyhow::Result<()> {
    let config = load_config()?;

    if let Some(pid) = is_server_running() {
        println!("ainasd running");
        println!("  pid: {}", pid);
        println!("  rest: {}", config.listen_addr());
    } else {
        println!("ainasd not running");
    }
    Ok(())
}

fn show_token() -> anyhow::Result<()> {
    let config = load_config()?;
    let source = if std::env::var("ACCESS_TOKEN").is_ok() {
        "ACCESS_TOKEN"
    } else {
        "built-in default"
    };

    println!("token: {} ({})", auth::mask(&config.access_token), source);
    println!("send: Authorization: Bearer <token>");
    Ok(())
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    // Save PID for foreground mode too
    write_pid(std::process::id())?;

    let rest_addr: SocketAddr = config.listen_addr().parse()?;
    tracing::info!(
        server = %config.server_name,
        header_logging = config.log_request_headers,
        "REST listening on {}",
        rest_addr
    );

    let state = api::AppState::new(config);
    let result = api::rest::serve(rest_addr, state).await;

    let _ = fs::remove_file(pid_file());

    result
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tether_server::{DEFAULT_ASSETS_DIR, DEFAULT_BIND_ADDR, DEFAULT_MAX_ROOMS, ServerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tether", version, about = "Two-party WebRTC pairing server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the signaling relay and serve the browser client.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND_ADDR)]
        bind: SocketAddr,

        #[arg(long, default_value_t = DEFAULT_MAX_ROOMS)]
        max_rooms: usize,

        #[arg(long, default_value = DEFAULT_ASSETS_DIR)]
        assets_dir: PathBuf,

        /// Tell the remaining player when the other one disconnects.
        #[arg(long)]
        notify_peer_left: bool,
    },
    /// Compile the browser client into the assets directory.
    Build {
        #[arg(long, default_value = "./tether-client")]
        client: PathBuf,

        #[arg(short, long, default_value = DEFAULT_ASSETS_DIR)]
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            max_rooms,
            assets_dir,
            notify_peer_left,
        } => {
            init_tracing();
            println!("{}", "Starting tether server...".green().bold());
            println!("   Address: {}", bind.to_string().cyan());
            println!("   Assets:  {}", assets_dir.display());

            let config = ServerConfig {
                bind_addr: bind,
                max_rooms,
                assets_dir,
                notify_peer_left,
            };

            let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
            runtime.block_on(tether_server::serve(config))?;
        }
        Commands::Build { client, out } => {
            println!("{}", "Compiling WebAssembly client...".cyan());
            fs::create_dir_all(&out)?;
            run_wasm_pack(&client, &out)?;
            println!("{}", "Build completed successfully!".green().bold());
            println!("   Assets: {}", out.display());
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// `wasm-pack` names its output after `--out-name`, giving `client.js` and `client_bg.wasm`.
fn run_wasm_pack(client_path: &Path, out_dir: &Path) -> Result<()> {
    let out_abs = fs::canonicalize(out_dir).unwrap_or(out_dir.to_path_buf());
    let status = Command::new("wasm-pack")
        .args(["build", "--target", "web", "--no-typescript", "--out-name", "client", "--out-dir"])
        .arg(out_abs)
        .current_dir(client_path)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("Failed to run wasm-pack. Is it installed?")?;

    if !status.success() {
        anyhow::bail!("WASM build failed");
    }
    Ok(())
}

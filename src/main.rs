use anyhow::{bail, Result};
use buildboard::{
    board::Board,
    config::{Config, ConfigArgs},
    render::{render_output, write_output, OutputFormat, PageOptions},
    server,
};
use clap::{Parser, Subcommand};
use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Project board: approved projects from a published sheet"
)]
struct Args {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the board over HTTP, fetching the sheet on startup
    Serve {
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,
    },
    /// Run one fetch cycle and write the page
    Render {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
        format: OutputFormat,

        /// Leave out the applications banner
        #[arg(long)]
        no_banner: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(log_level.parse().unwrap_or(Level::INFO.into())),
        )
        .with_writer(std::io::stderr)
        .init();

    // ─── 2) configuration ───────────────────────────────────────────
    let args = Args::parse();
    let config = Config::try_from(&args.config)?;
    info!(sheet = %config.sheet_url, "startup");

    let board = Arc::new(Board::new(&config)?);
    let options = PageOptions::from_config(&config);

    // ─── 3) run ─────────────────────────────────────────────────────
    match args.command {
        Command::Serve { port } => {
            let addr = SocketAddr::from(([0, 0, 0, 0], port));
            server::serve(board, options, addr).await
        }
        Command::Render {
            out,
            format,
            no_banner,
        } => {
            let state = board.refresh().await;
            let body = render_output(&state, &options.with_banner(!no_banner), format)?;

            match &out {
                Some(path) => {
                    write_output(path, &body)?;
                    info!(path = %path.display(), projects = state.projects.len(), "wrote page");
                }
                None => print!("{}", body),
            }

            if let Some(msg) = state.error {
                bail!("fetch cycle failed: {}", msg);
            }
            Ok(())
        }
    }
}

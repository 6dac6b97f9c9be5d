use anyhow::Result;
use axum::Router;
use clap::{Parser, Subcommand};
use minisearch_core::persist::MissingSnapshot;
use server::repl::run_repl;
use server::{build_app, QueryService};
use std::net::SocketAddr;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Index snapshot path
    #[arg(long, global = true, default_value = "inverted_index.json")]
    index: PathBuf,
    /// Fail at startup instead of serving an empty index when the snapshot is missing
    #[arg(long, global = true, default_value_t = false)]
    require_index: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Read terms from stdin and print matching URLs (default)
    Repl,
    /// Serve lookups as JSON over HTTP
    Serve {
        /// Host to bind
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to bind
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let args = Args::parse();
    let missing = if args.require_index { MissingSnapshot::Fail } else { MissingSnapshot::Empty };
    let service = QueryService::load(&args.index, missing)?;

    match args.command.unwrap_or(Command::Repl) {
        Command::Repl => {
            let stdin = std::io::stdin();
            run_repl(&service, stdin.lock(), std::io::stdout().lock())
        }
        Command::Serve { host, port } => {
            let app: Router = build_app(service);
            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
            let listener = TcpListener::bind(addr).await?;
            tracing::info!(%addr, "server listening");
            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}

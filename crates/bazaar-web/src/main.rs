use std::path::{Path, PathBuf};

use actix_web::middleware::from_fn;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use bazaar_core::models::Role;
use bazaar_core::{logging, BazaarConfig};
use bazaar_services::provisioning::{self, Provisioned};
use bazaar_storage::Database;
use bazaar_web::middleware::{log_requests, SessionMiddleware};
use bazaar_web::AppState;

#[derive(Parser)]
#[command(name = "bazaar", version, about = "Multi-role storefront server")]
struct Cli {
    /// Config file path (defaults are used when omitted).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server.
    Serve,

    /// Create a seller or admin account unless the username is taken.
    AddAccount {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// customer, seller or admin.
        #[arg(long)]
        role: Role,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BazaarConfig> {
    match path {
        Some(path) => Ok(BazaarConfig::load(path)?),
        None => Ok(BazaarConfig::default()),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    logging::init(&config.logging);

    match cli.command {
        Command::Serve => serve(config).await,
        Command::AddAccount {
            username,
            email,
            password,
            role,
        } => add_account(&config, &username, &email, &password, role),
    }
}

async fn serve(config: BazaarConfig) -> anyhow::Result<()> {
    let db = Database::from_config(&config.storage).context("opening database")?;
    let state = web::Data::new(AppState::new(db, config.session.clone()));

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(SessionMiddleware)
            .wrap(from_fn(log_requests))
            .configure(bazaar_web::configure)
    });
    if let Some(workers) = config.server.workers {
        server = server.workers(workers);
    }

    info!(bind = %config.server.bind, "starting server");
    server
        .bind(&config.server.bind)
        .with_context(|| format!("binding {}", config.server.bind))?
        .run()
        .await?;
    Ok(())
}

fn add_account(
    config: &BazaarConfig,
    username: &str,
    email: &str,
    password: &str,
    role: Role,
) -> anyhow::Result<()> {
    let db = Database::from_config(&config.storage).context("opening database")?;
    match db.write(|uow| provisioning::ensure_account(uow, username, email, password, role))? {
        Provisioned::Created(user) => println!("created {} account {} (id {})", user.role, user.username, user.id),
        Provisioned::Existing(user) => println!("account {} already exists as {}", user.username, user.role),
    }
    Ok(())
}

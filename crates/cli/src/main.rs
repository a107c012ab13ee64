//! Clementine CLI - store seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Push the sample catalog into an empty remote document store
//! clem-cli seed --store-url https://docs.example.com/store
//!
//! # Seed even if the store already has products
//! clem-cli seed --store-url https://docs.example.com/store --force
//!
//! # Create a user
//! clem-cli user create -u jane -e jane@example.com -p s3cret --admin
//! ```
//!
//! # Commands
//!
//! - `seed` - Write the sample catalog to a remote document store
//! - `user create` - Create a user record

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "clem-cli")]
#[command(author, version, about = "Clementine Market CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a remote document store with the sample catalog
    Seed {
        /// Base URL of the document store
        #[arg(long, env = "STOREFRONT_STORE_URL")]
        store_url: String,

        /// Auth token for the document store
        #[arg(long, env = "STOREFRONT_STORE_TOKEN")]
        token: Option<String>,

        /// Seed even if the store already contains products
        #[arg(long)]
        force: bool,
    },
    /// Manage user records
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Base URL of the document store
        #[arg(long, env = "STOREFRONT_STORE_URL")]
        store_url: String,

        /// Auth token for the document store
        #[arg(long, env = "STOREFRONT_STORE_TOKEN")]
        token: Option<String>,

        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,

        /// Grant admin rights
        #[arg(long)]
        admin: bool,
    },
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clem_cli=info,clementine_storefront=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Seed {
            store_url,
            token,
            force,
        } => commands::seed::run(&store_url, token, force)
            .await
            .map_err(Into::into),
        Commands::User { action } => match action {
            UserAction::Create {
                store_url,
                token,
                username,
                email,
                password,
                admin,
            } => commands::user::create(&store_url, token, &username, &email, &password, admin)
                .await
                .map_err(Into::into),
        },
    };

    if let Err(error) = result {
        tracing::error!(%error, "command failed");
        std::process::exit(1);
    }
}

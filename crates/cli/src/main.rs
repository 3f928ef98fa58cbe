//! Curated CLI - listing inspection and seeding tools.
//!
//! # Usage
//!
//! ```bash
//! # Print the listings the storefront would start with
//! curated-cli listings
//!
//! # Insert the bundled catalog into the backend as a signed-in user
//! curated-cli seed -e maker@example.com -p '...'
//!
//! # Run the sell-form assist for a title
//! curated-cli suggest "Hand-Thrown Ceramic Pitcher"
//! ```
//!
//! # Commands
//!
//! - `listings` - Fetch, merge and print the listing store
//! - `seed` - Insert the bundled listings into the backend
//! - `suggest` - Suggest a category, price range and description

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "curated-cli")]
#[command(author, version, about = "Curated CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged listing store as the server builds it at startup
    Listings {
        /// Only show listings in this category (label or slug)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Insert the bundled listings into the backend
    Seed {
        /// Email of the account to insert as
        #[arg(short, long)]
        email: String,

        /// Password of the account to insert as
        #[arg(short, long)]
        password: String,

        /// Print what would be inserted without calling the backend
        #[arg(long)]
        dry_run: bool,
    },
    /// Run the AI assist for an item title
    Suggest {
        /// Item title, as typed on the sell form
        title: String,

        /// Item condition passed to the description prompt
        #[arg(short, long, default_value = "New")]
        condition: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Listings { category } => {
            commands::listings::list(category.as_deref()).await?;
        }
        Commands::Seed {
            email,
            password,
            dry_run,
        } => commands::seed::bundled(&email, &password, dry_run).await?,
        Commands::Suggest { title, condition } => {
            commands::suggest::run(&title, &condition).await?;
        }
    }
    Ok(())
}

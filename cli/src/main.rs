mod client;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use larder_core::{parse_recipe_slug, recipe_slug};

#[derive(Parser)]
#[command(name = "larder")]
#[command(about = "Larder CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ping the server (unauthenticated)
    Ping {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
    },
    /// Print the URL slug for a recipe title and id
    Slug {
        #[arg(long)]
        title: String,
        #[arg(long)]
        id: String,
    },
    /// Print the id suffix a slug points at
    Unslug { slug: String },
    /// List your recipe copies that have no ingredients
    Orphans {
        /// Server URL (default: http://localhost:3000)
        #[arg(long, default_value = "http://localhost:3000")]
        server: String,
        /// Session token
        #[arg(long, env = "LARDER_TOKEN")]
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ping { server } => {
            let response = client::Client::new(&server, None).unauthed_ping().await?;
            println!("{}", response.message);
        }
        Commands::Slug { title, id } => {
            println!("{}", recipe_slug(&title, &id));
        }
        Commands::Unslug { slug } => match parse_recipe_slug(&slug) {
            Some(parsed) => println!("{}", parsed.id_suffix),
            None => bail!("Malformed recipe slug: {:?}", slug),
        },
        Commands::Orphans { server, token } => {
            let orphans = client::Client::new(&server, Some(token)).orphans().await?;
            if orphans.recipes.is_empty() {
                println!("No orphaned copies");
            }
            for recipe in orphans.recipes {
                println!(
                    "{}  {}  (copied from {}, {})",
                    recipe.id,
                    recipe.slug,
                    recipe.original_recipe_id,
                    recipe.created_at.format("%Y-%m-%d %H:%M")
                );
            }
        }
    }

    Ok(())
}

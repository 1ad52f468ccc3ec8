mod calories;
mod import;
mod translations;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recetas_core::LanguageConfig;
use recetas_server::db::{self, DbConn};
use recetas_server::store;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "recetas")]
#[command(about = "Recetas maintenance CLI", long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "DATABASE_URL", default_value = "recipes.db", global = true)]
    database_url: String,

    /// Comma-separated languages accepted for overlays and lookups
    #[arg(long, env = "RECETAS_LANGUAGES", default_value = "es,en,zh", global = true)]
    languages: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import markdown recipes from a directory, updating files imported before
    Import {
        /// Directory containing .md recipe files
        #[arg(long, default_value = "recipes")]
        dir: PathBuf,
    },
    /// Manage translation overlays
    Translations {
        #[command(subcommand)]
        command: TranslationCommands,
    },
    /// Print a recipe resolved for a language
    Resolve {
        id: i32,
        #[arg(long, default_value = "es")]
        language: String,
    },
    /// Search recipes the way the web index does
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value = "es")]
        language: String,
    },
    /// List base-language categories
    Categories {
        /// List the categories the importer assigns instead
        #[arg(long)]
        known: bool,
    },
    /// Estimate calories from ingredients and store them on each recipe
    Calories {
        /// Print estimates without saving them
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
enum TranslationCommands {
    /// Upsert overlays from a JSON file mapping recipe id to fields
    Import {
        #[arg(long)]
        language: String,
        file: PathBuf,
    },
    /// Print every overlay stored for a recipe
    Show { id: i32 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let languages = LanguageConfig::from_list(&cli.languages, recetas_core::BASE_LANGUAGE)
        .context("invalid --languages")?;

    let pool = db::create_pool(&cli.database_url)
        .with_context(|| format!("failed to open database {}", cli.database_url))?;
    let mut conn: DbConn = pool.get()?;

    match cli.command {
        Commands::Import { dir } => {
            let summary = import::import_dir(&mut conn, &dir)?;
            println!(
                "Imported {} recipes ({} new, {} updated, {} failed)",
                summary.created + summary.updated,
                summary.created,
                summary.updated,
                summary.failed
            );
        }
        Commands::Translations { command } => match command {
            TranslationCommands::Import { language, file } => {
                require_language(&languages, &language)?;
                let summary = translations::import_file(&mut conn, &language, &file)?;
                println!(
                    "Upserted {} '{}' overlays ({} skipped)",
                    summary.upserted, language, summary.skipped
                );
            }
            TranslationCommands::Show { id } => {
                let overlays = store::list_translations(&mut conn, id)?;
                println!("{}", serde_json::to_string_pretty(&overlays)?);
            }
        },
        Commands::Resolve { id, language } => {
            require_language(&languages, &language)?;
            match store::resolve_one(&mut conn, id, &language)? {
                Some(recipe) => println!("{}", serde_json::to_string_pretty(&recipe)?),
                None => bail!("recipe {id} not found"),
            }
        }
        Commands::Search {
            query,
            category,
            language,
        } => {
            require_language(&languages, &language)?;
            for recipe in store::search(&mut conn, &query, category.as_deref(), &language)? {
                println!("{:>5}  {}  [{}]", recipe.id, recipe.title, recipe.category);
            }
        }
        Commands::Categories { known: true } => {
            for category in recetas_core::categorizer::known_categories() {
                println!("{category}");
            }
        }
        Commands::Categories { known: false } => {
            for category in store::list_categories(&mut conn)? {
                println!("{category}");
            }
        }
        Commands::Calories { dry_run } => {
            calories::estimate_all(&mut conn, dry_run)?;
        }
    }

    Ok(())
}

fn require_language(languages: &LanguageConfig, code: &str) -> Result<()> {
    if !languages.is_supported(code) {
        bail!(
            "unsupported language '{}' (configured: {})",
            code,
            languages
                .supported()
                .iter()
                .map(|l| l.code.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

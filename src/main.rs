use clap::{Parser, Subcommand};
use entity_map::config::AppConfig;
use entity_map::data;
use entity_map::session::MapSession;
use entity_map::types::Category;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the entity count for each category filter
    Summary,
    /// List names matching a partial query
    Suggest {
        query: String,
    },
    /// Locate an entity by name, as if Enter were pressed in the search box
    Locate {
        name: String,
    },
    /// List entities left on the map after hiding some categories
    List {
        #[arg(long, value_name = "CATEGORY")]
        hide: Vec<Category>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let app_config = AppConfig::load_from_file(&cli.config)?;

    // A feed failure leaves an empty map; the commands still run.
    let raw = data::load_entities_or_empty(&app_config.input.entities, &app_config.input.properties).await;
    let mut session = MapSession::new(&raw, &app_config);

    match &cli.command {
        Commands::Summary if cli.json => {
            println!("{}", serde_json::to_string_pretty(&session.filters())?);
        }
        Commands::Summary => {
            for filter in session.filters() {
                println!("{} ({})", filter.label, filter.count);
            }
        }
        Commands::Suggest { query } => {
            for name in session.suggest(query) {
                println!("{}", name);
            }
        }
        Commands::Locate { name } if cli.json => {
            println!("{}", serde_json::to_string_pretty(&session.commit(name))?);
        }
        Commands::Locate { name } => match session.commit(name) {
            Some(action) => {
                let p = &action.payload;
                println!("{}", p.name);
                println!("  Categoría: {}", p.category_label);
                println!("  Dirección: {}", p.address);
                println!("  Localidad: {}", p.locality);
                if let Some(url) = &p.contact_url {
                    println!("  Sitio web: {}", url);
                }
                println!("  Temáticas: {}", p.themes);
                println!(
                    "  Center: ({}, {}) zoom {}",
                    action.center.x(),
                    action.center.y(),
                    action.zoom
                );
            }
            None => println!("No entity named {:?}", name),
        },
        Commands::List { hide } => {
            for category in hide {
                session.set_active(*category, false);
            }
            for entity in session.visible_entities() {
                println!(
                    "{}\t{}\t{}, {}",
                    entity.category.label(),
                    entity.name,
                    entity.coordinates.x(),
                    entity.coordinates.y()
                );
            }
        }
    }

    Ok(())
}

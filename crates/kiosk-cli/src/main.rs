use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use kiosk_core::{Catalog, GroupSummary, Item, SelectionSummary, SequenceEdit};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kiosk", about = "Kiosk storefront catalog CLI")]
struct Cli {
    /// Catalog TOML file (default: $KIOSK_CATALOG_PATH, then the built-in sample)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List groups with item counts
    Groups,
    /// List every item of a group
    Items {
        /// Group id (e.g., "Group-0")
        group: String,
    },
    /// Show the group's top-item window
    Top {
        group: String,
    },
    /// Show the selection card for an item
    Show {
        /// Item id; must identify exactly one item
        id: String,
    },
    /// Replay a JSON array of edits against a group, printing the window after each
    Replay {
        group: String,
        /// Path to a JSON file containing an array of edits
        edits: PathBuf,
    },
    /// List item ids shared by more than one item
    Duplicates,
    /// Send a JSON array of edits to the running daemon
    Apply {
        group: String,
        edits: PathBuf,
    },
    /// Show daemon status
    Status,
}

#[zbus::proxy(
    interface = "org.kiosk.Catalog1",
    default_service = "org.kiosk.Catalog1",
    default_path = "/org/kiosk/Catalog1"
)]
trait KioskCatalog {
    async fn apply_edit(&self, group: &str, edit: &str) -> zbus::Result<String>;
    async fn status(&self) -> zbus::Result<String>;
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Groups => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            for group in catalog.groups() {
                println!("{}", GroupSummary::from_group(group));
            }
        }
        Commands::Items { group } => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            print_items(catalog.group(&group)?.items());
        }
        Commands::Top { group } => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            print_items(catalog.group(&group)?.top_items());
        }
        Commands::Show { id } => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            let item = catalog.item(&id)?;
            println!("{}", SelectionSummary::from_item(item));
        }
        Commands::Replay { group, edits } => {
            let mut catalog = open_catalog(cli.catalog.as_deref())?;
            for (n, edit) in read_edits(&edits)?.into_iter().enumerate() {
                let kind = edit.kind();
                catalog
                    .apply(&group, edit)
                    .with_context(|| format!("edit #{n} ({kind}) failed"))?;
                println!("after #{n} {kind}:");
                print_items(catalog.group(&group)?.top_items());
            }
        }
        Commands::Duplicates => {
            let catalog = open_catalog(cli.catalog.as_deref())?;
            let duplicates = catalog.duplicate_item_ids();
            if duplicates.is_empty() {
                println!("No shared item ids");
            }
            for (id, count) in duplicates {
                println!("{id}: {count} items");
            }
        }
        Commands::Apply { group, edits } => {
            let proxy = connect().await?;
            for (n, edit) in read_edits(&edits)?.into_iter().enumerate() {
                let kind = edit.kind();
                let payload = serde_json::to_string(&edit)?;
                let top = proxy
                    .apply_edit(&group, &payload)
                    .await
                    .with_context(|| format!("edit #{n} ({kind}) rejected by kioskd"))?;
                let top: Vec<Item> = serde_json::from_str(&top)?;
                println!("after #{n} {kind}:");
                print_items(&top);
            }
        }
        Commands::Status => match connect().await {
            Ok(proxy) => {
                let status = proxy.status().await?;
                let status: serde_json::Value = serde_json::from_str(&status)?;
                println!("{}", serde_json::to_string_pretty(&status)?);
            }
            Err(e) => {
                tracing::debug!(error = %e, "daemon connection failed");
                println!("kioskd: not connected");
            }
        },
    }

    Ok(())
}

/// `--catalog`, then `KIOSK_CATALOG_PATH`, then the embedded sample.
fn open_catalog(path: Option<&Path>) -> Result<Catalog> {
    let env_path = std::env::var_os("KIOSK_CATALOG_PATH")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from);
    match path.map(Path::to_path_buf).or(env_path) {
        Some(path) => Ok(kiosk_core::load_catalog(&path)?),
        None => Ok(kiosk_core::sample_catalog()?),
    }
}

fn read_edits(path: &Path) -> Result<Vec<SequenceEdit<Item>>> {
    let src = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&src).with_context(|| format!("parsing edits in {}", path.display()))
}

async fn connect() -> Result<KioskCatalogProxy<'static>> {
    let conn = zbus::Connection::session().await?;
    Ok(KioskCatalogProxy::new(&conn).await?)
}

fn print_items(items: &[Item]) {
    if items.is_empty() {
        println!("  (empty)");
    }
    for (i, item) in items.iter().enumerate() {
        println!("{i:>3}  {:<18} {:<10} {item}", item.id, item.subtitle);
    }
}

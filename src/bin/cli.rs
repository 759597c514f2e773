use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use uuid::Uuid;

use helmdesk::authz::{default_nav, Identity, PolicyEvaluator, RoleEvaluator};
use helmdesk::docs;
use helmdesk::store::{seed, Rbac, RbacConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "helmdesk admin tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the seeded permission catalog, grouped by category
    Catalog,
    /// Evaluate a role against a navigation target offline
    Check {
        /// Role name (case-insensitive), or omit for an anonymous caller
        #[arg(long)]
        role: Option<String>,
        /// Navigation target key, e.g. "inventory"
        #[arg(long)]
        target: String,
    },
    /// Write the OpenAPI document as JSON (stdout by default)
    Openapi {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalog => {
            let rbac = Rbac::new(RbacConfig::default());
            for group in rbac.catalog.grouped() {
                println!("{}", group.category);
                for permission in &group.permissions {
                    println!("  {:<22} {}", permission.name, permission.description);
                }
            }
        }
        Commands::Check { role, target } => {
            let nav = default_nav();
            let entry = nav
                .iter()
                .find(|e| e.key == target)
                .ok_or_else(|| anyhow::anyhow!("unknown target '{target}'"))?;

            let rbac = Arc::new(Rbac::new(RbacConfig::default()));
            seed::seed_demo(&rbac)?;
            let evaluator = RoleEvaluator::new(rbac);

            let identity = match role {
                Some(role) => Identity::authenticated(Uuid::new_v4(), "cli", Some(role)),
                None => Identity::anonymous(),
            };
            let decision = evaluator.evaluate(&identity, &entry.rule);
            println!("{target}: {}", serde_json::to_string(&decision)?);
        }
        Commands::Openapi { out } => {
            let doc = docs::build_openapi(8000)?;
            let json = serde_json::to_string_pretty(&doc)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("wrote {}", path.display());
                }
                None => println!("{json}"),
            }
        }
    }

    Ok(())
}

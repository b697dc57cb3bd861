use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use uuid::Uuid;

use voyage_access::jwt::JwtConfig;
use voyage_access::models::access::NavigationResponse;
use voyage_access::{AccessConfig, AccessEvaluator, Permission, Requirement, Role};

#[derive(Parser, Debug)]
#[command(author, version, about = "voyage access control tool", long_about = None)]
struct Cli {
    /// Access config file; defaults to ACCESS_CONFIG_PATH or the built-in tables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the role → permission table
    Roles,
    /// Evaluate a permission check for a role
    Check {
        #[arg(long)]
        role: String,
        #[arg(long = "permission", required = true)]
        permissions: Vec<String>,
        /// Require every permission instead of any one
        #[arg(long)]
        all: bool,
    },
    /// Print the navigation a role can see
    Nav {
        #[arg(long)]
        role: String,
    },
    /// Load and validate an access config file
    ValidateConfig {
        #[arg(long)]
        path: PathBuf,
    },
    /// Mint a development bearer token (needs JWT_SECRET)
    Token {
        #[arg(long)]
        role: String,
        #[arg(long)]
        user_id: Option<Uuid>,
    },
}

fn main() -> anyhow::Result<()> {
    if dotenv().is_err() {
        let crate_env = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        let _ = dotenvy::from_path(crate_env);
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Roles => {
            let evaluator = load_evaluator(cli.config.as_deref())?;
            for role in Role::ALL {
                let perms: Vec<&str> = evaluator
                    .config()
                    .table
                    .sorted_permissions(role)
                    .into_iter()
                    .map(Permission::as_str)
                    .collect();
                let listed = if perms.is_empty() { "-".to_string() } else { perms.join(", ") };
                println!("{:<10} {}", role, listed);
            }
        }
        Commands::Check { role, permissions, all } => {
            let evaluator = load_evaluator(cli.config.as_deref())?;
            let role = parse_role(&role)?;
            let permissions: Vec<Permission> = permissions.into_iter().map(Permission::from).collect();
            let allowed = if all {
                evaluator.has_all_permissions(Some(role), &permissions)
            } else {
                evaluator.has_permission(Some(role), Some(&Requirement::AnyOf(permissions)))
            };
            println!("{}", if allowed { "allowed" } else { "denied" });
        }
        Commands::Nav { role } => {
            let evaluator = load_evaluator(cli.config.as_deref())?;
            let role = parse_role(&role)?;
            let nav = NavigationResponse::new(role, evaluator.accessible_navigation(Some(role)));
            println!("{}", serde_json::to_string_pretty(&nav)?);
        }
        Commands::ValidateConfig { path } => {
            let config = AccessConfig::from_path(&path)?;
            let granted: usize = Role::ALL
                .iter()
                .map(|role| config.table.sorted_permissions(*role).len())
                .sum();
            println!(
                "{} is valid: {} grants, {} sections, {} settings entries, {} routes",
                path.display(),
                granted,
                config.navigation.sections.len(),
                config.settings.len(),
                config.routes.rules().len()
            );
        }
        Commands::Token { role, user_id } => {
            let role = parse_role(&role)?;
            let jwt = JwtConfig::from_env()?;
            let token = jwt.encode(user_id.unwrap_or_else(Uuid::new_v4), role)?;
            println!("{}", token);
        }
    }

    Ok(())
}

fn parse_role(name: &str) -> anyhow::Result<Role> {
    name.parse::<Role>().with_context(|| "expected one of admin, moderator, employee, customer")
}

fn load_evaluator(path: Option<&std::path::Path>) -> anyhow::Result<AccessEvaluator> {
    let config = match path {
        Some(path) => AccessConfig::from_path(path)?,
        None => AccessConfig::from_env()?,
    };
    Ok(AccessEvaluator::new(config))
}

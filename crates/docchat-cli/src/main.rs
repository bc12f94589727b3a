use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docchat_core::user::Gender;

mod bootstrap;
mod commands;

#[derive(Parser)]
#[command(name = "docchat")]
#[command(about = "docchat - chat with your PDF workspaces from the terminal", long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and cache the session locally
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "")]
        mobile: String,
        /// MALE, FEMALE or OTHER
        #[arg(long, default_value = "OTHER")]
        gender: Gender,
    },
    /// Forget the cached sign-in
    Logout,
    /// Show the signed-in user
    Whoami,
    /// List workspaces and their documents
    Workspaces,
    /// Create a workspace
    CreateWorkspace { name: String },
    /// Delete a workspace (by id or name)
    DeleteWorkspace { workspace: String },
    /// Delete a document from a workspace (by id or file name)
    DeleteDocument { workspace: String, document: String },
    /// List users (admin only)
    Users,
    /// Chat with the documents of a workspace
    Chat {
        /// Workspace id or name
        workspace: String,
        /// Upload this PDF before chatting
        #[arg(long)]
        upload: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let services = bootstrap::build_services(cli.config.as_deref()).await?;

    match cli.command {
        Commands::Signin { email, password } => {
            commands::auth::signin(&services, email, password).await?
        }
        Commands::Signup {
            name,
            email,
            password,
            mobile,
            gender,
        } => commands::auth::signup(&services, name, email, password, mobile, gender).await?,
        Commands::Logout => commands::auth::logout(&services).await,
        Commands::Whoami => commands::auth::whoami(&services).await?,
        Commands::Users => commands::auth::users(&services).await?,
        Commands::Workspaces => commands::workspace::list(&services).await?,
        Commands::CreateWorkspace { name } => commands::workspace::create(&services, &name).await?,
        Commands::DeleteWorkspace { workspace } => {
            commands::workspace::delete(&services, &workspace).await?
        }
        Commands::DeleteDocument {
            workspace,
            document,
        } => commands::workspace::delete_document(&services, &workspace, &document).await?,
        Commands::Chat { workspace, upload } => {
            commands::chat::run(&services, &workspace, upload.as_deref()).await?
        }
    }

    Ok(())
}

//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "muse")]
#[command(about = "Muse catalog administration console", long_about = None)]
pub struct Cli {
    /// Configuration file path (defaults to ./muse.toml when present)
    #[arg(short, long, global = true, env = "MUSE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session credential
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        lastname: String,
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        /// Repeat the password (defaults to --password)
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Forget the stored credential
    Logout,
    /// Manage art types
    #[command(subcommand)]
    ArtTypes(ArtTypeCommand),
    /// Manage arts
    #[command(subcommand)]
    Arts(ArtCommand),
}

#[derive(Debug, Subcommand)]
pub enum ArtTypeCommand {
    /// List every art type
    List,
    /// Show one art type
    Show { id: String },
    /// Create an art type
    Create(ArtTypeFields),
    /// Update an art type; omitted fields keep their value
    Update {
        id: String,
        #[command(flatten)]
        fields: ArtTypeFields,
    },
    /// Deactivate an art type
    Deactivate {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ArtTypeFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

#[derive(Debug, Subcommand)]
pub enum ArtCommand {
    /// List every art with its art type
    List,
    /// Show one art
    Show { id: String },
    /// Create an art
    Create(ArtFields),
    /// Update an art; omitted fields keep their value
    Update {
        id: String,
        #[command(flatten)]
        fields: ArtFields,
    },
    /// Deactivate an art
    Deactivate {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ArtFields {
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    /// Creation date as YYYY-MM-DD
    #[arg(long)]
    pub creation_date: Option<String>,
    /// Art type id
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub image_url: Option<String>,
    #[arg(long)]
    pub active: Option<bool>,
}

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use passfile_core::{platform, MasterKey};

mod commands;
mod table;

/// Passfile - save and load private data from a JSON file
#[derive(Parser)]
#[command(name = "passfile", version)]
#[command(about = "Save and load private data from a JSON file", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or update a record
    #[command(alias = "a")]
    Add(AddArgs),

    /// Find records
    #[command(alias = "g")]
    Get(GetArgs),

    /// Output every record, decrypted
    #[command(name = "get-all", alias = "l")]
    GetAll,

    /// Remove a record
    #[command(alias = "r")]
    Rm(RmArgs),
}

#[derive(Args)]
pub struct AddArgs {
    /// Service name the record belongs to
    pub service_name: String,

    /// ID (also the merge key, together with --mail)
    #[arg(short, long)]
    pub id: String,

    /// Password, encrypted before it touches the file
    #[arg(short, long)]
    pub pass: Option<String>,

    /// E-mail
    #[arg(short, long)]
    pub mail: Option<String>,

    /// URL
    #[arg(short, long)]
    pub url: Option<String>,

    /// Free text
    #[arg(short, long)]
    pub text: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("criteria").required(true).multiple(true)))]
pub struct GetArgs {
    /// Free-text query matched against service names and every field
    #[arg(group = "criteria")]
    pub query: Option<String>,

    /// ID filter
    #[arg(short, long, group = "criteria")]
    pub id: Option<String>,

    /// Password filter (matched against the decrypted password)
    #[arg(short, long, group = "criteria")]
    pub pass: Option<String>,

    /// E-mail filter
    #[arg(short, long, group = "criteria")]
    pub mail: Option<String>,

    /// URL filter
    #[arg(short, long, group = "criteria")]
    pub url: Option<String>,

    /// Free-text field filter
    #[arg(short, long, group = "criteria")]
    pub text: Option<String>,
}

#[derive(Args)]
#[command(group(ArgGroup::new("criteria").required(true).multiple(true)))]
pub struct RmArgs {
    /// Service name to remove from
    pub service_name: String,

    /// ID, matched exactly
    #[arg(short, long, group = "criteria")]
    pub id: Option<String>,

    /// E-mail, matched exactly
    #[arg(short, long, group = "criteria")]
    pub mail: Option<String>,
}

fn main() -> Result<()> {
    // Diagnostics go to stderr so they never interleave with table output.
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let cli = Cli::parse();

    // The master key gates every command; resolve it before any file IO.
    let key = MasterKey::from_env()?;
    let store_path = platform::default_store_path();

    match cli.command {
        Commands::Add(args) => commands::add(&store_path, &key, args),
        Commands::Get(args) => commands::get(&store_path, &key, args),
        Commands::GetAll => commands::get_all(&store_path, &key),
        Commands::Rm(args) => commands::rm(&store_path, args),
    }
}

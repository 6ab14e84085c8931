//! Lumiere command line client
//!
//! Scriptable access to the same admin operations as the TUI, plus the
//! customer-side account, voucher and skin quiz flows.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use lumiere_api::{EntityId, ResourceKind};
use lumiere_core::Config;

mod commands;
mod prompt;

use commands::Context;

#[derive(Parser)]
#[command(name = "lumiere", version, about = "Lumiere storefront client")]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    server: Option<String>,

    /// Path to lumiere.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log requests to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session token
    Login {
        #[arg(short, long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Forget the session token
    Logout,
    /// List one page of a resource
    List {
        kind: ResourceKind,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Case-insensitive name filter
        #[arg(short, long)]
        search: Option<String>,
        /// Print the raw records as JSON
        #[arg(long)]
        json: bool,
    },
    /// Create a record from field=value pairs
    Create {
        kind: ResourceKind,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Change fields of an existing record
    Edit {
        kind: ResourceKind,
        id: EntityId,
        #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_assignment)]
        fields: Vec<(String, String)>,
    },
    /// Delete a record (soft or hard, depending on the resource)
    Delete {
        kind: ResourceKind,
        id: EntityId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Attach an image to a product or blog post
    UploadImage {
        kind: ResourceKind,
        id: EntityId,
        file: PathBuf,
    },
    /// Redeemable vouchers, affordable ones first
    Vouchers {
        /// Points balance to compare against instead of the profile's
        #[arg(long)]
        points: Option<u32>,
        /// Order total used to preview the discount, in VND
        #[arg(long)]
        total: Option<u64>,
    },
    /// Take the skin type quiz
    Quiz,
    /// Recent quiz results stored on this machine
    QuizHistory,
    /// Account profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the signed-in profile
    Show,
    /// Pick a shipping address province by province
    Address,
}

fn parse_assignment(raw: &str) -> std::result::Result<(String, String), String> {
    raw.split_once('=')
        .map(|(field, value)| (field.trim().to_string(), value.to_string()))
        .filter(|(field, _)| !field.is_empty())
        .ok_or_else(|| format!("expected FIELD=VALUE, got `{raw}`"))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    let mut ctx = Context::new(config, cli.server)?;

    match cli.command {
        Commands::Login { email, password } => ctx.login(&email, password).await,
        Commands::Logout => ctx.logout(),
        Commands::List {
            kind,
            page,
            search,
            json,
        } => ctx.list(kind, page, search, json).await,
        Commands::Create { kind, fields } => ctx.create(kind, &fields).await,
        Commands::Edit { kind, id, fields } => ctx.edit(kind, &id, &fields).await,
        Commands::Delete { kind, id, yes } => ctx.delete(kind, &id, yes).await,
        Commands::UploadImage { kind, id, file } => ctx.upload_image(kind, &id, &file).await,
        Commands::Vouchers { points, total } => ctx.vouchers(points, total).await,
        Commands::Quiz => ctx.quiz().await,
        Commands::QuizHistory => ctx.quiz_history(),
        Commands::Profile { command } => match command {
            ProfileCommands::Show => ctx.show_profile().await,
            ProfileCommands::Address => ctx.pick_address().await,
        },
    }
}

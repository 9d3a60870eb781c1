mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "fdel")]
#[command(about = "Build, share, and map food delivery routes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the locator of a fresh route
    New,
    /// Print a locator's route as JSON
    Decode {
        /// Locator, or a full share link ending in `#<locator>`
        locator: String,
    },
    /// Print the delivery manifest for a route
    Manifest { locator: String },
    /// Geocode every stop and print the resulting markers
    Map { locator: String },
    /// Append a stop and print the new share link
    AddStop {
        locator: String,
        #[arg(long)]
        address: String,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Remove a form row (1-based, blank rows included) and print the new share link
    RemoveStop { locator: String, row: usize },
    /// Set a route field and print the new share link
    Set {
        locator: String,
        field: RouteField,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum RouteField {
    RouteName,
    Pickup,
    Date,
    Time,
}

impl RouteField {
    fn form_name(self) -> &'static str {
        match self {
            RouteField::RouteName => fdel_core::form::ROUTE_NAME,
            RouteField::Pickup => fdel_core::form::PICKUP_LOCATION_KEY,
            RouteField::Date => fdel_core::form::DATE,
            RouteField::Time => fdel_core::form::TIME,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = fdel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::New => commands::run_new()?,
        Commands::Decode { locator } => commands::run_decode(&locator)?,
        Commands::Manifest { locator } => commands::run_manifest(&config, &locator)?,
        Commands::Map { locator } => commands::run_map(&config, &locator).await?,
        Commands::AddStop {
            locator,
            address,
            quantity,
            notes,
        } => commands::run_edit(
            &config,
            &locator,
            &commands::Edit::AddStop {
                address,
                quantity,
                notes,
            },
        )?,
        Commands::RemoveStop { locator, row } => {
            commands::run_edit(&config, &locator, &commands::Edit::RemoveRow(row))?;
        }
        Commands::Set {
            locator,
            field,
            value,
        } => commands::run_edit(
            &config,
            &locator,
            &commands::Edit::SetField {
                name: field.form_name(),
                value,
            },
        )?,
    }

    Ok(())
}

//! Maintenance CLI for the venue directory.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;
use tracing_subscriber::EnvFilter;

use guia_common::Config;
use guia_store::{reset_database, run_migrations, seed_demo, Venue};
use guia_zones::{is_valid_radius, ZoneAssigner, ZoneCatalog, ZoneProfile};

#[derive(Parser)]
#[command(name = "guia-admin")]
#[command(about = "Venue directory maintenance")]
#[command(version)]
struct Cli {
    /// Zone catalog to use (defaults to ZONE_PROFILE)
    #[arg(long, global = true)]
    profile: Option<ZoneProfile>,

    /// Maximum distance in km from a zone centroid (defaults to ZONE_RADIUS_KM)
    #[arg(long, global = true, value_parser = parse_radius)]
    radius_km: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_radius(raw: &str) -> Result<f64, String> {
    let km: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if is_valid_radius(km) {
        Ok(km)
    } else {
        Err("radius must be a finite, non-negative number of km".to_string())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Apply database migrations
    Migrate,

    /// Load the demo dataset when the directory is empty
    Seed,

    /// Recompute every active venue's zone from its coordinates
    AssignZones {
        /// Report without writing labels
        #[arg(long)]
        dry_run: bool,
    },

    /// Print venue counts per stored zone label as JSON
    Distribution,

    /// Delete all reviews, venues and zones
    Reset {
        /// Required to actually delete
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {:#}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_env()?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await?;

    let assigner = ZoneAssigner::new(
        Arc::new(ZoneCatalog::from_profile(cli.profile.unwrap_or(config.zone_profile))),
        cli.radius_km.unwrap_or(config.zone_radius_km),
    );

    match cli.command {
        Commands::Migrate => {
            run_migrations(&pool).await?;
            info!("Migrations complete");
        }
        Commands::Seed => match seed_demo(&pool).await? {
            Some(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
            None => println!("Venues already present, nothing seeded"),
        },
        Commands::AssignZones { dry_run } => assign_zones(&assigner, &pool, dry_run).await?,
        Commands::Distribution => {
            let venues = Venue::all_active(&pool).await?;
            let distribution = assigner.zone_distribution(&venues);
            println!("{}", serde_json::to_string_pretty(&distribution)?);
        }
        Commands::Reset { yes } => {
            if !yes {
                anyhow::bail!("refusing to reset without --yes");
            }
            let summary = reset_database(&pool).await?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

async fn assign_zones(assigner: &ZoneAssigner, pool: &PgPool, dry_run: bool) -> Result<()> {
    let venues = Venue::all_active(pool).await?;
    let assignments = assigner.assign_all(&venues);

    let mut changed = Vec::new();
    for (venue, assignment) in venues.iter().zip(&assignments) {
        let label = assignment.label();
        if venue.zone.as_deref() != Some(label) {
            println!(
                "{:<40} {:>20} -> {}",
                venue.name,
                venue.zone.as_deref().unwrap_or("-"),
                label
            );
            changed.push((venue.id, label.to_string()));
        }
    }

    let assigned = assignments.iter().filter(|a| a.is_assigned()).count();
    println!(
        "{} venues, {} in a zone, {} labels changed",
        venues.len(),
        assigned,
        changed.len()
    );

    if dry_run {
        println!("Dry run, nothing written");
        return Ok(());
    }

    let updated = Venue::update_zones(&changed, pool).await?;
    info!(updated, "Zone labels written");
    Ok(())
}

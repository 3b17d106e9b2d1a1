//! Landmark Matrix CLI
//!
//! Resolves a location reference, or measures travel between a target and a
//! list of landmarks, printing JSON to stdout.

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use landmark_matrix::parser::parse_lat_lng_pair;
use landmark_matrix::{Config, Landmark, Services, TravelMode};

#[derive(Debug, Parser)]
#[command(name = "landmark_matrix", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a map link or place text to coordinates
    Resolve {
        /// Full or shortened map link, or free text
        input: String,
    },
    /// Travel distance/duration between a target and landmarks, both ways
    Matrix {
        /// Target location reference (link or text)
        #[arg(long)]
        target: String,
        /// Landmark as `NAME=LAT,LNG`; repeat for several
        #[arg(long = "landmark", value_parser = parse_landmark_arg, required = true)]
        landmarks: Vec<(String, String)>,
        /// driving, walking, bicycling or transit
        #[arg(long, default_value = "driving")]
        mode: TravelMode,
    },
}

/// Splits `NAME=LAT,LNG`.
fn parse_landmark_arg(raw: &str) -> Result<(String, String), String> {
    let (name, coords) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=LAT,LNG, got '{raw}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("landmark name is empty in '{raw}'"));
    }
    Ok((name.to_string(), coords.to_string()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "landmark_matrix=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::from_env();
    info!(
        "Configuration loaded: geocode_ttl={}s, distance_ttl={}s, provider_timeout={}s, rate_limit={}/{}s",
        config.geocode_cache_ttl,
        config.distance_cache_ttl,
        config.provider_timeout,
        config.rate_limit_max_requests,
        config.rate_limit_window
    );

    let services = Services::from_config(&config).context("failed to initialise services")?;

    match cli.command {
        Command::Resolve { input } => {
            let coords = services
                .resolver
                .resolve(&input)
                .await
                .context("geocoding provider failed")?
                .ok_or_else(|| anyhow!("could not resolve location: {input}"))?;
            println!("{}", serde_json::to_string_pretty(&coords)?);
        }
        Command::Matrix {
            target,
            landmarks,
            mode,
        } => {
            let target_coords = services
                .resolver
                .resolve(&target)
                .await
                .context("geocoding provider failed")?
                .ok_or_else(|| anyhow!("could not resolve target location: {target}"))?;

            let landmarks = landmarks
                .into_iter()
                .enumerate()
                .map(|(index, (name, coords))| {
                    let Some(location) = parse_lat_lng_pair(&coords) else {
                        bail!("invalid coordinates for landmark '{name}': {coords}");
                    };
                    Ok(Landmark::new((index + 1).to_string(), name, location))
                })
                .collect::<anyhow::Result<Vec<_>>>()?;

            info!(target_location = %target_coords, landmarks = landmarks.len(), %mode, "Computing travel matrix");
            let rows = services
                .matrix
                .compute_matrix(target_coords, &landmarks, mode)
                .await;
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }

    let stats = services.stats().await;
    info!(geocode = %stats.geocode, "Cache stats");
    info!(distance = %stats.distance, "Cache stats");
    info!(short_links = %stats.short_links, "Cache stats");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_landmark_arg() {
        assert_eq!(
            parse_landmark_arg("Office=40.75,-73.98").unwrap(),
            ("Office".to_string(), "40.75,-73.98".to_string())
        );
        assert!(parse_landmark_arg("40.75,-73.98").is_err());
        assert!(parse_landmark_arg(" =1,2").is_err());
    }

    #[test]
    fn test_cli_parses_matrix_command() {
        let cli = Cli::try_parse_from([
            "landmark_matrix",
            "matrix",
            "--target",
            "Eiffel Tower",
            "--landmark",
            "Louvre=48.8606,2.3376",
            "--mode",
            "walking",
        ])
        .unwrap();

        match cli.command {
            Command::Matrix { landmarks, mode, .. } => {
                assert_eq!(landmarks.len(), 1);
                assert_eq!(mode, TravelMode::Walking);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::models::SchemaVersion;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: PathBuf,
    pub schema: SchemaVersion,
    pub seed: bool,
    pub dev_mode: bool,
    pub log_level: String,
}

/// Command-line flags. They take precedence over the environment.
#[derive(Debug, Default, Parser)]
#[command(name = "minerva-backend", about = "Backend service for the Minerva API client")]
pub struct Cli {
    /// Address to bind the HTTP listener to
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to bind the HTTP listener to
    #[arg(long)]
    pub port: Option<u16>,

    /// Path of the SQLite database file
    #[arg(long)]
    pub database: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let host: IpAddr = env_or("MINERVA_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid MINERVA_HOST: {e}"))?;

        let port: u16 = env_or("MINERVA_PORT", "50051")
            .parse()
            .map_err(|e| format!("Invalid MINERVA_PORT: {e}"))?;

        let database_path = match lookup("MINERVA_DATABASE_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_database_path()?,
        };

        let schema = match env_or("MINERVA_SCHEMA", "structured").as_str() {
            "structured" => SchemaVersion::Structured,
            "flat" => SchemaVersion::Flat,
            other => return Err(format!("Invalid MINERVA_SCHEMA: {other} (expected 'flat' or 'structured')")),
        };

        let seed = parse_bool("MINERVA_SEED", &env_or("MINERVA_SEED", "true"))?;

        // Anything other than "true" leaves development mode off.
        let dev_mode = lookup("DEV_MODE").is_some_and(|v| v == "true");

        let log_level = env_or("MINERVA_LOG_LEVEL", if dev_mode { "debug" } else { "info" });

        Ok(Config {
            host,
            port,
            database_path,
            schema,
            seed,
            dev_mode,
            log_level,
        })
    }

    pub fn apply_cli(mut self, cli: Cli) -> Self {
        if let Some(host) = cli.host {
            self.host = host;
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(database) = cli.database {
            self.database_path = database;
        }
        self
    }
}

/// `data/minerva.db` next to the running executable.
fn default_database_path() -> Result<PathBuf, String> {
    let exe = std::env::current_exe().map_err(|e| format!("Cannot locate executable: {e}"))?;
    let dir = exe
        .parent()
        .ok_or_else(|| "Executable has no parent directory".to_string())?;
    Ok(dir.join("data").join("minerva.db"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    match value {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(format!("Invalid {key}: {other}")),
    }
}

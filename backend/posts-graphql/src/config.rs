//! Configuration for the posts GraphQL service
//!
//! Loads settings from environment variables, with a `.env` file honoured for
//! local development.

use anyhow::{bail, Context, Result};
use db_pool::DbConfig;
use std::env;

use crate::models::UserId;

pub const SERVICE_NAME: &str = "posts-graphql";

#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,

    /// Connection pool settings
    pub database: DbConfig,

    /// Apply embedded migrations on startup
    pub run_migrations: bool,

    /// Simulated authentication
    pub auth: AuthConfig,

    /// GraphQL configuration
    pub graphql: GraphQLConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct AuthConfig {
    /// User every request acts as
    pub acting_user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct GraphQLConfig {
    /// Serve GraphiQL at /playground
    pub playground: bool,
    /// Max query depth
    pub max_depth: usize,
    /// Max query complexity
    pub max_complexity: usize,
    /// Enable introspection
    pub introspection: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            playground: false,
            max_depth: 10,
            max_complexity: 1000,
            introspection: true,
        }
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env`)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DbConfig::from_lookup(SERVICE_NAME, &lookup)
            .context("Invalid database configuration")?;

        let acting_user_id: UserId = parse_or(&lookup, "ACTING_USER_ID", 1)?;
        if acting_user_id <= 0 {
            bail!("ACTING_USER_ID must be a positive integer, got {}", acting_user_id);
        }

        let graphql_defaults = GraphQLConfig::default();

        Ok(Self {
            server: ServerConfig {
                host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "SERVER_PORT", 8080)?,
                workers: parse_or(&lookup, "SERVER_WORKERS", num_cpus::get())?,
            },
            database,
            run_migrations: parse_or(&lookup, "RUN_MIGRATIONS", true)?,
            auth: AuthConfig { acting_user_id },
            graphql: GraphQLConfig {
                playground: parse_or(&lookup, "GRAPHQL_PLAYGROUND", graphql_defaults.playground)?,
                max_depth: parse_or(&lookup, "GRAPHQL_MAX_DEPTH", graphql_defaults.max_depth)?,
                max_complexity: parse_or(
                    &lookup,
                    "GRAPHQL_MAX_COMPLEXITY",
                    graphql_defaults.max_complexity,
                )?,
                introspection: parse_or(
                    &lookup,
                    "GRAPHQL_INTROSPECTION",
                    graphql_defaults.introspection,
                )?,
            },
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}={:?}: {}", key, raw, e)),
        None => Ok(default),
    }
}

//! Runtime configuration, read from `ROSTER_*` environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ROSTER_ADDR` | `0.0.0.0:3000` | listen address |
//! | `ROSTER_ID_POLICY` | `max-plus-one` | `max-plus-one` or `monotonic` |
//! | `ROSTER_SEED` | `true` | start with the two demo students |

use std::net::SocketAddr;

use crate::error::Error;
use crate::store::{IdPolicy, StudentStore};

pub const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub addr: SocketAddr,
    pub id_policy: IdPolicy,
    pub seed: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key/value source. Unset keys take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let addr = lookup("ROSTER_ADDR").unwrap_or_else(|| DEFAULT_ADDR.to_owned());
        let addr = addr
            .trim()
            .parse::<SocketAddr>()
            .map_err(|source| Error::Addr { addr: addr.clone(), source })?;

        let id_policy = match lookup("ROSTER_ID_POLICY") {
            Some(raw) => raw
                .trim()
                .parse::<IdPolicy>()
                .map_err(|reason| Error::Config { key: "ROSTER_ID_POLICY", reason })?,
            None => IdPolicy::default(),
        };

        let seed = match lookup("ROSTER_SEED") {
            Some(raw) => parse_bool(&raw).ok_or_else(|| Error::Config {
                key: "ROSTER_SEED",
                reason: format!("expected a boolean, got `{raw}`"),
            })?,
            None => true,
        };

        Ok(Self { addr, id_policy, seed })
    }

    /// The store this configuration starts the service with.
    pub fn store(&self) -> StudentStore {
        if self.seed {
            StudentStore::seeded(self.id_policy)
        } else {
            StudentStore::new(self.id_policy)
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

//! Runtime options read from the page URL's query string.
//!
//! `?seed=42&scares=off&log=debug`. Unknown keys are ignored; malformed
//! values keep their default and are reported back as warnings so the
//! caller can log them once a logger exists.

use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Independent random streams derived from one seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RngStream {
    Layout = 0,
    Flicker = 1,
    Cooldown = 2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HauntConfig {
    pub seed: Option<u64>,
    pub scares_enabled: bool,
    pub log_level: LevelFilter,
}

impl Default for HauntConfig {
    fn default() -> Self {
        Self {
            seed: None,
            scares_enabled: true,
            log_level: LevelFilter::Info,
        }
    }
}

impl HauntConfig {
    pub fn from_query(query: &str) -> (Self, Vec<String>) {
        let mut cfg = Self::default();
        let mut warnings = Vec::new();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "seed" => match value.parse::<u64>() {
                    Ok(seed) => cfg.seed = Some(seed),
                    Err(_) => warnings.push(format!("ignoring seed={value:?}: not an unsigned integer")),
                },
                "scares" => match value {
                    "on" | "1" | "true" => cfg.scares_enabled = true,
                    "off" | "0" | "false" => cfg.scares_enabled = false,
                    _ => warnings.push(format!("ignoring scares={value:?}: expected on or off")),
                },
                "log" => match value.parse::<LevelFilter>() {
                    Ok(level) => cfg.log_level = level,
                    Err(_) => warnings.push(format!("ignoring log={value:?}: unknown level")),
                },
                _ => {}
            }
        }
        (cfg, warnings)
    }

    /// Seeded generator for `stream`, or an entropy-seeded one when no seed was given.
    pub fn rng(&self, stream: RngStream) -> StdRng {
        match self.seed {
            Some(seed) => {
                StdRng::seed_from_u64(seed ^ (stream as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
            }
            None => StdRng::from_entropy(),
        }
    }
}

//! Configuration from environment variables.

use anyhow::Context;
use memory_core::GameConfig;
use std::str::FromStr;

pub const PAIRS_VAR: &str = "MEMORY_PAIRS";
pub const REVEAL_MS_VAR: &str = "MEMORY_REVEAL_MS";
pub const TILE_WIDTH_VAR: &str = "MEMORY_TILE_WIDTH";
pub const SEED_VAR: &str = "MEMORY_SEED";

/// Build the game configuration from the process environment
pub fn from_env() -> anyhow::Result<GameConfig> {
    from_lookup(|name| std::env::var(name).ok())
}

/// Build the game configuration from any variable lookup.
///
/// Unset variables keep their defaults.
pub fn from_lookup<F>(lookup: F) -> anyhow::Result<GameConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = GameConfig::default();

    if let Some(pairs) = parse_var(&lookup, PAIRS_VAR)? {
        config.pair_count = pairs;
    }
    if let Some(ms) = parse_var(&lookup, REVEAL_MS_VAR)? {
        config.reveal_delay_ms = ms;
    }
    if let Some(width) = parse_var(&lookup, TILE_WIDTH_VAR)? {
        config.layout.tile_width = width;
    }
    config.seed = parse_var(&lookup, SEED_VAR)?;

    config.validate().context("Invalid game configuration")?;
    Ok(config)
}

fn parse_var<F, T>(lookup: &F, name: &str) -> anyhow::Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .with_context(|| format!("{} has invalid value `{}`", name, raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_lookup(lookup(&[
            (PAIRS_VAR, "4"),
            (REVEAL_MS_VAR, "250"),
            (TILE_WIDTH_VAR, "20"),
            (SEED_VAR, "99"),
        ]))
        .unwrap();

        assert_eq!(config.pair_count, 4);
        assert_eq!(config.reveal_delay_ms, 250);
        assert_eq!(config.layout.tile_width, 20);
        assert_eq!(config.seed, Some(99));
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = from_lookup(lookup(&[(PAIRS_VAR, "lots")])).unwrap_err();
        assert!(err.to_string().contains(PAIRS_VAR));

        assert!(from_lookup(lookup(&[(PAIRS_VAR, "0")])).is_err());
    }
}

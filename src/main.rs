use std::env::{self, VarError};
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use dotenvy::dotenv;
use log::{info, warn};
use serde_json::json;

use pow_chain::{Blockchain, ChainConfig};

/// Parse an optional environment override, keeping `default` only when unset.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    parse_override(key, env::var(key), default)
}

fn parse_override<T>(key: &str, raw: Result<String, VarError>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}={v:?}")),
        Err(VarError::NotPresent) => Ok(default),
        Err(VarError::NotUnicode(raw)) => bail!("{key} is not valid unicode: {raw:?}"),
    }
}

fn config_from_env() -> Result<ChainConfig> {
    let base = ChainConfig::default();
    Ok(ChainConfig {
        target_block_time_ms: env_or("TARGET_BLOCK_TIME_MS", base.target_block_time_ms)?,
        adjust_every: env_or("ADJUST_EVERY", base.adjust_every)?,
        initial_difficulty: env_or("INITIAL_DIFFICULTY", base.initial_difficulty)?,
        min_difficulty: env_or("MIN_DIFFICULTY", base.min_difficulty)?,
        max_difficulty: env_or("MAX_DIFFICULTY", base.max_difficulty)?,
    })
}

fn main() -> Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = config_from_env()?;
    let blocks: u64 = env_or("DEMO_BLOCKS", 10)?;

    let mut bc = Blockchain::new(config.clone()).context("invalid chain configuration")?;
    info!("chain configured: {config:?}");

    println!("⛏️ Starting mining...\n");

    for amount in 1..=blocks {
        let ms = bc.add_block(json!({ "from": "Alice", "to": "Bob", "amount": amount }));
        let block = bc.last_block();
        println!(
            "Mined #{} | diff={} | nonce={} | time={}ms | hash={}...",
            block.index,
            block.difficulty,
            block.nonce,
            ms,
            &block.hash[..18]
        );
    }

    match bc.validate() {
        Ok(()) => println!("\nChain valid? true"),
        Err(e) => {
            warn!("chain failed validation: {e}");
            println!("\nChain valid? false ({e})");
        }
    }

    let stats = bc.stats();
    println!(
        "height={} difficulty={} avg_interval={:?}ms",
        stats.height, stats.difficulty, stats.avg_interval_ms
    );

    for violation in bc.violations() {
        warn!("{violation}");
    }

    println!("\nFull chain:\n");
    println!("{}", bc.to_json_pretty().context("serialize chain")?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    #[test]
    fn unset_variable_uses_default() {
        let v: u64 = parse_override("ADJUST_EVERY", Err(VarError::NotPresent), 3).unwrap();
        assert_eq!(v, 3);
    }

    #[test]
    fn set_variable_is_parsed() {
        let v: u32 = parse_override("MAX_DIFFICULTY", Ok(" 5 ".into()), 8).unwrap();
        assert_eq!(v, 5);
        assert!(parse_override::<u32>("MAX_DIFFICULTY", Ok("five".into()), 8).is_err());
    }

    #[test]
    fn non_unicode_value_is_an_error() {
        let raw = Err(VarError::NotUnicode(OsString::from("bad")));
        let err = parse_override::<u64>("DEMO_BLOCKS", raw, 10).unwrap_err();
        assert!(err.to_string().contains("DEMO_BLOCKS"));
    }
}

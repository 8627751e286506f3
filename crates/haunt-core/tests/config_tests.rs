// Host-side tests for query-string configuration.

use haunt_core::config::{HauntConfig, RngStream};
use log::LevelFilter;
use rand::Rng;

#[test]
fn empty_query_gives_defaults() {
    let (cfg, warnings) = HauntConfig::from_query("");
    assert_eq!(cfg, HauntConfig::default());
    assert!(cfg.scares_enabled);
    assert!(warnings.is_empty());
}

#[test]
fn recognised_keys_are_applied() {
    let (cfg, warnings) = HauntConfig::from_query("?seed=42&scares=off&log=debug&utm_source=x");
    assert_eq!(cfg.seed, Some(42));
    assert!(!cfg.scares_enabled);
    assert_eq!(cfg.log_level, LevelFilter::Debug);
    assert!(warnings.is_empty());
}

#[test]
fn malformed_values_warn_and_keep_defaults() {
    let (cfg, warnings) = HauntConfig::from_query("seed=-1&scares=maybe&log=loud");
    assert_eq!(cfg, HauntConfig::default());
    assert_eq!(warnings.len(), 3);
    assert!(warnings[0].contains("seed"));
}

#[test]
fn seeded_streams_are_reproducible_and_distinct() {
    let (cfg, _) = HauntConfig::from_query("seed=7");
    let a: u64 = cfg.rng(RngStream::Layout).gen();
    let b: u64 = cfg.rng(RngStream::Layout).gen();
    let c: u64 = cfg.rng(RngStream::Flicker).gen();
    assert_eq!(a, b);
    assert_ne!(a, c);
}

// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Building the components from configuration.

use std::error::Error as _;

use resonance::frame::{Frame, decode, encode_raw};
use resonance::{Bytes, DEFAULT_CACHE_CAPACITY, Error, Resonance, ResonanceConfig};

#[test]
fn config_deserializes_with_default_capacity() {
    let config: ResonanceConfig = serde_json::from_str(r#"{"servers": ["a", "b"], "shards": ["s0"]}"#).unwrap();
    assert_eq!(config, ResonanceConfig::new(["a", "b"], ["s0"]));
    assert_eq!(config.cache_capacity(), DEFAULT_CACHE_CAPACITY);

    let json = serde_json::to_string(&config.clone().with_cache_capacity(9)).unwrap();
    let back: ResonanceConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.cache_capacity(), 9);
}

#[test]
fn config_requires_lists() {
    let result = serde_json::from_str::<ResonanceConfig>(r#"{"servers": ["a"]}"#);
    assert!(result.is_err());
}

#[test]
fn routes_match_standalone_routers() {
    let config = ResonanceConfig::new(["app-1", "app-2", "app-3"], ["db-0", "db-1", "db-2", "db-3"]);
    let resonance = Resonance::new(&config).unwrap();

    let servers = resonance::HashRouter::new(["app-1", "app-2", "app-3"]).unwrap();
    let shards = resonance::ShardRouter::new(["db-0", "db-1", "db-2", "db-3"]).unwrap();

    for i in 0..500 {
        let key = format!("key-{i}");
        assert_eq!(resonance.server_for(&key), servers.resolve(&key));
        assert_eq!(resonance.shard_for(&key), shards.resolve_shard(&key));
    }

    assert_eq!(resonance.servers().nodes(), config.servers());
    assert_eq!(resonance.shards().shards(), config.shards());
}

#[test]
fn invalid_lists_name_the_failing_component() {
    let err = Resonance::new(&ResonanceConfig::new(Vec::<String>::new(), ["s0"])).unwrap_err();
    assert!(matches!(err, Error::Servers(resonance_routing::Error::EmptyNodeList)), "{err:?}");

    let err = Resonance::new(&ResonanceConfig::new(["a"], ["s0", "s0"])).unwrap_err();
    assert!(matches!(err, Error::Shards(_)), "{err:?}");
    assert_eq!(err.to_string(), "invalid shard list");
    assert!(err.source().is_some());
}

#[test]
fn zero_capacity_is_rejected() {
    let err = Resonance::new(&ResonanceConfig::new(["a"], ["s0"]).with_cache_capacity(0)).unwrap_err();
    assert!(matches!(err, Error::Cache(_)), "{err:?}");
}

#[test]
fn clones_share_the_cache() {
    let resonance = Resonance::new(&ResonanceConfig::new(["a"], ["s0"]).with_cache_capacity(2)).unwrap();
    let other = resonance.clone();

    let blob = encode_raw(b"rendered report");
    resonance.cache().put("report".to_string(), blob);

    let stored = other.cache().get("report").unwrap();
    assert_eq!(decode(&stored), Ok(Frame::Raw { payload: b"rendered report" }));
    assert_eq!(other.cache().access_count("report"), Some(2));

    other.cache().put("a".to_string(), Bytes::new());
    other.cache().put("b".to_string(), Bytes::new());
    assert_eq!(resonance.cache().len(), 2);
    assert!(resonance.cache().contains_key("report"));
}

#[test]
fn debug_formatting_inside_cache_section() {
    let resonance = Resonance::new(&ResonanceConfig::new(["a"], ["s0"])).unwrap();
    let rendered = resonance.cache().with_cache(|_| format!("{resonance:?}"));
    assert!(rendered.contains("SharedWeightedCache(<locked>)"), "{rendered}");
}

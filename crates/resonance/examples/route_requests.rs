// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Routes a batch of requests and memoizes rendered responses.
//!
//! Reads `RESONANCE_*` from the environment and falls back to a small local topology.

use resonance::frame::{Frame, decode, encode_raw};
use resonance::{Resonance, ResonanceConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).init();

    let config = ResonanceConfig::from_env().unwrap_or_else(|_| {
        ResonanceConfig::new(
            ["127.0.0.1:8001", "127.0.0.1:8002", "127.0.0.1:8003"],
            ["shard-0", "shard-1"],
        )
        .with_cache_capacity(4)
    });
    let resonance = Resonance::new(&config)?;

    for request in ["user1", "user2", "user3", "user1", "user4", "user5", "user1"] {
        let server = resonance.server_for(request);
        let shard = resonance.shard_for(request);

        let blob = match resonance.cache().get(request) {
            Some(blob) => blob,
            None => {
                let rendered = format!("profile of {request} from {shard}");
                let blob = encode_raw(rendered.as_bytes());
                resonance.cache().put(request.to_string(), blob.clone());
                blob
            }
        };

        if let Frame::Raw { payload } = decode(&blob)? {
            println!("{request} -> {server}: {}", String::from_utf8_lossy(payload));
        }
    }

    let stats = resonance.cache().stats();
    println!(
        "hits={} misses={} evictions={} hit_ratio={:.2}",
        stats.hits(),
        stats.misses(),
        stats.evictions(),
        stats.hit_ratio().unwrap_or_default()
    );

    Ok(())
}

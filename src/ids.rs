use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Generates ids unique within one build. A fresh generator is created per
/// `build_graph` call; the seed keeps its ids from colliding with ids minted
/// by a prior or concurrent build. Ids are NOT stable across rebuilds of the
/// same tree; consumers compare nodes by `path` instead.
#[derive(Debug)]
pub struct IdGen {
    seed: u64,
    counter: u64,
}

impl IdGen {
    pub fn new() -> Self {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        let noise: u64 = rand::rng().random();
        Self::with_seed(stamp ^ noise)
    }

    /// Fixed-seed generator, for deterministic output in tests.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed, counter: 0 }
    }

    pub fn node_id(&mut self) -> String {
        self.next("node")
    }

    pub fn edge_id(&mut self) -> String {
        self.next("edge")
    }

    fn next(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{:x}-{}", self.seed, self.counter);
        self.counter += 1;
        id
    }
}

impl Default for IdGen {
    fn default() -> Self {
        Self::new()
    }
}

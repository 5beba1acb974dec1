//! Deterministic test-data generation.
//!
//! Small seeded generators for the payloads the harness sends during
//! smoke runs and tests. Seeded so two runs produce the same sequence,
//! which keeps failures reproducible.

use serde_json::{json, Value};

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Grace", "Edsger", "Barbara", "Donald", "Radia", "Ken", "Frances",
];
const LAST_NAMES: [&str; 8] = [
    "Lovelace", "Hopper", "Dijkstra", "Liskov", "Knuth", "Perlman", "Thompson", "Allen",
];
const JOBS: [&str; 6] = [
    "engineer",
    "analyst",
    "architect",
    "operator",
    "researcher",
    "technician",
];
const COLORS: [&str; 4] = ["#98B2D1", "#C74375", "#BF1932", "#7BC4C4"];

/// A seeded generator for request payloads.
///
/// Uses a linear congruential generator internally; the same seed always
/// yields the same sequence of payloads.
#[derive(Debug)]
pub struct TestDataGenerator {
    state: u64,
}

impl Default for TestDataGenerator {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl TestDataGenerator {
    /// Creates a generator with an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed.wrapping_mul(2).wrapping_add(1),
        }
    }

    fn next(&mut self) -> u64 {
        // Numerical Recipes LCG constants
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 16
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        options[(self.next() as usize) % options.len()]
    }

    /// Generates a `{name, job}` user payload.
    pub fn user(&mut self) -> Value {
        let first = self.pick(&FIRST_NAMES);
        let last = self.pick(&LAST_NAMES);
        json!({
            "name": format!("{first} {last}"),
            "job": self.pick(&JOBS),
        })
    }

    /// Generates an `{email, password}` credential payload.
    pub fn credentials(&mut self) -> Value {
        let first = self.pick(&FIRST_NAMES).to_lowercase();
        let last = self.pick(&LAST_NAMES).to_lowercase();
        json!({
            "email": format!("{first}.{last}@reqres.in"),
            "password": format!("pw-{}", self.next() % 1_000_000),
        })
    }

    /// Generates a resource payload.
    pub fn resource(&mut self) -> Value {
        let first = self.pick(&FIRST_NAMES).to_lowercase();
        json!({
            "name": format!("{first}-shade"),
            "year": 1990 + (self.next() % 40) as u32,
            "color": self.pick(&COLORS),
            "pantone_value": format!("{}-{:04}", 10 + self.next() % 10, self.next() % 10_000),
        })
    }
}

//! Persistence contract the ledger depends on.
//!
//! The ledger mirrors exactly two scalars, the calorie limit and the running
//! total. Both are stored as decimal strings in a [`KeyValueStore`], and every
//! store gets the typed [`PersistenceAdapter`] view for free.

use std::collections::BTreeMap;
use tracing::warn;

pub const CALORIE_LIMIT_KEY: &str = "calorieLimit";
pub const TOTAL_CALORIES_KEY: &str = "totalCalories";

/// String-keyed storage that outlives the process.
///
/// Implementations must be total: reads of a missing key return `None`, and
/// write failures are handled (logged) internally rather than returned.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

/// Typed accessors for the two values the ledger persists.
pub trait PersistenceAdapter {
    fn calorie_limit(&self, default: i64) -> i64;
    fn set_calorie_limit(&mut self, value: i64);
    fn total_calories(&self, default: i64) -> i64;
    fn set_total_calories(&mut self, value: i64);
}

impl<S: KeyValueStore> PersistenceAdapter for S {
    fn calorie_limit(&self, default: i64) -> i64 {
        read_integer(self, CALORIE_LIMIT_KEY, default)
    }

    fn set_calorie_limit(&mut self, value: i64) {
        self.set(CALORIE_LIMIT_KEY, value.to_string());
    }

    fn total_calories(&self, default: i64) -> i64 {
        read_integer(self, TOTAL_CALORIES_KEY, default)
    }

    fn set_total_calories(&mut self, value: i64) {
        self.set(TOTAL_CALORIES_KEY, value.to_string());
    }
}

fn read_integer<S: KeyValueStore + ?Sized>(store: &S, key: &str, default: i64) -> i64 {
    match store.get(key) {
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(value) => value,
            Err(err) => {
                warn!("ignoring stored {key}={raw:?}: {err}");
                default
            }
        },
        None => default,
    }
}

/// In-memory store, used for tests and sessions that need no durability.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

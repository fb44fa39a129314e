use crate::ledger::LedgerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Which list of the ledger an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Meal,
    Workout,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Meal => write!(f, "meal"),
            EntryKind::Workout => write!(f, "workout"),
        }
    }
}

/// A named, calorie-valued record. Meals and workouts share this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub name: String,
    pub calories: u32,
}

impl Entry {
    pub fn new(name: impl Into<String>, calories: u32) -> Result<Self, LedgerError> {
        let name: String = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidEntry("name must not be empty".into()));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            calories,
        })
    }

    /// Builds an entry from raw user input, rejecting negative or oversized counts.
    pub fn from_input(name: &str, calories: i64) -> Result<Self, LedgerError> {
        let calories = u32::try_from(calories).map_err(|_| {
            LedgerError::InvalidEntry(format!("calories must be between 0 and {}", u32::MAX))
        })?;
        Self::new(name, calories)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} kcal)", self.name, self.calories)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub calorie_limit: i64,
    pub total_calories: i64,
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    /// `None` when the limit is zero.
    pub progress: Option<f64>,
    pub over_limit: bool,
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub name: String,
    pub calories: i64,
}

#[derive(Debug, Deserialize)]
pub struct LimitRequest {
    pub limit: i64,
}

/// Raw HTML form fields; numbers arrive as text and may be blank.
#[derive(Debug, Deserialize)]
pub struct EntryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub calories: String,
}

#[derive(Debug, Deserialize)]
pub struct LimitForm {
    #[serde(default)]
    pub limit: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    #[serde(flatten)]
    pub summary: LedgerSummary,
    pub meals: Vec<Entry>,
    pub workouts: Vec<Entry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryCreatedResponse {
    pub entry: Entry,
    pub summary: LedgerSummary,
}

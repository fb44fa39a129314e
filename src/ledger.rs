use crate::models::{Entry, EntryKind, LedgerSummary};
use crate::persistence::PersistenceAdapter;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

pub const DEFAULT_CALORIE_LIMIT: i64 = 2000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("invalid entry: {0}")]
    InvalidEntry(String),

    #[error("calorie limit is zero, progress is undefined")]
    ZeroLimit,
}

/// Meals, workouts and the running total for one session.
///
/// The limit and total are mirrored to the injected adapter after every
/// change; the entry lists live only in memory.
#[derive(Debug)]
pub struct Ledger<P> {
    calorie_limit: i64,
    total_calories: i64,
    meals: Vec<Entry>,
    workouts: Vec<Entry>,
    store: P,
}

impl<P: PersistenceAdapter> Ledger<P> {
    pub fn new(store: P) -> Self {
        let calorie_limit = store.calorie_limit(DEFAULT_CALORIE_LIMIT);
        let total_calories = store.total_calories(0);
        Self {
            calorie_limit,
            total_calories,
            meals: Vec::new(),
            workouts: Vec::new(),
            store,
        }
    }

    pub fn add_meal(&mut self, meal: Entry) {
        debug!(id = %meal.id, calories = meal.calories, "adding meal");
        self.total_calories = self.total_calories.saturating_add(i64::from(meal.calories));
        self.meals.push(meal);
        self.store.set_total_calories(self.total_calories);
    }

    pub fn add_workout(&mut self, workout: Entry) {
        debug!(id = %workout.id, calories = workout.calories, "adding workout");
        self.total_calories = self
            .total_calories
            .saturating_sub(i64::from(workout.calories));
        self.workouts.push(workout);
        self.store.set_total_calories(self.total_calories);
    }

    /// Removes a meal by id. Unknown ids leave the ledger untouched.
    pub fn remove_meal(&mut self, id: Uuid) -> Option<Entry> {
        let index = self.meals.iter().position(|meal| meal.id == id)?;
        let meal = self.meals.remove(index);
        debug!(%id, calories = meal.calories, "removed meal");
        self.total_calories = self.total_calories.saturating_sub(i64::from(meal.calories));
        self.store.set_total_calories(self.total_calories);
        Some(meal)
    }

    /// Removes a workout by id. Unknown ids leave the ledger untouched.
    pub fn remove_workout(&mut self, id: Uuid) -> Option<Entry> {
        let index = self.workouts.iter().position(|workout| workout.id == id)?;
        let workout = self.workouts.remove(index);
        debug!(%id, calories = workout.calories, "removed workout");
        self.total_calories = self
            .total_calories
            .saturating_add(i64::from(workout.calories));
        self.store.set_total_calories(self.total_calories);
        Some(workout)
    }

    pub fn add(&mut self, kind: EntryKind, entry: Entry) {
        match kind {
            EntryKind::Meal => self.add_meal(entry),
            EntryKind::Workout => self.add_workout(entry),
        }
    }

    pub fn remove(&mut self, kind: EntryKind, id: Uuid) -> Option<Entry> {
        match kind {
            EntryKind::Meal => self.remove_meal(id),
            EntryKind::Workout => self.remove_workout(id),
        }
    }

    /// Clears both lists and the total. The limit is kept.
    pub fn reset(&mut self) {
        info!(
            meals = self.meals.len(),
            workouts = self.workouts.len(),
            "resetting ledger"
        );
        self.meals.clear();
        self.workouts.clear();
        self.total_calories = 0;
        self.store.set_total_calories(0);
    }

    pub fn set_limit(&mut self, limit: i64) {
        info!(from = self.calorie_limit, to = limit, "updating calorie limit");
        self.calorie_limit = limit;
        self.store.set_calorie_limit(limit);
    }

    pub fn into_store(self) -> P {
        self.store
    }
}

impl<P> Ledger<P> {
    pub fn calorie_limit(&self) -> i64 {
        self.calorie_limit
    }

    pub fn total_calories(&self) -> i64 {
        self.total_calories
    }

    pub fn meals(&self) -> &[Entry] {
        &self.meals
    }

    pub fn workouts(&self) -> &[Entry] {
        &self.workouts
    }

    pub fn entries(&self, kind: EntryKind) -> &[Entry] {
        match kind {
            EntryKind::Meal => &self.meals,
            EntryKind::Workout => &self.workouts,
        }
    }

    pub fn consumed(&self) -> i64 {
        sum_calories(&self.meals)
    }

    pub fn burned(&self) -> i64 {
        sum_calories(&self.workouts)
    }

    pub fn remaining(&self) -> i64 {
        self.calorie_limit.saturating_sub(self.total_calories)
    }

    pub fn is_over_limit(&self) -> bool {
        self.total_calories > self.calorie_limit
    }

    /// Share of the limit used so far, capped at 1.0.
    ///
    /// Negative totals give a negative fraction; clamping for display is up to
    /// the caller.
    pub fn progress_fraction(&self) -> Result<f64, LedgerError> {
        if self.calorie_limit == 0 {
            return Err(LedgerError::ZeroLimit);
        }
        let fraction = self.total_calories as f64 / self.calorie_limit as f64;
        Ok(fraction.min(1.0))
    }

    /// Entries of one kind whose name contains `query`, ignoring case.
    pub fn filter(&self, kind: EntryKind, query: &str) -> Vec<&Entry> {
        let needle = query.trim().to_lowercase();
        self.entries(kind)
            .iter()
            .filter(|entry| needle.is_empty() || entry.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary {
            calorie_limit: self.calorie_limit,
            total_calories: self.total_calories,
            consumed: self.consumed(),
            burned: self.burned(),
            remaining: self.remaining(),
            progress: self.progress_fraction().ok(),
            over_limit: self.is_over_limit(),
        }
    }
}

fn sum_calories(entries: &[Entry]) -> i64 {
    entries
        .iter()
        .fold(0i64, |sum, entry| sum.saturating_add(i64::from(entry.calories)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStore, TOTAL_CALORIES_KEY};

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::new(MemoryStore::new())
    }

    fn entry(name: &str, calories: u32) -> Entry {
        Entry::new(name, calories).unwrap()
    }

    fn assert_balanced(ledger: &Ledger<MemoryStore>) {
        assert_eq!(
            ledger.total_calories(),
            ledger.consumed() - ledger.burned()
        );
    }

    #[test]
    fn new_ledger_uses_defaults() {
        let ledger = ledger();
        assert_eq!(ledger.calorie_limit(), DEFAULT_CALORIE_LIMIT);
        assert_eq!(ledger.total_calories(), 0);
        assert!(ledger.meals().is_empty());
        assert!(ledger.workouts().is_empty());
    }

    #[test]
    fn breakfast_and_run_scenario() {
        let mut ledger = ledger();
        let breakfast = entry("Breakfast", 400);
        let breakfast_id = breakfast.id;

        ledger.add_meal(breakfast);
        assert_eq!(ledger.consumed(), 400);
        assert_eq!(ledger.remaining(), 1600);

        ledger.add_workout(entry("Run", 300));
        assert_eq!(ledger.total_calories(), 100);
        assert_eq!(ledger.remaining(), 1900);
        assert_eq!(ledger.burned(), 300);

        ledger.remove_meal(breakfast_id);
        assert_eq!(ledger.consumed(), 0);
        assert_eq!(ledger.total_calories(), -300);
        assert_eq!(ledger.remaining(), 2300);
    }

    #[test]
    fn total_matches_consumed_minus_burned_after_each_call() {
        let mut ledger = ledger();
        let lunch = entry("Lunch", 700);
        let swim = entry("Swim", 450);
        let (lunch_id, swim_id) = (lunch.id, swim.id);

        ledger.add_meal(lunch);
        assert_balanced(&ledger);
        ledger.add_workout(swim);
        assert_balanced(&ledger);
        ledger.add_meal(entry("Dinner", 900));
        assert_balanced(&ledger);
        ledger.add_workout(entry("Walk", 120));
        assert_balanced(&ledger);
        ledger.remove_workout(swim_id);
        assert_balanced(&ledger);
        ledger.remove_meal(lunch_id);
        assert_balanced(&ledger);
        ledger.remove_meal(Uuid::new_v4());
        assert_balanced(&ledger);

        assert_eq!(ledger.total_calories(), 780);
    }

    #[test]
    fn add_then_remove_restores_previous_state() {
        let mut ledger = ledger();
        ledger.add_meal(entry("Snack", 150));
        ledger.add_workout(entry("Yoga", 90));
        let before_total = ledger.total_calories();
        let before_meals = ledger.meals().to_vec();
        let before_workouts = ledger.workouts().to_vec();

        let meal = entry("Cake", 500);
        let meal_id = meal.id;
        ledger.add_meal(meal);
        let removed = ledger.remove_meal(meal_id).expect("meal present");
        assert_eq!(removed.name, "Cake");
        assert_eq!(ledger.total_calories(), before_total);
        assert_eq!(ledger.meals(), before_meals.as_slice());

        let workout = entry("Row", 250);
        let workout_id = workout.id;
        ledger.add_workout(workout);
        ledger.remove_workout(workout_id);
        assert_eq!(ledger.total_calories(), before_total);
        assert_eq!(ledger.workouts(), before_workouts.as_slice());
    }

    #[test]
    fn removing_unknown_id_is_a_no_op() {
        let mut ledger = ledger();
        ledger.add_meal(entry("Breakfast", 400));
        ledger.add_workout(entry("Run", 300));

        assert!(ledger.remove_meal(Uuid::new_v4()).is_none());
        assert!(ledger.remove_workout(Uuid::new_v4()).is_none());
        assert_eq!(ledger.total_calories(), 100);
        assert_eq!(ledger.meals().len(), 1);
        assert_eq!(ledger.workouts().len(), 1);
    }

    #[test]
    fn meal_ids_are_not_found_among_workouts() {
        let mut ledger = ledger();
        let meal = entry("Breakfast", 400);
        let meal_id = meal.id;
        ledger.add_meal(meal);

        assert!(ledger.remove_workout(meal_id).is_none());
        assert_eq!(ledger.total_calories(), 400);
    }

    #[test]
    fn reset_is_idempotent_and_keeps_limit() {
        let mut ledger = ledger();
        ledger.set_limit(1800);
        ledger.add_meal(entry("Breakfast", 400));
        ledger.add_workout(entry("Run", 300));

        ledger.reset();
        let once = (ledger.total_calories(), ledger.calorie_limit());
        ledger.reset();

        assert_eq!((ledger.total_calories(), ledger.calorie_limit()), once);
        assert_eq!(ledger.total_calories(), 0);
        assert_eq!(ledger.calorie_limit(), 1800);
        assert!(ledger.meals().is_empty());
        assert!(ledger.workouts().is_empty());
    }

    #[test]
    fn limit_survives_reconstruction() {
        let mut ledger = ledger();
        ledger.set_limit(1800);
        ledger.add_meal(entry("Breakfast", 400));

        let reopened = Ledger::new(ledger.into_store());
        assert_eq!(reopened.calorie_limit(), 1800);
        assert_eq!(reopened.total_calories(), 400);
        assert!(reopened.meals().is_empty());
    }

    #[test]
    fn removal_persists_updated_total() {
        let mut ledger = ledger();
        let meal = entry("Breakfast", 400);
        let meal_id = meal.id;
        ledger.add_meal(meal);
        ledger.add_meal(entry("Lunch", 600));
        ledger.remove_meal(meal_id);

        let store = ledger.into_store();
        assert_eq!(store.get(TOTAL_CALORIES_KEY).as_deref(), Some("600"));
    }

    #[test]
    fn reset_persists_zero_total() {
        let mut ledger = ledger();
        ledger.add_meal(entry("Breakfast", 400));
        ledger.reset();

        let reopened = Ledger::new(ledger.into_store());
        assert_eq!(reopened.total_calories(), 0);
    }

    #[test]
    fn progress_is_capped_at_one() {
        let mut ledger = ledger();
        ledger.add_meal(entry("Breakfast", 500));
        assert_eq!(ledger.progress_fraction(), Ok(0.25));

        ledger.add_meal(entry("Feast", 3000));
        assert_eq!(ledger.progress_fraction(), Ok(1.0));
        assert!(ledger.is_over_limit());
        assert_eq!(ledger.remaining(), -1500);
    }

    #[test]
    fn zero_limit_reports_error_but_other_queries_work() {
        let mut ledger = ledger();
        ledger.set_limit(0);
        ledger.add_meal(entry("Breakfast", 400));

        assert_eq!(ledger.progress_fraction(), Err(LedgerError::ZeroLimit));
        assert_eq!(ledger.remaining(), -400);
        let summary = ledger.summary();
        assert_eq!(summary.progress, None);
        assert_eq!(summary.consumed, 400);
    }

    #[test]
    fn filter_matches_names_case_insensitively() {
        let mut ledger = ledger();
        ledger.add_meal(entry("Oatmeal Breakfast", 350));
        ledger.add_meal(entry("Chicken lunch", 650));
        ledger.add_workout(entry("Morning run", 300));

        let hits = ledger.filter(EntryKind::Meal, "BREAK");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Oatmeal Breakfast");
        assert_eq!(ledger.filter(EntryKind::Meal, "").len(), 2);
        assert!(ledger.filter(EntryKind::Workout, "lunch").is_empty());
    }

    #[test]
    fn huge_limit_does_not_overflow_remaining() {
        let mut ledger = ledger();
        ledger.set_limit(i64::MAX);
        ledger.add_workout(entry("Run", 300));

        assert_eq!(ledger.total_calories(), -300);
        assert_eq!(ledger.remaining(), i64::MAX);
        assert!(!ledger.is_over_limit());
    }

    #[test]
    fn totals_saturate_at_the_stored_edges() {
        let mut store = MemoryStore::new();
        store.set_total_calories(i64::MAX);
        let mut ledger = Ledger::new(store);

        ledger.add_meal(entry("Snack", 1));
        assert_eq!(ledger.total_calories(), i64::MAX);
        assert_eq!(ledger.remaining(), DEFAULT_CALORIE_LIMIT - i64::MAX);

        let mut store = MemoryStore::new();
        store.set_total_calories(i64::MIN);
        let mut ledger = Ledger::new(store);
        ledger.add_workout(entry("Marathon", 2500));
        assert_eq!(ledger.total_calories(), i64::MIN);
        assert_eq!(ledger.remaining(), i64::MAX);
    }

    #[test]
    fn seeded_total_comes_from_store() {
        let mut store = MemoryStore::new();
        store.set_total_calories(250);
        store.set_calorie_limit(2200);

        let ledger = Ledger::new(store);
        assert_eq!(ledger.total_calories(), 250);
        assert_eq!(ledger.remaining(), 1950);
    }
}

//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

mod advice;
mod geo;
mod user;
mod weather;

use std::collections::BTreeMap;

pub use advice::{InMemoryAdviceRepository, InMemoryMonthRepository};
pub use geo::InMemoryGeoRepository;
pub use user::InMemoryUserRepository;
pub use weather::InMemoryWeatherRepository;

/// Rows keyed by an auto-incremented id, starting at 1.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    /// Insert the row built from the next id and return it.
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }
}

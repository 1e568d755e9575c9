//! SeaORM entities, one module per table.

pub mod advice;
pub mod advice_month;
pub mod geo;
pub mod month;
pub mod user;
pub mod weather;

pub mod config;
pub mod stats;
pub mod timer;
pub mod workout;

use serde::Serialize;
use wellspring_core::error::CoreError;
use wellspring_core::storage::Database;

/// Open the on-disk database, falling back to an in-memory one so that
/// timer commands keep working when storage is unavailable. Counters simply
/// stop persisting in that case.
pub fn open_db() -> Result<Database, CoreError> {
    match Database::open() {
        Ok(db) => Ok(db),
        Err(_) => Database::open_memory().map_err(CoreError::from),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CoreError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Shared test doubles for unit and integration tests.
//!
//! Compiled for the crate's own tests and, through the `test-support`
//! feature, for the integration tests under `backend/tests`.

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

/// Clock whose reading only moves when a test advances it.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Clock frozen at 2024-01-01T00:00:00Z.
    pub fn at_epoch() -> Self {
        Self::new(fixture_epoch())
    }

    /// Move the clock forward by `seconds`.
    pub fn advance_seconds(&self, seconds: i64) {
        *self.lock_clock() += TimeDelta::seconds(seconds);
    }

    /// Set the clock to `now`, which may lie in the past.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(_) => panic!("clock mutex"),
        }
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Fixed instant used as the default test clock reading.
pub fn fixture_epoch() -> DateTime<Utc> {
    match Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single() {
        Some(instant) => instant,
        None => panic!("fixture epoch is a valid timestamp"),
    }
}

pub mod openapi {
    //! Helpers for inspecting generated OpenAPI schemas.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    /// Resolve `schema` to an object schema, panicking with `name` otherwise.
    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => panic!(
                "schema '{name}' is a $ref to '{}'; resolve the reference first",
                reference.ref_location
            ),
            _ => panic!("schema '{name}' is not an object"),
        }
    }

    /// Property names declared by an object schema.
    pub fn property_names(obj: &Object) -> Vec<&str> {
        obj.properties.keys().map(String::as_str).collect()
    }
}

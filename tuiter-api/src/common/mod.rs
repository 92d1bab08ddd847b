use chrono::offset::Utc as UtcOffset;
use chrono::DateTime;
use rand::{distributions::Alphanumeric, Rng};
use std::time::SystemTime;

pub mod env;
pub mod time;

pub const RFC3339_VARIANT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn now() -> String {
    let system_time = SystemTime::now();
    let dt: DateTime<UtcOffset> = system_time.into();
    format!("{}", dt.format(RFC3339_VARIANT))
}

pub fn get_random_str() -> String {
    let token: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    token
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

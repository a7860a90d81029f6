pub mod dashboard;
pub mod interview;
pub mod profile;
pub mod roadmap;
pub mod role;
pub mod user;

pub use dashboard::*;
pub use interview::*;
pub use profile::*;
pub use roadmap::*;
pub use role::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Accepts any JSON number for a 0–100 percentage, rounding and clamping.
/// Model-generated payloads are not consistent about integers.
pub(crate) fn de_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(value.round().clamp(0.0, 100.0) as u8)
}

/// `round(completed / total * 100)`, 0 when there is nothing to complete.
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((completed as f64 / total as f64) * 100.0).round() as u8
}

use chrono::NaiveDate;
use serde::Deserialize;

// Query parameters for the availability endpoint; the date is ISO YYYY-MM-DD.
#[derive(Debug, Deserialize)]
pub struct AvailabilityParams {
    pub date: NaiveDate,
}

pub mod appointment_status;
pub mod calendar;
pub mod clock;
pub mod day_state;
pub mod eligibility;
pub mod ledger;
pub mod timezone;

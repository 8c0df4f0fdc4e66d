pub mod appointment;
pub mod business;
pub mod daily_log;

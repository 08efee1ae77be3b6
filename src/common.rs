pub mod error;
pub mod time_window;
pub mod aggregation;

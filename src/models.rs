pub mod crm;
pub mod staff;
pub mod operations;
pub mod finance;
pub mod inventory;
pub mod aggregates;
pub mod dashboard;
pub mod reports;

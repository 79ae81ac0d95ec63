//! Route modules for the Service Order Report server

pub mod health;
pub mod report;

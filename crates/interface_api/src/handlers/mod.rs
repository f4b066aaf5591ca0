//! Request handlers

pub mod cars;
pub mod health;

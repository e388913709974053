//! Call Script: guided insurance sales call wizard.

pub mod channels;
pub mod config;
pub mod error;
pub mod script;
pub mod session;
pub mod wizard;

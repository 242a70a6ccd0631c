pub mod badges;
pub mod board;
pub mod certificate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod profile;
pub mod remote;
pub mod report;
pub mod store;
pub mod transition;

#[cfg(test)]
mod test_helpers;

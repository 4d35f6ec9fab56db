pub mod config;
pub mod download_client;
pub mod error;
pub mod installer;
pub mod logging;
pub mod manifest;
pub mod remote;
mod report;

#[cfg(test)]
pub mod test_helpers;

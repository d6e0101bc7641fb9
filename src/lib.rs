pub mod cli;
pub mod clients;
pub mod config;
pub mod connector;
pub mod masking;
pub mod query;
pub mod session;
pub mod wizard;

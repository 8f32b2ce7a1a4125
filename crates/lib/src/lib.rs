//! Babble core library — config, corpus, word-chain generation, the
//! interaction endpoint, and the Discord follow-up client used by the CLI.

pub mod config;
pub mod corpus;
pub mod discord;
pub mod endpoint;
pub mod generate;
pub mod init;

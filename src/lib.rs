//! xcc — trigger Xcode Cloud builds from the terminal
//!
//! A thin, strictly sequential client for the App Store Connect API:
//! resolve credentials, sign a token, walk product → workflow → source
//! selection, and submit a build run.

pub mod appstore;
pub mod auth;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;

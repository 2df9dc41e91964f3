mod client;
pub mod types;

pub use client::AppStoreClient;
pub use types::*;

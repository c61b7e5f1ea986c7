//! Core library for the `codis` CLI.
//!
//! This crate defines:
//! - Station classification and date-window construction for CODiS queries
//! - The session-token provider contract and its config-backed implementation
//! - The fetch pipeline that downloads observations and persists them as JSON
//!
//! It is used by `codis-cli`, but can also be reused by other binaries or
//! automation scripts.

pub mod config;
pub mod error;
pub mod fetch;
pub mod payload;
pub mod station;
pub mod token;
pub mod transport;
pub mod window;

pub use config::Config;
pub use error::FetchError;
pub use fetch::{DownloadResult, Fetcher};
pub use payload::{QueryKind, QueryPayload};
pub use station::StationType;
pub use token::{ConfigToken, SessionToken, SessionTokenProvider, StaticToken};
pub use transport::{ApiReply, ApiTransport, HttpTransport};
pub use window::DateWindow;

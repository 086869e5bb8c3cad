//! CollegeFootballData Fetcher
//!
//! Reads rankings, games and broadcast media for a football week from the
//! CollegeFootballData API, and derives the week number from the calendar.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod week;

pub use config::{FetcherConfig, SeasonType};
pub use error::{FetchError, Result};
pub use fetcher::{CfbdFetcher, GameDataSource};
pub use models::*;

//! NCAA Stats Bot
//!
//! Posts a weekly college football summary to Slack: results for games involving
//! ranked teams, followed by kickoff and broadcast details for the tracked teams'
//! upcoming games. The run fires on a weekly schedule and can be forced over HTTP.

pub mod config;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod matcher;
pub mod notifier;
pub mod pipeline;
pub mod rest_api;
pub mod scheduler;

#[cfg(test)]
mod test_support;

pub use config::BotConfig;
pub use error::{BotError, BotResult, NotifyError};
pub use logging::initialize_logging;
pub use notifier::{Notifier, SlackNotifier};
pub use pipeline::{ReportPipeline, RunSummary};
pub use scheduler::{ReportSchedule, ReportScheduler};

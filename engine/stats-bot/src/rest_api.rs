//! HTTP endpoints for the stats bot
//!
//! `GET /` answers a liveness message, `GET /test-message` runs the pipeline and
//! posts the result, `GET /preview` returns the message without posting it.

use crate::pipeline::ReportPipeline;
use chrono::Utc;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::Filter;

pub const LIVENESS_MESSAGE: &str = "NCAA Stats Bot is running!";
pub const TEST_SUCCESS_MESSAGE: &str = "Test message sent successfully!";
pub const TEST_FAILURE_MESSAGE: &str = "Error sending test message";

/// Run the pipeline and report whether the message went out
pub async fn send_test_message(
    pipeline: Arc<ReportPipeline>,
) -> Result<impl warp::Reply, Infallible> {
    match pipeline.run().await {
        Ok(summary) => {
            tracing::info!("Test message sent: {:?}", summary);
            Ok(warp::reply::with_status(TEST_SUCCESS_MESSAGE, StatusCode::OK))
        }
        Err(e) => {
            tracing::error!("Error sending test message: {}", e);
            Ok(warp::reply::with_status(
                TEST_FAILURE_MESSAGE,
                StatusCode::INTERNAL_SERVER_ERROR,
            ))
        }
    }
}

/// Build the message without posting it
pub async fn preview_message(
    pipeline: Arc<ReportPipeline>,
) -> Result<impl warp::Reply, Infallible> {
    let report = pipeline.build_report_at(Utc::now()).await;
    tracing::debug!("Preview built: {:?}", report.summary);
    Ok(report.message)
}

/// Create all routes
pub fn create_routes(
    pipeline: Arc<ReportPipeline>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let pipeline_filter = warp::any().map(move || pipeline.clone());

    // Liveness endpoint
    let liveness = warp::path::end().and(warp::get()).map(|| LIVENESS_MESSAGE);

    // Force a run and post the result
    let test_message = warp::path("test-message")
        .and(warp::path::end())
        .and(warp::get())
        .and(pipeline_filter.clone())
        .and_then(send_test_message);

    // Render without posting
    let preview = warp::path("preview")
        .and(warp::path::end())
        .and(warp::get())
        .and(pipeline_filter)
        .and_then(preview_message);

    // Health check endpoint
    let health = warp::path("health").and(warp::path::end()).and(warp::get()).map(|| {
        warp::reply::json(&serde_json::json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339()
        }))
    });

    liveness.or(test_message).or(preview).or(health).with(warp::trace::request())
}

// src/api/handlers/health.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use crate::api::AppState;

pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse> {
    let fixture = match state.fixture.load().await {
        Ok(fixture) => json!({
            "source": state.fixture.describe(),
            "mode": state.config.fixture_mode.to_string(),
            "loaded": true,
            "evaluationRuns": fixture.evaluation_runs().map_or(0, <[_]>::len),
            "evaluationTasks": fixture.evaluation_tasks().map_or(0, <[_]>::len)
        }),
        Err(e) => {
            log::warn!("Health check could not load fixture: {}", e);
            json!({
                "source": state.fixture.describe(),
                "mode": state.config.fixture_mode.to_string(),
                "loaded": false
            })
        }
    };
    let status = if fixture["loaded"] == json!(true) { "healthy" } else { "degraded" };

    Ok(HttpResponse::Ok().json(json!({
        "status": status,
        "service": "evalhub",
        "version": env!("CARGO_PKG_VERSION"),
        "checkedAt": chrono::Utc::now().to_rfc3339(),
        "fixture": fixture
    })))
}

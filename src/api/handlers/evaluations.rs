// src/api/handlers/evaluations.rs
//
// The detail endpoint reports NotFound/InternalError with a status code.
// Every collection endpoint answers 200 with an empty body of the same shape
// when the fixture cannot be loaded, and only logs the cause.
use actix_web::{http::header::ContentType, web, HttpResponse, Result};
use serde_json::json;
use crate::api::AppState;
use crate::errors;
use crate::models::{
    DatasetsResponse, DeploymentsResponse, EvaluationDetail, Fixture, OrganizationsResponse,
    TaskQuery, TasksResponse,
};

/// GET /evaluations/{id} - One run and its tasks
pub async fn get_evaluation(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let evaluation_id = path.into_inner();

    let detail: errors::Result<Option<EvaluationDetail>> = match state.fixture.load().await {
        Ok(fixture) => fixture.evaluation_detail(&evaluation_id),
        Err(e) => Err(e),
    };

    match detail {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(detail)),
        Ok(None) => {
            log::debug!("Evaluation {} not found", evaluation_id);
            Ok(HttpResponse::NotFound().json(json!({"error": "Evaluation not found"})))
        }
        Err(e) => {
            log::error!("Failed to load evaluation {}: {}", evaluation_id, e);
            Ok(HttpResponse::InternalServerError()
                .json(json!({"error": "Failed to load evaluation"})))
        }
    }
}

/// GET /evaluations - The whole fixture document, as stored
pub async fn get_evaluations(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.fixture.load().await {
        Ok(fixture) => match fixture.raw() {
            Some(raw) => Ok(HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(raw.to_vec())),
            None => Ok(HttpResponse::Ok().json(fixture.document())),
        },
        Err(e) => {
            log::error!("Failed to load evaluations: {}", e);
            Ok(HttpResponse::Ok().json(Fixture::empty().document()))
        }
    }
}

/// GET /evaluations/tasks?evaluationId= - All tasks, or those of one run
pub async fn get_tasks(
    state: web::Data<AppState>,
    query: web::Query<TaskQuery>,
) -> Result<HttpResponse> {
    // an empty evaluationId counts as no filter
    let evaluation_id = query
        .evaluation_id
        .as_deref()
        .filter(|id| !id.is_empty());

    let tasks = match state.fixture.load().await {
        Ok(fixture) => fixture.tasks_for(evaluation_id),
        Err(e) => Err(e),
    };

    match tasks {
        Ok(tasks) => Ok(HttpResponse::Ok().json(TasksResponse { tasks })),
        Err(e) => {
            log::error!("Failed to load evaluation tasks: {}", e);
            Ok(HttpResponse::Ok().json(TasksResponse::default()))
        }
    }
}

/// GET /evaluations/datasets
pub async fn get_datasets(state: web::Data<AppState>) -> Result<HttpResponse> {
    let datasets = match state.fixture.load().await {
        Ok(fixture) => fixture.evaluation_datasets().map(<[_]>::to_vec),
        Err(e) => Err(e),
    };

    match datasets {
        Ok(datasets) => Ok(HttpResponse::Ok().json(DatasetsResponse { datasets })),
        Err(e) => {
            log::error!("Failed to load evaluation datasets: {}", e);
            Ok(HttpResponse::Ok().json(DatasetsResponse::default()))
        }
    }
}

/// GET /evaluations/deployments
pub async fn get_deployments(state: web::Data<AppState>) -> Result<HttpResponse> {
    let deployments = match state.fixture.load().await {
        Ok(fixture) => fixture.deployments().map(<[_]>::to_vec),
        Err(e) => Err(e),
    };

    match deployments {
        Ok(deployments) => Ok(HttpResponse::Ok().json(DeploymentsResponse { deployments })),
        Err(e) => {
            log::error!("Failed to load deployments: {}", e);
            Ok(HttpResponse::Ok().json(DeploymentsResponse::default()))
        }
    }
}

/// GET /evaluations/organizations
pub async fn get_organizations(state: web::Data<AppState>) -> Result<HttpResponse> {
    let organizations = match state.fixture.load().await {
        Ok(fixture) => fixture.organizations().map(<[_]>::to_vec),
        Err(e) => Err(e),
    };

    match organizations {
        Ok(organizations) => Ok(HttpResponse::Ok().json(OrganizationsResponse { organizations })),
        Err(e) => {
            log::error!("Failed to load organizations: {}", e);
            Ok(HttpResponse::Ok().json(OrganizationsResponse::default()))
        }
    }
}

// src/api/routes.rs
use actix_web::web;
use super::handlers;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .service(
            // literal segments first, otherwise "/{id}" captures them
            web::scope("/evaluations")
                .route("", web::get().to(handlers::get_evaluations))
                .route("/tasks", web::get().to(handlers::get_tasks))
                .route("/datasets", web::get().to(handlers::get_datasets))
                .route("/deployments", web::get().to(handlers::get_deployments))
                .route("/organizations", web::get().to(handlers::get_organizations))
                .route("/{id}", web::get().to(handlers::get_evaluation))
        );
}

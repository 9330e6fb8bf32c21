// src/api/handlers/mod.rs
mod health;
mod evaluations;

pub use health::health_check;
pub use evaluations::{
    get_datasets, get_deployments, get_evaluation, get_evaluations, get_organizations, get_tasks,
};

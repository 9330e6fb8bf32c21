// src/models.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use crate::errors::{EvalHubError, Result};

/// Top-level keys of the fixture document, in the order of the empty shape.
pub const FIXTURE_KEYS: [&str; 6] = [
    "evaluationRuns",
    "evaluationTasks",
    "organizations",
    "deployments",
    "dashboardStats",
    "evaluationDatasets",
];

// Records are kept exactly as stored. Only `id` and `evaluationId` are ever
// read, and a record where they are missing or not strings simply never matches.
pub type EvaluationRun = Value;
pub type EvaluationTask = Value;
pub type Organization = Value;
pub type Deployment = Value;
pub type EvaluationDataset = Value;

pub fn record_id(record: &Value) -> Option<&str> {
    record.get("id").and_then(Value::as_str)
}

pub fn task_evaluation_id(task: &EvaluationTask) -> Option<&str> {
    task.get("evaluationId").and_then(Value::as_str)
}

/// The fixture document.
///
/// `document` is the parsed top-level object, untouched. When the fixture came
/// from bytes, `raw` holds them so the whole document can be served back verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    document: Map<String, Value>,
    raw: Option<Vec<u8>>,
}

impl Default for Fixture {
    fn default() -> Self {
        Fixture::empty()
    }
}

impl Fixture {
    /// Parse a fixture file. The top level must be a JSON object.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let document: Map<String, Value> = serde_json::from_slice(bytes)?;
        Ok(Fixture { document, raw: Some(bytes.to_vec()) })
    }

    pub fn from_document(document: Value) -> Result<Self> {
        match document {
            Value::Object(document) => Ok(Fixture { document, raw: None }),
            other => Err(EvalHubError::Malformed(format!(
                "top level must be an object, found {}",
                kind_of(&other)
            ))),
        }
    }

    /// The default-shaped document: every known key present, nothing in it.
    pub fn empty() -> Self {
        let mut document = Map::new();
        for key in FIXTURE_KEYS {
            let value = if key == "dashboardStats" {
                Value::Object(Map::new())
            } else {
                Value::Array(Vec::new())
            };
            document.insert(key.to_string(), value);
        }
        Fixture { document, raw: None }
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    pub fn raw(&self) -> Option<&[u8]> {
        self.raw.as_deref()
    }

    /// A top-level array by key. A missing key reads as empty; any other
    /// non-array value is a malformed fixture.
    pub fn collection(&self, key: &str) -> Result<&[Value]> {
        match self.document.get(key) {
            None | Some(Value::Null) => Ok(&[][..]),
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(other) => Err(EvalHubError::Malformed(format!(
                "'{}' must be an array, found {}",
                key,
                kind_of(other)
            ))),
        }
    }

    pub fn evaluation_runs(&self) -> Result<&[EvaluationRun]> {
        self.collection("evaluationRuns")
    }

    pub fn evaluation_tasks(&self) -> Result<&[EvaluationTask]> {
        self.collection("evaluationTasks")
    }

    pub fn organizations(&self) -> Result<&[Organization]> {
        self.collection("organizations")
    }

    pub fn deployments(&self) -> Result<&[Deployment]> {
        self.collection("deployments")
    }

    pub fn evaluation_datasets(&self) -> Result<&[EvaluationDataset]> {
        self.collection("evaluationDatasets")
    }

    /// Passed through as stored; nothing is derived from it.
    pub fn dashboard_stats(&self) -> Option<&Value> {
        self.document.get("dashboardStats")
    }

    pub fn find_evaluation(&self, id: &str) -> Result<Option<&EvaluationRun>> {
        Ok(self
            .evaluation_runs()?
            .iter()
            .find(|run| record_id(run) == Some(id)))
    }

    /// Tasks in stored order, optionally restricted to one parent run.
    pub fn tasks_for(&self, evaluation_id: Option<&str>) -> Result<Vec<EvaluationTask>> {
        let tasks = self.evaluation_tasks()?;
        Ok(match evaluation_id {
            Some(id) => tasks
                .iter()
                .filter(|task| task_evaluation_id(task) == Some(id))
                .cloned()
                .collect(),
            None => tasks.to_vec(),
        })
    }

    /// The run with the given id together with its tasks, or `None` if no run matches.
    pub fn evaluation_detail(&self, id: &str) -> Result<Option<EvaluationDetail>> {
        let Some(evaluation) = self.find_evaluation(id)?.cloned() else {
            return Ok(None);
        };
        let tasks = self.tasks_for(Some(id))?;
        Ok(Some(EvaluationDetail { evaluation, tasks }))
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[derive(Serialize, Debug)]
pub struct EvaluationDetail {
    pub evaluation: EvaluationRun,
    pub tasks: Vec<EvaluationTask>,
}

#[derive(Serialize, Debug, Default)]
pub struct TasksResponse {
    pub tasks: Vec<EvaluationTask>,
}

#[derive(Serialize, Debug, Default)]
pub struct DatasetsResponse {
    pub datasets: Vec<EvaluationDataset>,
}

#[derive(Serialize, Debug, Default)]
pub struct DeploymentsResponse {
    pub deployments: Vec<Deployment>,
}

#[derive(Serialize, Debug, Default)]
pub struct OrganizationsResponse {
    pub organizations: Vec<Organization>,
}

#[derive(Deserialize, Debug, Default)]
pub struct TaskQuery {
    #[serde(rename = "evaluationId")]
    pub evaluation_id: Option<String>,
}

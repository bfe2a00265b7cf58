//! `tasks` table access through a PostgREST-compatible data API.

use super::error::check;
use super::{BackendClient, TaskStore};
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::libs::task::{NewTask, Task, TaskOrder, TaskPatch, TaskPredicate};
use crate::{msg_bail_anyhow, msg_debug, msg_error_anyhow};
use anyhow::Result;
use reqwest::header::HeaderValue;

const TASKS_PATH: &str = "rest/v1/tasks";
const PREFER_REPRESENTATION: &str = "return=representation";

/// Encodes a predicate (and optional ordering) as PostgREST query parameters.
///
/// Equality comparisons become `column=eq.value`; ordering becomes `order=column.dir`.
pub fn query_params(predicate: &TaskPredicate, order: Option<TaskOrder>) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = predicate
        .equalities()
        .into_iter()
        .map(|(column, value)| (column.to_string(), format!("eq.{}", value)))
        .collect();
    if let Some(order) = order {
        params.push(("order".to_string(), order.as_query().to_string()));
    }
    params
}

pub struct SupabaseTasks {
    client: BackendClient,
}

impl SupabaseTasks {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    /// Writes without a filter would hit every row the policy allows.
    fn scoped(predicate: &TaskPredicate) -> Result<Vec<(String, String)>> {
        if predicate.equalities().is_empty() {
            msg_bail_anyhow!(Message::UnscopedMutation);
        }
        Ok(query_params(predicate, None))
    }
}

impl TaskStore for SupabaseTasks {
    async fn insert(&self, session: &Session, task: &NewTask) -> Result<Task> {
        let req = self
            .client
            .post(TASKS_PATH, Some(&session.access_token))?
            .header("Prefer", HeaderValue::from_static(PREFER_REPRESENTATION))
            .json(&[task]);
        let res = check(req.send().await?).await?;
        let mut rows = res.json::<Vec<Task>>().await?;
        msg_debug!(format!("inserted {} row(s) into tasks", rows.len()));
        if rows.is_empty() {
            return Err(msg_error_anyhow!(Message::TaskCreateFailed));
        }
        Ok(rows.swap_remove(0))
    }

    async fn select(&self, session: &Session, predicate: &TaskPredicate, order: TaskOrder) -> Result<Vec<Task>> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(query_params(predicate, Some(order)));
        let req = self.client.get(TASKS_PATH, Some(&session.access_token))?.query(&params);
        let res = check(req.send().await?).await?;
        Ok(res.json::<Vec<Task>>().await?)
    }

    async fn update(&self, session: &Session, patch: &TaskPatch, predicate: &TaskPredicate) -> Result<Vec<Task>> {
        let params = Self::scoped(predicate)?;
        let req = self
            .client
            .patch(TASKS_PATH, Some(&session.access_token))?
            .header("Prefer", HeaderValue::from_static(PREFER_REPRESENTATION))
            .query(&params)
            .json(patch);
        let res = check(req.send().await?).await?;
        Ok(res.json::<Vec<Task>>().await?)
    }

    async fn delete(&self, session: &Session, predicate: &TaskPredicate) -> Result<Vec<Task>> {
        let params = Self::scoped(predicate)?;
        let req = self
            .client
            .delete(TASKS_PATH, Some(&session.access_token))?
            .header("Prefer", HeaderValue::from_static(PREFER_REPRESENTATION))
            .query(&params);
        let res = check(req.send().await?).await?;
        Ok(res.json::<Vec<Task>>().await?)
    }
}

//! CreateApplication command

use crate::context::KanbanContext;
use crate::engine::rows;
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, UserId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Create an application that is not yet on any board or service
#[operation(
    verb = "create",
    noun = "application",
    description = "Create an unplaced application"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateApplication {
    /// Who is creating it
    pub actor: Actor,
    /// The application title
    pub title: String,
    /// Free-form case status
    pub status: Option<String>,
    /// Owner, when staff create on someone's behalf
    pub owner_id: Option<UserId>,
}

impl CreateApplication {
    pub fn new(actor: Actor, title: impl Into<String>) -> Self {
        Self {
            actor,
            title: title.into(),
            status: None,
            owner_id: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn on_behalf_of(mut self, owner: impl Into<UserId>) -> Self {
        self.owner_id = Some(owner.into());
        self
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(KanbanError::missing_field("title"));
        }
        let owner = self.owner_id.unwrap_or(self.actor.user_id);
        if !self.actor.may_act_for(owner) {
            return Err(KanbanError::unauthorized("owner", owner));
        }

        let status = self.status.clone();
        let application = ctx
            .write(move |tx| {
                let id = rows::insert_application(tx, owner, &title, status.as_deref())?;
                rows::application(tx, id)
            })
            .await?;

        info!(application = %application.id, %owner, "created application");
        Ok(serde_json::to_value(application)?)
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for CreateApplication {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let result = self.run(ctx).await;
        logged(
            self.op_string(),
            log_input(self, "application"),
            &self.actor,
            start,
            result,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Application, Boards, Placement};

    #[tokio::test]
    async fn test_create_is_unplaced() {
        let ctx = KanbanContext::in_memory().unwrap();
        let value = CreateApplication::new(Actor::member(7), "H-1B renewal")
            .with_status("draft")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let application: Application = serde_json::from_value(value).unwrap();

        assert_eq!(application.owner_id.get(), 7);
        assert_eq!(application.status.as_deref(), Some("draft"));

        let id = application.id;
        let placement: Placement = ctx
            .read(move |conn| rows::placement::<Boards>(conn, id))
            .await
            .unwrap();
        assert!(placement.is_detached());
    }

    #[tokio::test]
    async fn test_blank_title() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = CreateApplication::new(Actor::member(7), "  ")
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::MissingField { .. })));
    }

    #[tokio::test]
    async fn test_on_behalf_of_requires_staff() {
        let ctx = KanbanContext::in_memory().unwrap();

        let denied = CreateApplication::new(Actor::member(7), "X")
            .on_behalf_of(8)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(denied, Err(KanbanError::Unauthorized { .. })));

        let value = CreateApplication::new(Actor::staff(2), "X")
            .on_behalf_of(8)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(value["owner_id"], 8);
    }
}

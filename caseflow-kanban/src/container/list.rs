//! ListContainers command

use crate::context::KanbanContext;
use crate::engine::rows;
use crate::error::{KanbanError, Result};
use crate::processor::unlogged;
use crate::types::{Actor, Family, UserId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// List an owner's containers in position order
#[operation(
    verb = "list",
    noun = "containers",
    description = "List an owner's boards or services"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListContainers<F: Family> {
    /// Who is reading
    pub actor: Actor,
    /// Whose containers to list
    pub owner_id: UserId,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> ListContainers<F> {
    pub fn new(actor: Actor, owner_id: impl Into<UserId>) -> Self {
        Self {
            actor,
            owner_id: owner_id.into(),
            family: PhantomData,
        }
    }

    /// The actor's own containers
    pub fn mine(actor: Actor) -> Self {
        Self::new(actor, actor.user_id)
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        if !self.actor.may_act_for(self.owner_id) {
            return Err(KanbanError::unauthorized("owner", self.owner_id));
        }
        let owner = self.owner_id;
        let containers = ctx
            .read(move |conn| rows::containers_for_owner::<F>(conn, owner))
            .await?;
        Ok(serde_json::json!({
            "family": F::CONTAINER,
            "containers": containers,
            "count": containers.len(),
        }))
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for ListContainers<F> {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::CreateContainer;
    use crate::types::Services;

    #[tokio::test]
    async fn test_list_in_position_order() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(4);
        for name in ["Exam", "Endorsement"] {
            CreateContainer::<Services>::new(owner, name)
                .execute(&ctx)
                .await
                .into_result()
                .unwrap();
        }
        CreateContainer::<Services>::new(Actor::member(5), "Elsewhere")
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let result = ListContainers::<Services>::mine(owner)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["family"], "service");
        assert_eq!(result["count"], 2);
        assert_eq!(result["containers"][0]["name"], "Exam");
        assert_eq!(result["containers"][1]["name"], "Endorsement");
    }

    #[tokio::test]
    async fn test_list_for_someone_else_requires_staff() {
        let ctx = KanbanContext::in_memory().unwrap();

        let denied = ListContainers::<Services>::new(Actor::member(4), 5)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(denied, Err(KanbanError::Unauthorized { .. })));

        let allowed = ListContainers::<Services>::new(Actor::admin(1), 5)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(allowed["count"], 0);
    }
}

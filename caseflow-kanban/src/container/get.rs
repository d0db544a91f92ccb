//! GetContainer command

use crate::context::KanbanContext;
use crate::engine::RepositioningEngine;
use crate::error::{KanbanError, Result};
use crate::processor::unlogged;
use crate::types::{Actor, ContainerId, Family};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Read a container with its lanes and their applications, all in position
/// order. This is the persisted state a client resynchronizes to.
#[operation(
    verb = "get",
    noun = "container",
    description = "Get a board or service with its lanes and applications"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetContainer<F: Family> {
    /// Who is reading
    pub actor: Actor,
    /// The container to read
    pub container_id: ContainerId,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> GetContainer<F> {
    pub fn new(actor: Actor, container_id: impl Into<ContainerId>) -> Self {
        Self {
            actor,
            container_id: container_id.into(),
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let actor = self.actor;
        let id = self.container_id;
        let view = ctx
            .read(move |conn| RepositioningEngine::<F>::new(conn).container_view(&actor, id))
            .await?;
        Ok(serde_json::to_value(view)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for GetContainer<F> {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(self.run(ctx).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{application_in, board_with_lanes};
    use crate::types::{Boards, ContainerView};

    #[tokio::test]
    async fn test_get_lists_items_in_order() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let todo = board.lanes[0].lane.id;
        let a = application_in::<Boards>(&ctx, owner, todo, "A").await;
        let b = application_in::<Boards>(&ctx, owner, todo, "B").await;

        let value = GetContainer::<Boards>::new(owner, board.container.id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        let view: ContainerView = serde_json::from_value(value).unwrap();

        assert_eq!(view.lanes.len(), 3);
        assert_eq!(view.lanes[0].item_ids(), vec![a, b]);
        assert_eq!(view.lanes[0].items[1].title, "B");
    }

    #[tokio::test]
    async fn test_get_is_not_logged() {
        let ctx = KanbanContext::in_memory().unwrap();
        let board = board_with_lanes::<Boards>(&ctx, Actor::member(7)).await;

        let result = GetContainer::<Boards>::new(Actor::member(7), board.container.id)
            .execute(&ctx)
            .await;
        assert!(!result.should_log());
    }

    #[tokio::test]
    async fn test_get_other_owner_rejected() {
        let ctx = KanbanContext::in_memory().unwrap();
        let board = board_with_lanes::<Boards>(&ctx, Actor::member(7)).await;

        let result = GetContainer::<Boards>::new(Actor::member(9), board.container.id)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::Unauthorized { .. })));
    }
}

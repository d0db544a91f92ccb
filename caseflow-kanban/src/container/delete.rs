//! DeleteContainer command

use crate::context::KanbanContext;
use crate::engine::RepositioningEngine;
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, ContainerId, Family};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Delete a container and its lanes, detaching every application in it
#[operation(
    verb = "delete",
    noun = "container",
    description = "Delete a board or service; its applications are detached, not deleted"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteContainer<F: Family> {
    /// Who is deleting
    pub actor: Actor,
    /// The container to delete
    pub container_id: ContainerId,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> DeleteContainer<F> {
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

        let detached = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                engine.authorized_container(&actor, id)?;
                engine.delete_container(id)
            })
            .await?;

        Ok(serde_json::json!({
            "deleted": true,
            "id": id,
            "detached": detached,
        }))
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for DeleteContainer<F> {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let result = self.run(ctx).await;
        logged(
            self.op_string(),
            log_input(self, F::CONTAINER),
            &self.actor,
            start,
            result,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rows;
    use crate::test_support::{application_in, board_with_lanes};
    use crate::types::{Boards, Services};

    #[tokio::test]
    async fn test_delete_detaches_everything() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let a = application_in::<Boards>(&ctx, owner, board.lanes[0].lane.id, "A").await;
        let b = application_in::<Boards>(&ctx, owner, board.lanes[2].lane.id, "B").await;

        let result = DeleteContainer::<Boards>::new(owner, board.container.id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["detached"], 2);

        let (pa, pb, lanes) = ctx
            .read(move |conn| {
                Ok((
                    rows::placement::<Boards>(conn, a)?,
                    rows::placement::<Boards>(conn, b)?,
                    rows::lanes::<Boards>(conn, board.container.id)?,
                ))
            })
            .await
            .unwrap();
        assert!(pa.is_detached());
        assert!(pb.is_detached());
        assert!(lanes.is_empty());
    }

    #[tokio::test]
    async fn test_other_family_untouched() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let service = board_with_lanes::<Services>(&ctx, owner).await;
        let item = application_in::<Boards>(&ctx, owner, board.lanes[0].lane.id, "A").await;
        crate::test_support::place::<Services>(&ctx, owner, item, service.lanes[1].lane.id).await;

        DeleteContainer::<Boards>::new(owner, board.container.id)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();

        let stage = ctx
            .read(move |conn| rows::placement::<Services>(conn, item))
            .await
            .unwrap();
        assert_eq!(stage.lane_id, Some(service.lanes[1].lane.id));
    }

    #[tokio::test]
    async fn test_non_owner_rejected_without_mutation() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let item = application_in::<Boards>(&ctx, owner, board.lanes[0].lane.id, "A").await;

        let result = DeleteContainer::<Boards>::new(Actor::member(8), board.container.id)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::Unauthorized { .. })));

        let placement = ctx
            .read(move |conn| rows::placement::<Boards>(conn, item))
            .await
            .unwrap();
        assert_eq!(placement.lane_id, Some(board.lanes[0].lane.id));
    }

    #[tokio::test]
    async fn test_staff_may_delete() {
        let ctx = KanbanContext::in_memory().unwrap();
        let board = board_with_lanes::<Boards>(&ctx, Actor::member(7)).await;

        let result = DeleteContainer::<Boards>::new(Actor::staff(1), board.container.id)
            .execute(&ctx)
            .await
            .into_result();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_missing_container() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = DeleteContainer::<Services>::new(Actor::member(7), 99)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::NotFound { .. })));
    }
}

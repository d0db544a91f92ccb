//! DeleteLane command

use crate::context::KanbanContext;
use crate::engine::RepositioningEngine;
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, Family, LaneId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Delete a lane. Its applications stay in the container, without a lane.
#[operation(
    verb = "delete",
    noun = "lane",
    description = "Delete a list or stage; its applications stay on the board or service"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteLane<F: Family> {
    /// Who is deleting
    pub actor: Actor,
    /// The lane to delete
    pub lane_id: LaneId,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> DeleteLane<F> {
    pub fn new(actor: Actor, lane_id: impl Into<LaneId>) -> Self {
        Self {
            actor,
            lane_id: lane_id.into(),
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let actor = self.actor;
        let id = self.lane_id;
        let detached = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                engine.authorized_lane(&actor, id)?;
                engine.delete_lane(id)
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
impl<F: Family> Execute<KanbanContext, KanbanError> for DeleteLane<F> {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        let start = std::time::Instant::now();
        let result = self.run(ctx).await;
        logged(
            self.op_string(),
            log_input(self, F::LANE),
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
    use crate::types::Boards;

    #[tokio::test]
    async fn test_delete_lane_detaches_items_keeping_container() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let lane = board.lanes[1].lane.id;
        let m = application_in::<Boards>(&ctx, owner, lane, "M").await;
        let n = application_in::<Boards>(&ctx, owner, lane, "N").await;

        let result = DeleteLane::<Boards>::new(owner, lane)
            .execute(&ctx)
            .await
            .into_result()
            .unwrap();
        assert_eq!(result["detached"], 2);

        for item in [m, n] {
            let placement = ctx
                .read(move |conn| rows::placement::<Boards>(conn, item))
                .await
                .unwrap();
            assert_eq!(placement.lane_id, None);
            assert_eq!(placement.position, 0);
            assert_eq!(placement.container_id, Some(board.container.id));
        }

        let missing = ctx
            .read(move |conn| rows::lane::<Boards>(conn, lane))
            .await;
        assert!(matches!(missing, Err(KanbanError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_foreign_lane_is_unauthorized() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let lane = board.lanes[0].lane.id;
        let item = application_in::<Boards>(&ctx, owner, lane, "M").await;

        let result = DeleteLane::<Boards>::new(Actor::member(3), lane)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::Unauthorized { .. })));

        let placement = ctx
            .read(move |conn| rows::placement::<Boards>(conn, item))
            .await
            .unwrap();
        assert_eq!(placement.lane_id, Some(lane));
    }

    #[tokio::test]
    async fn test_delete_missing_lane() {
        let ctx = KanbanContext::in_memory().unwrap();
        let result = DeleteLane::<Boards>::new(Actor::member(3), 404)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_items_in_lane() {
        let ctx = KanbanContext::in_memory().unwrap();
        let owner = Actor::member(7);
        let board = board_with_lanes::<Boards>(&ctx, owner).await;
        let lane = board.lanes[1].lane.id;
        let m = application_in::<Boards>(&ctx, owner, lane, "M").await;

        ctx.write(|tx| {
            tx.execute_batch(
                "CREATE TRIGGER keep_lists BEFORE DELETE ON lists
                 BEGIN SELECT RAISE(ABORT, 'lists are permanent'); END;",
            )?;
            Ok(())
        })
        .await
        .unwrap();

        let result = DeleteLane::<Boards>::new(owner, lane)
            .execute(&ctx)
            .await
            .into_result();
        assert!(matches!(result, Err(KanbanError::Database(_))));

        // The detachment that ran before the delete was rolled back with it
        let placement = ctx
            .read(move |conn| rows::placement::<Boards>(conn, m))
            .await
            .unwrap();
        assert_eq!(placement.lane_id, Some(lane));
        assert_eq!(placement.position, 0);
    }
}

//! SyncLanePositions command

use crate::context::KanbanContext;
use crate::engine::{validate_positions, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, ContainerId, Family, LaneId, PositionUpdate};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Persist the lane order of one container as sent by the client.
///
/// Lanes that are not in `container_id` are skipped and reported.
#[operation(
    verb = "sync",
    noun = "lane positions",
    description = "Persist the order of the lists of a board or the stages of a service"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncLanePositions<F: Family> {
    /// Who is reordering
    pub actor: Actor,
    /// The container whose lanes are reordered
    pub container_id: ContainerId,
    /// (lane id, position) pairs
    pub positions: Vec<PositionUpdate<LaneId>>,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> SyncLanePositions<F> {
    pub fn new(
        actor: Actor,
        container_id: impl Into<ContainerId>,
        positions: Vec<PositionUpdate<LaneId>>,
    ) -> Self {
        Self {
            actor,
            container_id: container_id.into(),
            positions,
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        validate_positions(&self.positions)?;

        let actor = self.actor;
        let container = self.container_id;
        let positions = self.positions.clone();
        let report = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                engine.authorized_container(&actor, container)?;
                engine.sync_lane_positions(container, &positions)
            })
            .await?;

        Ok(serde_json::to_value(report)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for SyncLanePositions<F> {
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

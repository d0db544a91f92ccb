//! ReorderItemInLane command

use super::visual_index;
use crate::context::KanbanContext;
use crate::engine::RepositioningEngine;
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, Family, ItemId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Move an application to another index of the lane it is already in.
///
/// The whole lane is renumbered `0..n` in the new order.
#[operation(
    verb = "reorder",
    noun = "item",
    description = "Move an application within its current list or stage"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderItemInLane<F: Family> {
    /// Who is dragging
    pub actor: Actor,
    /// The application being moved
    pub item_id: ItemId,
    /// Zero-based index in the lane's visual order
    #[param(alias = "index")]
    pub target_index: i64,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> ReorderItemInLane<F> {
    pub fn new(actor: Actor, item_id: impl Into<ItemId>, target_index: i64) -> Self {
        Self {
            actor,
            item_id: item_id.into(),
            target_index,
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let index = visual_index(self.target_index)?;
        let actor = self.actor;
        let item = self.item_id;

        let view = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                let placement = engine.authorized_item(&actor, item)?;
                let lane = placement.lane_id.ok_or_else(|| KanbanError::NotPlaced {
                    id: item.to_string(),
                    lane: F::LANE.to_string(),
                })?;
                engine.reorder(&placement, index)?;
                engine.lane_view_by_id(lane)
            })
            .await?;

        Ok(serde_json::to_value(view)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for ReorderItemInLane<F> {
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

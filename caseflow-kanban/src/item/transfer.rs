//! TransferItem command

use super::visual_index;
use crate::context::KanbanContext;
use crate::engine::{rows, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, Family, ItemId, LaneId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::marker::PhantomData;

/// Move an application into another lane at a visual index.
///
/// Both lanes are renumbered in one transaction and a timeline note records
/// the move. Transferring into the lane the application is already in is a
/// reorder.
#[operation(
    verb = "transfer",
    noun = "item",
    description = "Move an application to a list or stage at a given index"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferItem<F: Family> {
    /// Who is dragging
    pub actor: Actor,
    /// The application being moved
    pub item_id: ItemId,
    /// The lane it is dropped on
    pub lane_id: LaneId,
    /// Zero-based index in the target lane's visual order
    #[param(alias = "index")]
    pub target_index: i64,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> TransferItem<F> {
    pub fn new(
        actor: Actor,
        item_id: impl Into<ItemId>,
        lane_id: impl Into<LaneId>,
        target_index: i64,
    ) -> Self {
        Self {
            actor,
            item_id: item_id.into(),
            lane_id: lane_id.into(),
            target_index,
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let index = visual_index(self.target_index)?;
        let actor = self.actor;
        let item = self.item_id;
        let target = self.lane_id;

        ctx.write(move |tx| {
            let engine = RepositioningEngine::<F>::new(tx);
            let placement = engine.authorized_item(&actor, item)?;
            let (lane, _) = engine.authorized_lane(&actor, target)?;

            let from = match placement.lane_id {
                Some(source) if source != lane.id => Some(rows::lane::<F>(tx, source)?.name),
                _ => None,
            };

            let moved = engine.transfer(&placement, &lane, index)?;

            if moved.source != Some(moved.target) {
                let note = match &from {
                    Some(from) => format!(
                        "moved from {label} '{from}' to {label} '{to}'",
                        label = F::LANE_LABEL,
                        to = lane.name
                    ),
                    None => format!("moved to {} '{}'", F::LANE_LABEL, lane.name),
                };
                rows::insert_timeline(tx, item, &note, &actor)?;
            }

            let source = match moved.source {
                Some(source) if source != moved.target => {
                    Some(engine.lane_view_by_id(source)?)
                }
                _ => None,
            };
            let target = engine.lane_view(lane)?;

            Ok(json!({
                "index": moved.index,
                "source": source,
                "target": target,
            }))
        })
        .await
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for TransferItem<F> {
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

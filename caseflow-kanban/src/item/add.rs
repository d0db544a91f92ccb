//! AddItemToLane command

use crate::context::KanbanContext;
use crate::engine::{rows, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, Family, ItemId, LaneId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Put an application at the end of a lane (`max(position) + 1`).
///
/// An application already placed elsewhere in this family leaves its old
/// lane first; one already in the lane stays where it is.
#[operation(
    verb = "add",
    noun = "item",
    description = "Add an application to the end of a list or stage"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddItemToLane<F: Family> {
    /// Who is adding
    pub actor: Actor,
    /// The application
    pub item_id: ItemId,
    /// The receiving lane
    pub lane_id: LaneId,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> AddItemToLane<F> {
    pub fn new(actor: Actor, item_id: impl Into<ItemId>, lane_id: impl Into<LaneId>) -> Self {
        Self {
            actor,
            item_id: item_id.into(),
            lane_id: lane_id.into(),
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let actor = self.actor;
        let item = self.item_id;
        let target = self.lane_id;

        let view = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                let placement = engine.authorized_item(&actor, item)?;
                let (lane, _) = engine.authorized_lane(&actor, target)?;

                if placement.lane_id != Some(lane.id) {
                    engine.append(&placement, &lane)?;
                    let note = format!("added to {} '{}'", F::LANE_LABEL, lane.name);
                    rows::insert_timeline(tx, item, &note, &actor)?;
                }
                engine.lane_view(lane)
            })
            .await?;

        Ok(serde_json::to_value(view)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for AddItemToLane<F> {
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

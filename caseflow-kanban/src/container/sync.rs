//! SyncContainerPositions command

use crate::context::KanbanContext;
use crate::engine::{validate_positions, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, ContainerId, Family, PositionUpdate, UserId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Persist the owner's container order as sent by the client.
///
/// Rows that do not belong to `owner_id` are skipped and reported; the rest
/// are written in one transaction.
#[operation(
    verb = "sync",
    noun = "container positions",
    description = "Persist the order of an owner's boards or services"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncContainerPositions<F: Family> {
    /// Who is reordering
    pub actor: Actor,
    /// Whose containers are being reordered
    pub owner_id: UserId,
    /// (container id, position) pairs
    pub positions: Vec<PositionUpdate<ContainerId>>,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> SyncContainerPositions<F> {
    pub fn new(actor: Actor, positions: Vec<PositionUpdate<ContainerId>>) -> Self {
        Self {
            actor,
            owner_id: actor.user_id,
            positions,
            family: PhantomData,
        }
    }

    /// Reorder another owner's containers (staff and admins)
    pub fn for_owner(mut self, owner_id: impl Into<UserId>) -> Self {
        self.owner_id = owner_id.into();
        self
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        validate_positions(&self.positions)?;
        if !self.actor.may_act_for(self.owner_id) {
            return Err(KanbanError::unauthorized("owner", self.owner_id));
        }

        let owner = self.owner_id;
        let positions = self.positions.clone();
        let report = ctx
            .write(move |tx| {
                RepositioningEngine::<F>::new(tx).sync_container_positions(owner, &positions)
            })
            .await?;

        Ok(serde_json::to_value(report)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for SyncContainerPositions<F> {
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

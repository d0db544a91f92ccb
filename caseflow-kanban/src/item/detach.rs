//! DetachItem command

use crate::context::KanbanContext;
use crate::engine::{rows, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, Family, ItemId};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Take an application off its board or service without deleting it.
///
/// The lane it leaves is renumbered. Detaching twice leaves the same state
/// as detaching once.
#[operation(
    verb = "detach",
    noun = "item",
    description = "Remove an application from its board or service"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetachItem<F: Family> {
    /// Who is detaching
    pub actor: Actor,
    /// The application
    pub item_id: ItemId,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> DetachItem<F> {
    pub fn new(actor: Actor, item_id: impl Into<ItemId>) -> Self {
        Self {
            actor,
            item_id: item_id.into(),
            family: PhantomData,
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let actor = self.actor;
        let item = self.item_id;

        let placement = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                let placement = engine.authorized_item(&actor, item)?;
                let container = match placement.container_id {
                    Some(id) => Some(rows::container::<F>(tx, id)?.name),
                    None => None,
                };

                if engine.detach(&placement)? {
                    let note = match container {
                        Some(name) => format!("removed from {} '{}'", F::CONTAINER_LABEL, name),
                        None => format!("removed from {}", F::CONTAINER),
                    };
                    rows::insert_timeline(tx, item, &note, &actor)?;
                }
                rows::placement::<F>(tx, item)
            })
            .await?;

        Ok(serde_json::to_value(placement)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for DetachItem<F> {
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

//! AddLane command

use crate::context::KanbanContext;
use crate::engine::RepositioningEngine;
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, ContainerId, Family};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Add a lane after the container's existing lanes
#[operation(
    verb = "add",
    noun = "lane",
    description = "Add a list to a board or a stage to a service"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLane<F: Family> {
    /// Who is adding the lane
    pub actor: Actor,
    /// The container receiving the lane
    pub container_id: ContainerId,
    /// The lane name
    pub name: String,
    /// Optional display color
    pub color: Option<String>,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> AddLane<F> {
    pub fn new(actor: Actor, container_id: impl Into<ContainerId>, name: impl Into<String>) -> Self {
        Self {
            actor,
            container_id: container_id.into(),
            name: name.into(),
            color: None,
            family: PhantomData,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(KanbanError::missing_field("name"));
        }

        let actor = self.actor;
        let container = self.container_id;
        let color = self.color.clone();
        let lane = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                engine.authorized_container(&actor, container)?;
                engine.add_lane(container, &name, color.as_deref())
            })
            .await?;

        Ok(serde_json::to_value(lane)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for AddLane<F> {
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

//! CreateContainer command

use crate::context::KanbanContext;
use crate::engine::RepositioningEngine;
use crate::error::{KanbanError, Result};
use crate::processor::{log_input, logged};
use crate::types::{Actor, Family};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult, Operation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::marker::PhantomData;

/// Create a container owned by the actor, seeded with "To Do", "In Progress"
/// and "Done" lanes
#[operation(
    verb = "create",
    noun = "container",
    description = "Create a board or service with its default lanes"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainer<F: Family> {
    /// Who is creating (and will own) the container
    pub actor: Actor,
    /// The container name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional display color
    pub color: Option<String>,
    #[serde(skip)]
    #[param(skip)]
    family: PhantomData<F>,
}

impl<F: Family> CreateContainer<F> {
    /// Create a new CreateContainer command
    pub fn new(actor: Actor, name: impl Into<String>) -> Self {
        Self {
            actor,
            name: name.into(),
            description: None,
            color: None,
            family: PhantomData,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the color
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
        let description = self.description.clone();
        let color = self.color.clone();

        let view = ctx
            .write(move |tx| {
                let engine = RepositioningEngine::<F>::new(tx);
                let id = engine.create_container(
                    actor.user_id,
                    &name,
                    description.as_deref(),
                    color.as_deref(),
                )?;
                engine.container_view(&actor, id)
            })
            .await?;

        Ok(serde_json::to_value(view)?)
    }
}

#[async_trait]
impl<F: Family> Execute<KanbanContext, KanbanError> for CreateContainer<F> {
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

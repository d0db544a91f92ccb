//! ListTimeline command

use crate::context::KanbanContext;
use crate::engine::{rows, RepositioningEngine};
use crate::error::{KanbanError, Result};
use crate::processor::unlogged;
use crate::types::{Actor, Boards, ItemId, Services};
use caseflow_operations::{async_trait, operation, Execute, ExecutionResult};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;

/// Read an application's timeline, newest first.
///
/// Visible to whoever can reach the application in either family.
#[operation(
    verb = "list",
    noun = "timeline",
    description = "List an application's timeline notes, newest first"
)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTimeline {
    /// Who is reading
    pub actor: Actor,
    /// The application
    pub application_id: ItemId,
}

impl ListTimeline {
    pub fn new(actor: Actor, application_id: impl Into<ItemId>) -> Self {
        Self {
            actor,
            application_id: application_id.into(),
        }
    }

    async fn run(&self, ctx: &KanbanContext) -> Result<Value> {
        let actor = self.actor;
        let id = self.application_id;

        let events = ctx
            .read(move |conn| {
                let application = rows::application(conn, id)?;
                let visible = actor.may_act_for(application.owner_id) || {
                    let boards = RepositioningEngine::<Boards>::new(conn);
                    let services = RepositioningEngine::<Services>::new(conn);
                    boards.can_reach(&actor, &rows::placement::<Boards>(conn, id)?)?
                        || services.can_reach(&actor, &rows::placement::<Services>(conn, id)?)?
                };
                if !visible {
                    warn!(%actor, application = %id, "timeline access denied");
                    return Err(KanbanError::unauthorized("application", id));
                }
                rows::timeline(conn, id)
            })
            .await?;

        Ok(json!({
            "application_id": id,
            "count": events.len(),
            "events": events,
        }))
    }
}

#[async_trait]
impl Execute<KanbanContext, KanbanError> for ListTimeline {
    async fn execute(&self, ctx: &KanbanContext) -> ExecutionResult<Value, KanbanError> {
        unlogged(self.run(ctx).await)
    }
}

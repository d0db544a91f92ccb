//! Fixtures shared by unit and integration tests

use crate::application::CreateApplication;
use crate::container::CreateContainer;
use crate::context::KanbanContext;
use crate::engine::rows;
use crate::item::AddItemToLane;
use crate::types::{Actor, ContainerView, Family, ItemId, LaneId};
use caseflow_operations::Execute;

/// Create a container named "Cases" with its default lanes
pub async fn board_with_lanes<F: Family>(ctx: &KanbanContext, owner: Actor) -> ContainerView {
    let value = CreateContainer::<F>::new(owner, "Cases")
        .execute(ctx)
        .await
        .into_result()
        .expect("create container");
    serde_json::from_value(value).expect("container view")
}

/// Create an application owned by `owner` and append it to `lane`
pub async fn application_in<F: Family>(
    ctx: &KanbanContext,
    owner: Actor,
    lane: LaneId,
    title: &str,
) -> ItemId {
    let value = CreateApplication::new(owner, title)
        .execute(ctx)
        .await
        .into_result()
        .expect("create application");
    let id: ItemId = serde_json::from_value(value["id"].clone()).expect("application id");
    place::<F>(ctx, owner, id, lane).await;
    id
}

/// Append an existing application to `lane`
pub async fn place<F: Family>(ctx: &KanbanContext, actor: Actor, item: ItemId, lane: LaneId) {
    AddItemToLane::<F>::new(actor, item, lane)
        .execute(ctx)
        .await
        .into_result()
        .expect("add to lane");
}

/// `(item, position)` pairs of a lane in visual order
pub async fn positions<F: Family>(ctx: &KanbanContext, lane: LaneId) -> Vec<(ItemId, i64)> {
    ctx.read(move |conn| rows::lane_items::<F>(conn, lane))
        .await
        .expect("lane items")
        .into_iter()
        .map(|item| (item.id, item.position))
        .collect()
}

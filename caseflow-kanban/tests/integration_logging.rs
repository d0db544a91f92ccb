//! Integration tests for activity logging

use caseflow_kanban::{
    application::{CreateApplication, ListTimeline},
    board::{AddToList, CreateBoard, GetBoard, ListBoards, TransferToList},
    service::CreateService,
    Actor, ContainerView, ItemId, KanbanConfig, KanbanContext, KanbanOperationProcessor,
    OperationProcessor,
};
use tempfile::TempDir;

#[test_log::test(tokio::test)]
async fn test_activity_logging_end_to_end() {
    let temp = TempDir::new().unwrap();
    let ctx = KanbanContext::open_path(temp.path().join("cases.db")).unwrap();
    let processor = KanbanOperationProcessor::with_actor("intake-api[req-17]");
    let owner = Actor::member(7);

    // Create a board (logged)
    let value = processor
        .process(&CreateBoard::new(owner, "Visa Cases"), &ctx)
        .await
        .unwrap();
    let board: ContainerView = serde_json::from_value(value).unwrap();
    let (todo, done) = (board.lanes[0].lane.id, board.lanes[2].lane.id);

    // Create and place an application (logged)
    let value = processor
        .process(&CreateApplication::new(owner, "H-1B renewal"), &ctx)
        .await
        .unwrap();
    let case: ItemId = serde_json::from_value(value["id"].clone()).unwrap();
    processor
        .process(&AddToList::new(owner, case, todo), &ctx)
        .await
        .unwrap();
    processor
        .process(&TransferToList::new(owner, case, done, 0), &ctx)
        .await
        .unwrap();

    // Reads are unlogged
    processor
        .process(&GetBoard::new(owner, board.container.id), &ctx)
        .await
        .unwrap();
    processor
        .process(&ListBoards::mine(owner), &ctx)
        .await
        .unwrap();
    processor
        .process(&ListTimeline::new(owner, case), &ctx)
        .await
        .unwrap();

    let entries = ctx.read_activity(None).await.unwrap();
    let ops: Vec<&str> = entries.iter().map(|e| e.op.as_str()).collect();
    assert_eq!(
        ops,
        vec!["transfer item", "add item", "create application", "create container"]
    );

    // Operations name their own actor; the processor's actor is only a fallback
    assert!(entries.iter().all(|e| e.actor.as_deref() == Some("user:7")));

    assert_eq!(entries[0].input["family"], "list");
    assert_eq!(entries[0].input["target_index"], 0);
    assert_eq!(entries[3].input["family"], "board");

    let limited = ctx.read_activity(Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, entries[0].id);
}

#[test_log::test(tokio::test)]
async fn test_failed_operations_are_recorded() {
    let ctx = KanbanContext::in_memory().unwrap();
    let processor = KanbanOperationProcessor::new();

    let value = processor
        .process(&CreateService::new(Actor::member(7), "Immigration"), &ctx)
        .await
        .unwrap();
    let service: ContainerView = serde_json::from_value(value).unwrap();

    let error = processor
        .process(
            &caseflow_kanban::service::DeleteService::new(Actor::member(8), service.container.id),
            &ctx,
        )
        .await
        .unwrap_err();

    let entries = ctx.read_activity(None).await.unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries[0].is_failure());
    assert_eq!(entries[0].op, "delete container");
    assert_eq!(entries[0].actor.as_deref(), Some("user:8"));
    assert_eq!(entries[0].output["error"], error.to_string());

    // Nothing was deleted
    let still_there = processor
        .process(
            &caseflow_kanban::service::GetService::new(Actor::member(7), service.container.id),
            &ctx,
        )
        .await;
    assert!(still_there.is_ok());
}

#[test_log::test(tokio::test)]
async fn test_activity_survives_reopen() {
    let temp = TempDir::new().unwrap();
    let config = KanbanConfig {
        database_path: Some(temp.path().join("nested").join("cases.db")),
        ..KanbanConfig::default()
    };

    {
        let ctx = KanbanContext::open(&config).unwrap();
        KanbanOperationProcessor::new()
            .process(&CreateBoard::new(Actor::member(3), "Asylum"), &ctx)
            .await
            .unwrap();
    }

    let ctx = KanbanContext::open(&config).unwrap();
    let entries = ctx.read_activity(None).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].op, "create container");

    let boards = ListBoards::mine(Actor::member(3));
    let value = KanbanOperationProcessor::new()
        .process(&boards, &ctx)
        .await
        .unwrap();
    assert_eq!(value["count"], 1);
}

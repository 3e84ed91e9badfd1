//! Reaction subsystem integration tests
//!
//! The same behavioral checks run against the local store and against the
//! HTTP store talking to an in-process reactions API.
//!
//! Run with: cargo test -p integration-tests --test reaction_tests

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use cheer_core::{NewReaction, ReactionAction, ReactionKind, ReactionStore};
use cheer_service::{
    AddReactionRequest, ChangeReactionRequest, ClickOutcome, ReactionService, ReactionViewModel,
    RemoveReactionRequest, ServiceContext,
};
use cheer_store::{FileStorage, LocalReactionStore};
use integration_tests::{
    context_with, local_context, unique_subject, unique_voter, TestBackend,
};
use reqwest::StatusCode;

// ============================================================================
// Shared behavioral checks
// ============================================================================

async fn check_lifecycle(ctx: &ServiceContext) {
    let service = ReactionService::new(ctx);
    let s = unique_subject();
    let v = unique_voter();

    service
        .add_reaction(AddReactionRequest::new(&s, &v, ReactionKind::Like))
        .await
        .unwrap();
    let err = service
        .add_reaction(AddReactionRequest::new(&s, &v, ReactionKind::Love))
        .await
        .unwrap_err();
    assert!(err.is_conflict(), "second add should conflict, got {err}");

    service
        .change_reaction(ChangeReactionRequest::new(&s, &v, ReactionKind::Fire))
        .await
        .unwrap();
    let stats = service.get_stats(&s, &v).await.unwrap();
    assert_eq!(stats.counts_by_kind.like, 0);
    assert_eq!(stats.counts_by_kind.fire, 1);
    assert_eq!(stats.total_count, 1);
    assert_eq!(stats.viewer_reaction, Some(ReactionKind::Fire));

    service
        .remove_reaction(RemoveReactionRequest::new(&s, &v))
        .await
        .unwrap();
    let stats = service.get_stats(&s, &v).await.unwrap();
    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.viewer_reaction, None);

    let err = service
        .remove_reaction(RemoveReactionRequest::new(&s, &v))
        .await
        .unwrap_err();
    assert!(err.is_not_found(), "second remove should be not found, got {err}");

    let err = service
        .change_reaction(ChangeReactionRequest::new(&s, &v, ReactionKind::Clap))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

async fn check_cross_voter(ctx: &ServiceContext) {
    let service = ReactionService::new(ctx);
    let s = unique_subject();
    let v1 = unique_voter();
    let v2 = unique_voter();

    service
        .add_reaction(AddReactionRequest::new(&s, &v1, ReactionKind::Like))
        .await
        .unwrap();
    service
        .add_reaction(AddReactionRequest::new(&s, &v2, ReactionKind::Clap))
        .await
        .unwrap();

    let for_v1 = service.get_stats(&s, &v1).await.unwrap();
    let for_v2 = service.get_stats(&s, &v2).await.unwrap();
    assert_eq!(for_v1.viewer_reaction, Some(ReactionKind::Like));
    assert_eq!(for_v2.viewer_reaction, Some(ReactionKind::Clap));
    assert_eq!(for_v1.total_count, 2);
    assert_eq!(for_v2.total_count, 2);
    assert_eq!(for_v1.total_count, for_v1.counts_by_kind.total());
}

async fn check_racing_inserts(ctx: &ServiceContext) {
    let s = unique_subject();
    let v = unique_voter();

    let attempts = ReactionKind::ALL.into_iter().map(|kind| {
        let ctx = ctx.clone();
        let (s, v) = (s.clone(), v.clone());
        tokio::spawn(async move {
            ReactionService::new(&ctx)
                .add_reaction(AddReactionRequest::new(&s, &v, kind))
                .await
        })
    });

    let mut winners = 0;
    for attempt in attempts.collect::<Vec<_>>() {
        match attempt.await.unwrap() {
            Ok(_) => winners += 1,
            Err(e) => assert!(e.is_conflict(), "loser should conflict, got {e}"),
        }
    }
    assert_eq!(winners, 1);

    let reactions = ReactionService::new(ctx).list_reactions(&s).await.unwrap();
    assert_eq!(reactions.len(), 1);
}

async fn check_view_model_flow(ctx: &ServiceContext) {
    let vm = ReactionViewModel::for_installation(ctx.clone(), unique_subject()).unwrap();
    assert!(vm.is_loading());
    vm.load().await.unwrap();
    assert!(!vm.is_loading());

    assert!(matches!(
        vm.click(ReactionKind::Love).await,
        ClickOutcome::Applied(_)
    ));
    assert!(matches!(
        vm.click(ReactionKind::Clap).await,
        ClickOutcome::Applied(_)
    ));
    let stats = vm.stats().unwrap();
    assert_eq!(stats.viewer_reaction, Some(ReactionKind::Clap));
    assert_eq!(stats.total_count, 1);

    assert!(matches!(
        vm.click(ReactionKind::Clap).await,
        ClickOutcome::Applied(_)
    ));
    assert_eq!(vm.stats().unwrap().total_count, 0);
}

// ============================================================================
// Local store
// ============================================================================

#[tokio::test]
async fn test_local_lifecycle() {
    check_lifecycle(&local_context().unwrap()).await;
}

#[tokio::test]
async fn test_local_cross_voter() {
    check_cross_voter(&local_context().unwrap()).await;
}

#[tokio::test]
async fn test_local_racing_inserts() {
    check_racing_inserts(&local_context().unwrap()).await;
}

#[tokio::test]
async fn test_local_view_model_flow() {
    check_view_model_flow(&local_context().unwrap()).await;
}

#[tokio::test]
async fn test_file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cheer-data.json");
    let s = unique_subject();
    let v = unique_voter();

    {
        let storage = Arc::new(FileStorage::open(&path).unwrap());
        let ctx = context_with(Arc::new(LocalReactionStore::open(storage).unwrap()));
        ReactionService::new(&ctx)
            .add_reaction(AddReactionRequest::new(&s, &v, ReactionKind::Celebrate))
            .await
            .unwrap();
    }

    let storage = Arc::new(FileStorage::open(&path).unwrap());
    let ctx = context_with(Arc::new(LocalReactionStore::open(storage).unwrap()));
    let stats = ReactionService::new(&ctx).get_stats(&s, &v).await.unwrap();
    assert_eq!(stats.viewer_reaction, Some(ReactionKind::Celebrate));

    // The at-rest layout is a JSON array of records under the reactions key
    let raw = std::fs::read_to_string(&path).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let records: serde_json::Value =
        serde_json::from_str(doc["birthday-reactions"].as_str().unwrap()).unwrap();
    let record = &records[0];
    assert_eq!(record["employeeId"], s.as_str());
    assert_eq!(record["deviceId"], v.as_str());
    assert_eq!(record["reactionType"], "celebrate");
    assert!(record["timestamp"].is_i64());
}

// ============================================================================
// HTTP store
// ============================================================================

#[tokio::test]
async fn test_http_lifecycle() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    check_lifecycle(&backend.context().unwrap()).await;
}

#[tokio::test]
async fn test_http_cross_voter() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    check_cross_voter(&backend.context().unwrap()).await;
}

#[tokio::test]
async fn test_http_racing_inserts() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    check_racing_inserts(&backend.context().unwrap()).await;
}

#[tokio::test]
async fn test_http_view_model_flow() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    check_view_model_flow(&backend.context().unwrap()).await;
}

#[tokio::test]
async fn test_http_bulk_stats() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.context().unwrap();
    let service = ReactionService::new(&ctx);
    let v = unique_voter();
    let subjects: Vec<_> = (0..4).map(|_| unique_subject()).collect();

    for (subject, kind) in subjects.iter().zip(ReactionKind::ALL) {
        service
            .add_reaction(AddReactionRequest::new(subject, &v, kind))
            .await
            .unwrap();
    }

    let bulk = service.get_bulk_stats(&subjects, &v).await.unwrap();
    assert_eq!(bulk.len(), 4);
    for (subject, kind) in subjects.iter().zip(ReactionKind::ALL) {
        assert_eq!(bulk[subject].viewer_reaction, Some(kind));
    }
}

#[tokio::test]
async fn test_http_subject_with_reserved_characters() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.context().unwrap();
    let service = ReactionService::new(&ctx);
    let s = cheer_core::SubjectId::parse("team a/b?x=1").unwrap();
    let v = unique_voter();

    service
        .add_reaction(AddReactionRequest::new(&s, &v, ReactionKind::Fire))
        .await
        .unwrap();
    let stats = service.get_stats(&s, &v).await.unwrap();
    assert_eq!(stats.viewer_reaction, Some(ReactionKind::Fire));

    service
        .remove_reaction(RemoveReactionRequest::new(&s, &v))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_http_timeout_is_transient() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let store = backend.http_store(Duration::from_millis(100)).unwrap();
    backend.set_delay(Duration::from_millis(500));

    let err = store.list(&unique_subject()).await.unwrap_err();
    assert!(err.is_transient(), "expected transient, got {err}");
}

#[tokio::test]
async fn test_http_server_error_is_transient() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.context().unwrap();
    backend.force_status(Some(StatusCode::SERVICE_UNAVAILABLE));

    let s = unique_subject();
    let v = unique_voter();
    let service = ReactionService::new(&ctx);
    assert!(service.get_stats(&s, &v).await.unwrap_err().is_transient());
    assert!(service
        .add_reaction(AddReactionRequest::new(&s, &v, ReactionKind::Like))
        .await
        .unwrap_err()
        .is_transient());
}

#[tokio::test]
async fn test_http_view_model_keeps_stats_on_outage() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.context().unwrap();
    let vm = ReactionViewModel::for_installation(ctx, unique_subject()).unwrap();
    vm.load().await.unwrap();
    vm.click(ReactionKind::Like).await;
    let before = vm.stats().unwrap();

    backend.force_status(Some(StatusCode::BAD_GATEWAY));
    assert_eq!(vm.click(ReactionKind::Fire).await, ClickOutcome::Failed);
    assert_eq!(vm.stats().unwrap(), before);
    assert!(!vm.is_submitting());

    backend.force_status(None);
    assert!(matches!(
        vm.click(ReactionKind::Fire).await,
        ClickOutcome::Applied(_)
    ));
}

#[tokio::test]
async fn test_http_view_model_resyncs_after_remote_delete() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.context().unwrap();
    let vm = ReactionViewModel::for_installation(ctx, unique_subject()).unwrap();
    vm.load().await.unwrap();
    vm.click(ReactionKind::Love).await;

    // Another tab removes the reaction behind this view's back
    backend
        .store()
        .delete(vm.subject_id(), vm.voter_id())
        .await
        .unwrap();

    assert_eq!(vm.click(ReactionKind::Love).await, ClickOutcome::Resynced);
    assert_eq!(vm.stats().unwrap().viewer_reaction, None);
    assert!(vm.last_error().is_none());
}

#[tokio::test]
async fn test_http_view_model_reroutes_after_remote_add() {
    let backend = TestBackend::start().await.expect("Failed to start backend");
    let ctx = backend.context().unwrap();
    let vm = ReactionViewModel::for_installation(ctx, unique_subject()).unwrap();
    vm.load().await.unwrap();

    // Another tab reacts before this view has seen it
    backend
        .store()
        .insert(NewReaction::new(
            vm.subject_id().clone(),
            vm.voter_id().clone(),
            ReactionKind::Clap,
        ))
        .await
        .unwrap();

    assert_eq!(
        vm.click(ReactionKind::Fire).await,
        ClickOutcome::Applied(ReactionAction::Change(ReactionKind::Fire))
    );
    let stats = vm.stats().unwrap();
    assert_eq!(stats.viewer_reaction, Some(ReactionKind::Fire));
    assert_eq!(stats.total_count, 1);
}

#[tokio::test]
async fn test_voter_ids_are_distinct_per_installation() {
    let ids: HashSet<_> = (0..50)
        .map(|_| {
            local_context()
                .unwrap()
                .voter_id()
                .unwrap()
                .into_inner()
        })
        .collect();
    assert_eq!(ids.len(), 50);
}

//! Integration tests for lesson catalog and progress queries.

use plansmith_db::queries::lessons::{self, NewLesson};
use plansmith_db::queries::progress;
use plansmith_test_utils::{create_test_db, drop_test_db};

fn sample_lesson<'a>(slug: &'a str, category: &'a str, position: i32) -> NewLesson<'a> {
    NewLesson {
        slug,
        title: "Writing your executive summary",
        description: "How to open a plan that gets read.",
        url: "https://video.example.com/exec-summary",
        duration_minutes: 12,
        category,
        position,
    }
}

#[tokio::test]
async fn upsert_and_list_lessons() {
    let (pool, db_name) = create_test_db().await;

    lessons::upsert_lesson(&pool, &sample_lesson("exec-summary", "writing", 0))
        .await
        .expect("upsert should succeed");
    lessons::upsert_lesson(&pool, &sample_lesson("market-sizing", "research", 1))
        .await
        .expect("upsert should succeed");

    let all = lessons::list_lessons(&pool).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].slug, "exec-summary");
    assert_eq!(all[1].slug, "market-sizing");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn upsert_is_idempotent_on_slug() {
    let (pool, db_name) = create_test_db().await;

    let first = lessons::upsert_lesson(&pool, &sample_lesson("exec-summary", "writing", 0))
        .await
        .unwrap();

    // Re-seed with updated fields; row count must not grow.
    let mut updated = sample_lesson("exec-summary", "writing", 0);
    updated.title = "Executive summaries, revisited";
    let second = lessons::upsert_lesson(&pool, &updated).await.unwrap();

    assert_eq!(first.id, second.id, "upsert should keep the same row");
    assert_eq!(second.title, "Executive summaries, revisited");

    let all = lessons::list_lessons(&pool).await.unwrap();
    assert_eq!(all.len(), 1);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn list_by_category_filters() {
    let (pool, db_name) = create_test_db().await;

    lessons::upsert_lesson(&pool, &sample_lesson("a", "writing", 0))
        .await
        .unwrap();
    lessons::upsert_lesson(&pool, &sample_lesson("b", "research", 1))
        .await
        .unwrap();
    lessons::upsert_lesson(&pool, &sample_lesson("c", "writing", 2))
        .await
        .unwrap();

    let writing = lessons::list_lessons_by_category(&pool, "writing")
        .await
        .unwrap();
    assert_eq!(writing.len(), 2);
    assert!(writing.iter().all(|l| l.category == "writing"));

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn get_lesson_by_slug_roundtrip() {
    let (pool, db_name) = create_test_db().await;

    lessons::upsert_lesson(&pool, &sample_lesson("exec-summary", "writing", 0))
        .await
        .unwrap();

    let found = lessons::get_lesson_by_slug(&pool, "exec-summary")
        .await
        .unwrap();
    assert!(found.is_some());

    let missing = lessons::get_lesson_by_slug(&pool, "nope").await.unwrap();
    assert!(missing.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

// -----------------------------------------------------------------------
// Progress tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn mark_watched_and_aggregate() {
    let (pool, db_name) = create_test_db().await;

    let a = lessons::upsert_lesson(&pool, &sample_lesson("a", "writing", 0))
        .await
        .unwrap();
    lessons::upsert_lesson(&pool, &sample_lesson("b", "research", 1))
        .await
        .unwrap();

    let before = progress::get_learning_progress(&pool).await.unwrap();
    assert_eq!(before.watched, 0);
    assert_eq!(before.total, 2);

    progress::mark_watched(&pool, a.id).await.unwrap();

    let after = progress::get_learning_progress(&pool).await.unwrap();
    assert_eq!(after.watched, 1);
    assert_eq!(after.total, 2);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn mark_watched_keeps_original_timestamp() {
    let (pool, db_name) = create_test_db().await;

    let lesson = lessons::upsert_lesson(&pool, &sample_lesson("a", "writing", 0))
        .await
        .unwrap();

    progress::mark_watched(&pool, lesson.id).await.unwrap();
    let rows = progress::list_lessons_with_progress(&pool).await.unwrap();
    let first_watched_at = rows[0].watched_at.expect("watched_at should be set");

    // Watching again must not move the timestamp.
    progress::mark_watched(&pool, lesson.id).await.unwrap();
    let rows = progress::list_lessons_with_progress(&pool).await.unwrap();
    assert_eq!(rows[0].watched_at, Some(first_watched_at));

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn lessons_with_progress_defaults_to_unwatched() {
    let (pool, db_name) = create_test_db().await;

    lessons::upsert_lesson(&pool, &sample_lesson("a", "writing", 0))
        .await
        .unwrap();

    let rows = progress::list_lessons_with_progress(&pool).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(!rows[0].watched);
    assert!(rows[0].watched_at.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

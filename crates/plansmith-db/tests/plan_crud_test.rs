//! Integration tests for plan and section CRUD operations.
//!
//! Each test creates a unique temporary database, runs migrations, and drops
//! it on completion so tests are fully isolated.

use uuid::Uuid;

use plansmith_db::models::PlanStatus;
use plansmith_db::queries::{plans, sections};
use plansmith_test_utils::{create_test_db, drop_test_db};

/// Helper: insert a plan with two sections in stored order.
async fn seed_plan_with_sections(pool: &sqlx::PgPool) -> plansmith_db::models::Plan {
    let plan = plans::insert_plan(pool, "Solar kits", "renewable energy", PlanStatus::Complete)
        .await
        .expect("insert_plan should succeed");

    for (position, (title, content)) in [
        ("Executive Summary", "We build solar kits."),
        ("Market Analysis", "Rural demand is high."),
    ]
    .into_iter()
    .enumerate()
    {
        sqlx::query(
            "INSERT INTO plan_sections (plan_id, position, title, content) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(plan.id)
        .bind(position as i32)
        .bind(title)
        .bind(content)
        .execute(pool)
        .await
        .expect("section insert should succeed");
    }

    plan
}

// -----------------------------------------------------------------------
// Plan CRUD tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn insert_and_get_plan() {
    let (pool, db_name) = create_test_db().await;

    let plan = plans::insert_plan(&pool, "Bakery", "food service", PlanStatus::Draft)
        .await
        .expect("insert_plan should succeed");

    assert_eq!(plan.title, "Bakery");
    assert_eq!(plan.industry, "food service");
    assert_eq!(plan.status, PlanStatus::Draft);

    let fetched = plans::get_plan(&pool, plan.id)
        .await
        .expect("get_plan should succeed")
        .expect("plan should exist");

    assert_eq!(fetched.id, plan.id);
    assert_eq!(fetched.title, "Bakery");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn get_plan_returns_none_for_missing_id() {
    let (pool, db_name) = create_test_db().await;

    let result = plans::get_plan(&pool, Uuid::new_v4())
        .await
        .expect("get_plan should not error");

    assert!(result.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn list_plans_returns_all() {
    let (pool, db_name) = create_test_db().await;

    plans::insert_plan(&pool, "Plan A", "retail", PlanStatus::Complete)
        .await
        .unwrap();
    plans::insert_plan(&pool, "Plan B", "logistics", PlanStatus::Draft)
        .await
        .unwrap();

    let all = plans::list_plans(&pool).await.unwrap();
    assert_eq!(all.len(), 2);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn update_plan_status_succeeds() {
    let (pool, db_name) = create_test_db().await;

    let plan = plans::insert_plan(&pool, "Status test", "retail", PlanStatus::Draft)
        .await
        .unwrap();

    plans::update_plan_status(&pool, plan.id, PlanStatus::Complete)
        .await
        .expect("update should succeed");

    let updated = plans::get_plan(&pool, plan.id).await.unwrap().unwrap();
    assert_eq!(updated.status, PlanStatus::Complete);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn update_plan_status_fails_for_missing_plan() {
    let (pool, db_name) = create_test_db().await;

    let result = plans::update_plan_status(&pool, Uuid::new_v4(), PlanStatus::Complete).await;
    assert!(result.is_err());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn count_plans_by_status_aggregates() {
    let (pool, db_name) = create_test_db().await;

    plans::insert_plan(&pool, "A", "retail", PlanStatus::Draft)
        .await
        .unwrap();
    plans::insert_plan(&pool, "B", "retail", PlanStatus::Complete)
        .await
        .unwrap();
    plans::insert_plan(&pool, "C", "retail", PlanStatus::Complete)
        .await
        .unwrap();

    let counts = plans::count_plans_by_status(&pool).await.unwrap();
    assert_eq!(counts.draft, 1);
    assert_eq!(counts.complete, 2);
    assert_eq!(counts.total, 3);

    pool.close().await;
    drop_test_db(&db_name).await;
}

// -----------------------------------------------------------------------
// Section tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn sections_come_back_in_stored_order() {
    let (pool, db_name) = create_test_db().await;

    let plan = seed_plan_with_sections(&pool).await;

    let fetched = sections::list_sections_for_plan(&pool, plan.id)
        .await
        .unwrap();
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].title, "Executive Summary");
    assert_eq!(fetched[0].position, 0);
    assert_eq!(fetched[1].title, "Market Analysis");
    assert_eq!(fetched[1].position, 1);
    assert!(fetched[0].edited_at.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn get_section_by_title_is_case_insensitive() {
    let (pool, db_name) = create_test_db().await;

    let plan = seed_plan_with_sections(&pool).await;

    let section = sections::get_section_by_title(&pool, plan.id, "market analysis")
        .await
        .unwrap()
        .expect("section should be found");
    assert_eq!(section.title, "Market Analysis");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn update_section_content_records_edit() {
    let (pool, db_name) = create_test_db().await;

    let plan = seed_plan_with_sections(&pool).await;

    let updated =
        sections::update_section_content(&pool, plan.id, "Executive Summary", "New content.")
            .await
            .expect("update should succeed");

    assert_eq!(updated.content, "New content.");
    assert!(
        updated.edited_at.is_some(),
        "edited_at should be set by a direct edit"
    );

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn update_section_content_fails_for_unknown_title() {
    let (pool, db_name) = create_test_db().await;

    let plan = seed_plan_with_sections(&pool).await;

    let result =
        sections::update_section_content(&pool, plan.id, "Nonexistent Section", "text").await;
    assert!(result.is_err());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn deleting_plan_cascades_to_sections() {
    let (pool, db_name) = create_test_db().await;

    let plan = seed_plan_with_sections(&pool).await;
    assert_eq!(
        sections::count_sections_for_plan(&pool, plan.id)
            .await
            .unwrap(),
        2
    );

    sqlx::query("DELETE FROM plans WHERE id = $1")
        .bind(plan.id)
        .execute(&pool)
        .await
        .unwrap();

    assert_eq!(
        sections::count_sections_for_plan(&pool, plan.id)
            .await
            .unwrap(),
        0
    );

    pool.close().await;
    drop_test_db(&db_name).await;
}

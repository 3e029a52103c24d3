use std::sync::Arc;

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, Set};
use uuid::Uuid;

use super::IssueService;
use crate::app_data::AppData;
use crate::errors::api::IssueApiError;
use crate::types::db::issue;
use crate::types::db::user::Role;
use crate::types::dto::issues::{self, CreateIssueRequest};
use crate::types::internal::Claims;

async fn setup() -> (Arc<AppData>, IssueService) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let app_data = AppData::init(db, "test-secret-key-minimum-32-characters-long".to_string());
    let service = IssueService::new(&app_data);

    (app_data, service)
}

async fn register(app_data: &AppData, username: &str) -> Claims {
    let user = app_data
        .user_store
        .create_user(username.to_string(), "password123".to_string(), None, None)
        .await
        .expect("Failed to create user");

    claims_for(&user.id)
}

async fn register_admin(app_data: &AppData, username: &str) -> Claims {
    let claims = register(app_data, username).await;
    app_data
        .user_store
        .set_role(username, Role::Admin)
        .await
        .expect("Failed to promote user");
    claims
}

fn claims_for(user_id: &str) -> Claims {
    let now = Utc::now().timestamp();
    Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: now,
    }
}

fn report(title: &str, category: &str) -> CreateIssueRequest {
    CreateIssueRequest {
        title: title.to_string(),
        description: format!("Details about: {}", title),
        category: category.to_string(),
        latitude: 12.9716,
        longitude: 77.5946,
        address: Some("MG Road, Bangalore".to_string()),
        image_url: None,
    }
}

/// Insert an issue row directly, bypassing the service, to control
/// created_at for ordering and pagination assertions.
async fn insert_issue_at(
    app_data: &AppData,
    author_id: &str,
    title: &str,
    category: issue::Category,
    status: issue::IssueStatus,
    created_at: i64,
) -> String {
    let id = Uuid::new_v4().to_string();
    issue::ActiveModel {
        id: Set(id.clone()),
        title: Set(title.to_string()),
        description: Set(format!("Details about: {}", title)),
        category: Set(category),
        status: Set(status),
        latitude: Set(12.9716),
        longitude: Set(77.5946),
        address: Set(None),
        image_url: Set(None),
        author_id: Set(author_id.to_string()),
        created_at: Set(created_at),
    }
    .insert(&app_data.db)
    .await
    .expect("Failed to insert issue row");

    id
}

#[tokio::test]
async fn test_create_issue_starts_open_with_empty_vote_set() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let view = service
        .create_issue(&reporter, report("Pothole", "INFRASTRUCTURE"))
        .await
        .expect("Failed to create issue");

    assert_eq!(view.status, issues::IssueStatus::Open);
    assert_eq!(view.category, issues::Category::Infrastructure);
    assert_eq!(view.vote_count, 0);
    assert!(!view.has_user_voted);
    assert_eq!(view.author.id, reporter.sub);
}

#[tokio::test]
async fn test_create_issue_rejects_empty_title() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let mut req = report("placeholder", "OTHER");
    req.title = String::new();

    match service.create_issue(&reporter, req).await {
        Err(IssueApiError::InvalidArgument(_)) => {}
        other => panic!("Expected InvalidArgument, got {:?}", other.map(|v| v.id)),
    }
}

#[tokio::test]
async fn test_create_issue_rejects_overlong_fields() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let mut req = report("placeholder", "OTHER");
    req.title = "x".repeat(101);
    assert!(matches!(
        service.create_issue(&reporter, req).await,
        Err(IssueApiError::InvalidArgument(_))
    ));

    let mut req = report("placeholder", "OTHER");
    req.description = "x".repeat(501);
    assert!(matches!(
        service.create_issue(&reporter, req).await,
        Err(IssueApiError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_create_issue_accepts_boundary_lengths() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let mut req = report("placeholder", "OTHER");
    req.title = "x".repeat(100);
    req.description = "x".repeat(500);

    let view = service
        .create_issue(&reporter, req)
        .await
        .expect("Boundary lengths should be accepted");
    assert_eq!(view.title.chars().count(), 100);
}

#[tokio::test]
async fn test_create_issue_rejects_unknown_category() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    match service.create_issue(&reporter, report("Pothole", "POTHOLES")).await {
        Err(IssueApiError::InvalidArgument(_)) => {}
        other => panic!("Expected InvalidArgument, got {:?}", other.map(|v| v.id)),
    }
}

#[tokio::test]
async fn test_create_issue_rejects_non_finite_coordinates() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let mut req = report("Pothole", "INFRASTRUCTURE");
    req.latitude = f64::NAN;
    assert!(matches!(
        service.create_issue(&reporter, req).await,
        Err(IssueApiError::InvalidArgument(_))
    ));

    let mut req = report("Pothole", "INFRASTRUCTURE");
    req.longitude = f64::INFINITY;
    assert!(matches!(
        service.create_issue(&reporter, req).await,
        Err(IssueApiError::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn test_failed_validation_persists_nothing() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let mut req = report("Pothole", "INFRASTRUCTURE");
    req.description = String::new();
    let _ = service.create_issue(&reporter, req).await;

    let total = app_data
        .issue_store
        .count_all()
        .await
        .expect("count failed");
    assert_eq!(total, 0);
}

#[tokio::test]
async fn test_list_filters_compose_with_and() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Dark alley",
        issue::Category::Safety,
        issue::IssueStatus::Open,
        100,
    )
    .await;
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Fixed streetlight",
        issue::Category::Safety,
        issue::IssueStatus::Resolved,
        200,
    )
    .await;
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Pothole",
        issue::Category::Infrastructure,
        issue::IssueStatus::Open,
        300,
    )
    .await;

    let views = service
        .list_issues(
            None,
            Some("SAFETY".to_string()),
            Some("OPEN".to_string()),
            None,
            None,
            None,
        )
        .await
        .expect("list failed");

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].title, "Dark alley");
}

#[tokio::test]
async fn test_list_all_sentinel_means_no_filter() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Dark alley",
        issue::Category::Safety,
        issue::IssueStatus::Open,
        100,
    )
    .await;
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Pothole",
        issue::Category::Infrastructure,
        issue::IssueStatus::Resolved,
        200,
    )
    .await;

    let views = service
        .list_issues(
            None,
            Some("ALL".to_string()),
            Some("ALL".to_string()),
            None,
            None,
            None,
        )
        .await
        .expect("list failed");

    assert_eq!(views.len(), 2);
}

#[tokio::test]
async fn test_list_rejects_unknown_filter_values() {
    let (_app_data, service) = setup().await;

    let result = service
        .list_issues(None, Some("POTHOLES".to_string()), None, None, None, None)
        .await;
    assert!(matches!(result, Err(IssueApiError::InvalidArgument(_))));

    let result = service
        .list_issues(None, None, Some("DONE".to_string()), None, None, None)
        .await;
    assert!(matches!(result, Err(IssueApiError::InvalidArgument(_))));
}

#[tokio::test]
async fn test_list_orders_most_recent_first() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Oldest",
        issue::Category::Other,
        issue::IssueStatus::Open,
        100,
    )
    .await;
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Newest",
        issue::Category::Other,
        issue::IssueStatus::Open,
        300,
    )
    .await;
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Middle",
        issue::Category::Other,
        issue::IssueStatus::Open,
        200,
    )
    .await;

    let views = service
        .list_issues(None, None, None, None, None, None)
        .await
        .expect("list failed");

    let titles: Vec<&str> = views.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["Newest", "Middle", "Oldest"]);
}

#[tokio::test]
async fn test_list_pagination_windows_are_stable() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    for i in 0..5 {
        insert_issue_at(
            &app_data,
            &reporter.sub,
            &format!("Issue {}", i),
            issue::Category::Other,
            issue::IssueStatus::Open,
            100 + i,
        )
        .await;
    }

    let first_page = service
        .list_issues(None, None, None, None, Some(2), Some(0))
        .await
        .expect("list failed");
    let second_page = service
        .list_issues(None, None, None, None, Some(2), Some(2))
        .await
        .expect("list failed");
    let last_page = service
        .list_issues(None, None, None, None, Some(2), Some(4))
        .await
        .expect("list failed");

    let titles: Vec<String> = first_page
        .iter()
        .chain(second_page.iter())
        .chain(last_page.iter())
        .map(|v| v.title.clone())
        .collect();

    assert_eq!(
        titles,
        vec!["Issue 4", "Issue 3", "Issue 2", "Issue 1", "Issue 0"]
    );
}

#[tokio::test]
async fn test_list_text_search_is_case_insensitive_over_title_and_description() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Pothole on MG Road",
        issue::Category::Infrastructure,
        issue::IssueStatus::Open,
        100,
    )
    .await;
    // "pothole" appears only in the generated description here
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Road damage",
        issue::Category::Infrastructure,
        issue::IssueStatus::Open,
        200,
    )
    .await;
    insert_issue_at(
        &app_data,
        &reporter.sub,
        "Garbage dumping",
        issue::Category::Environment,
        issue::IssueStatus::Open,
        300,
    )
    .await;

    let views = service
        .list_issues(None, None, None, Some("pOtHoLe".to_string()), None, None)
        .await
        .expect("list failed");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].title, "Pothole on MG Road");

    // Substring match against the description as well
    let views = service
        .list_issues(None, None, None, Some("about: road".to_string()), None, None)
        .await
        .expect("list failed");
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].title, "Road damage");

    // Text search ANDs with the category filter
    let views = service
        .list_issues(
            None,
            Some("ENVIRONMENT".to_string()),
            None,
            Some("pothole".to_string()),
            None,
            None,
        )
        .await
        .expect("list failed");
    assert!(views.is_empty());
}

#[tokio::test]
async fn test_list_enriches_vote_data_per_viewer() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;
    let voter = register(&app_data, "voter").await;

    let issue_id = insert_issue_at(
        &app_data,
        &reporter.sub,
        "Pothole",
        issue::Category::Infrastructure,
        issue::IssueStatus::Open,
        100,
    )
    .await;

    app_data
        .vote_store
        .cast(&voter.sub, &issue_id)
        .await
        .expect("cast failed");

    let for_voter = service
        .list_issues(Some(&voter), None, None, None, None, None)
        .await
        .expect("list failed");
    assert_eq!(for_voter[0].vote_count, 1);
    assert!(for_voter[0].has_user_voted);

    let for_reporter = service
        .list_issues(Some(&reporter), None, None, None, None, None)
        .await
        .expect("list failed");
    assert_eq!(for_reporter[0].vote_count, 1);
    assert!(!for_reporter[0].has_user_voted);

    let anonymous = service
        .list_issues(None, None, None, None, None, None)
        .await
        .expect("list failed");
    assert_eq!(anonymous[0].vote_count, 1);
    assert!(!anonymous[0].has_user_voted);
}

#[tokio::test]
async fn test_set_status_requires_admin_and_leaves_issue_untouched() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let view = service
        .create_issue(&reporter, report("Pothole", "INFRASTRUCTURE"))
        .await
        .expect("create failed");

    let result = service.set_status(&reporter, &view.id, "RESOLVED").await;
    match result {
        Err(IssueApiError::Forbidden(_)) => {}
        other => panic!("Expected Forbidden, got {:?}", other.map(|v| v.id)),
    }

    let reloaded = app_data
        .issue_store
        .require(&view.id)
        .await
        .expect("reload failed");
    assert_eq!(reloaded.status, issue::IssueStatus::Open);
}

#[tokio::test]
async fn test_set_status_rejects_unknown_actor() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;

    let view = service
        .create_issue(&reporter, report("Pothole", "INFRASTRUCTURE"))
        .await
        .expect("create failed");

    let ghost = claims_for("no-such-user");
    let result = service.set_status(&ghost, &view.id, "RESOLVED").await;
    assert!(matches!(result, Err(IssueApiError::Forbidden(_))));
}

#[tokio::test]
async fn test_set_status_allows_every_transition_pair() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;
    let admin = register_admin(&app_data, "admin").await;

    let view = service
        .create_issue(&reporter, report("Pothole", "INFRASTRUCTURE"))
        .await
        .expect("create failed");

    let statuses = ["OPEN", "IN_PROGRESS", "RESOLVED"];
    for from in statuses {
        for to in statuses {
            service
                .set_status(&admin, &view.id, from)
                .await
                .unwrap_or_else(|e| panic!("Transition to {} failed: {}", from, e));
            let updated = service
                .set_status(&admin, &view.id, to)
                .await
                .unwrap_or_else(|e| panic!("Transition {} -> {} failed: {}", from, to, e));

            let expected: issues::IssueStatus = issue::IssueStatus::parse(to).unwrap().into();
            assert_eq!(updated.status, expected);
        }
    }
}

#[tokio::test]
async fn test_set_status_rejects_unknown_status() {
    let (app_data, service) = setup().await;
    let reporter = register(&app_data, "reporter").await;
    let admin = register_admin(&app_data, "admin").await;

    let view = service
        .create_issue(&reporter, report("Pothole", "INFRASTRUCTURE"))
        .await
        .expect("create failed");

    let result = service.set_status(&admin, &view.id, "DONE").await;
    assert!(matches!(result, Err(IssueApiError::InvalidArgument(_))));

    let reloaded = app_data
        .issue_store
        .require(&view.id)
        .await
        .expect("reload failed");
    assert_eq!(reloaded.status, issue::IssueStatus::Open);
}

#[tokio::test]
async fn test_set_status_unknown_issue_is_not_found() {
    let (app_data, service) = setup().await;
    let admin = register_admin(&app_data, "admin").await;

    let result = service.set_status(&admin, "no-such-issue", "RESOLVED").await;
    assert!(matches!(result, Err(IssueApiError::NotFound(_))));
}

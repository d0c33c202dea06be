mod common;

use demo_core::domain::{
    Authentication, Authorization, Filter, Group, GroupType, NewUser, Permission, Principal, Resource,
    ANY_RESOURCE_ID,
};
use demo_core::ports::{AuthorizationService, FilterService, IdentityService};
use demo_core::services::sample_data::{demo_filters, filter_properties, CAMUNDA_ADMIN_GROUP_ID, DEMO_USER_ID};
use demo_core::services::{SeedOutcome, SeedReport};

/// 17 admin grants, 13 business grants, 3 filter read grants.
const SEEDED_AUTHORIZATIONS: usize = 33;

#[tokio::test]
async fn test_fresh_environment_is_seeded() {
    let engine = common::engine();

    let outcome = common::seed(&engine, false).await;

    let SeedOutcome::Seeded(report) = outcome else {
        panic!("expected a seeded environment, got {:?}", outcome);
    };
    assert_eq!(
        report,
        SeedReport {
            users_created: 4,
            groups_created: 4,
            memberships_created: 7,
            authorizations_created: SEEDED_AUTHORIZATIONS,
            filters_created: 7,
            skipped: 0,
        }
    );
    assert_eq!(engine.user_count(), 4);
    assert_eq!(engine.authorization_count(), SEEDED_AUTHORIZATIONS);
}

#[tokio::test]
async fn test_second_run_changes_nothing() {
    let engine = common::engine();
    common::seed(&engine, false).await;

    assert_eq!(common::seed(&engine, false).await, SeedOutcome::AlreadySeeded);
    assert_eq!(engine.user_count(), 4);
    assert_eq!(engine.group_count(), 4);
    assert_eq!(engine.authorization_count(), SEEDED_AUTHORIZATIONS);
    assert_eq!(engine.list_filters().await.unwrap().len(), 7);
}

#[tokio::test]
async fn test_memberships() {
    let engine = common::engine();
    common::seed(&engine, false).await;

    let mut demo_groups = engine.group_ids_of("demo").await.unwrap();
    demo_groups.sort();
    assert_eq!(demo_groups, vec!["accounting", "camunda-admin", "management", "sales"]);
    assert_eq!(engine.group_ids_of("john").await.unwrap(), vec!["sales"]);
    assert_eq!(engine.group_ids_of("mary").await.unwrap(), vec!["accounting"]);
    assert_eq!(engine.group_ids_of("peter").await.unwrap(), vec!["management"]);

    let admin = engine.find_group(CAMUNDA_ADMIN_GROUP_ID).await.unwrap().unwrap();
    assert_eq!(admin.name, "camunda BPM Administrators");
    assert_eq!(admin.group_type, GroupType::System);
    let sales = engine.find_group("sales").await.unwrap().unwrap();
    assert_eq!(sales.group_type, GroupType::Workflow);
}

#[tokio::test]
async fn test_seeded_passwords_verify() {
    let engine = common::engine();
    common::seed(&engine, false).await;

    assert!(engine.check_password("demo", "demo").await.unwrap());
    assert!(engine.check_password("peter", "peter").await.unwrap());
    assert!(!engine.check_password("peter", "demo").await.unwrap());

    let john = engine.find_user("john").await.unwrap().unwrap();
    assert_eq!(john.full_name(), "John Doe");
    assert_eq!(john.email, "john@camunda.org");
}

#[tokio::test]
async fn test_existing_admin_group_and_grants_survive() {
    let engine = common::engine();
    engine
        .create_group(Group::new(CAMUNDA_ADMIN_GROUP_ID, "Installation Admins", GroupType::System))
        .await
        .unwrap();
    engine
        .save_authorization(
            Authorization::grant_group(CAMUNDA_ADMIN_GROUP_ID, Resource::Task, ANY_RESOURCE_ID)
                .with_permission(Permission::Read),
        )
        .await
        .unwrap();

    let SeedOutcome::Seeded(report) = common::seed(&engine, false).await else {
        panic!("expected a seeded environment");
    };
    assert_eq!(report.groups_created, 3);
    assert_eq!(report.authorizations_created, SEEDED_AUTHORIZATIONS - 1);

    let admin = engine.find_group(CAMUNDA_ADMIN_GROUP_ID).await.unwrap().unwrap();
    assert_eq!(admin.name, "Installation Admins");

    let admin_principal = Principal::Group(CAMUNDA_ADMIN_GROUP_ID.to_string());
    let task_grants = engine
        .find_authorizations(&admin_principal, Resource::Task, ANY_RESOURCE_ID)
        .await
        .unwrap();
    assert_eq!(task_grants.len(), 1);
    assert!(!task_grants[0].grants(Permission::Delete));

    let filter_grants = engine
        .find_authorizations(&admin_principal, Resource::Filter, ANY_RESOURCE_ID)
        .await
        .unwrap();
    assert_eq!(filter_grants.len(), 1);
    assert!(filter_grants[0].grants(Permission::All));
}

#[tokio::test]
async fn test_business_grants() {
    let engine = common::engine();
    common::seed(&engine, false).await;

    let john = Authentication::new("john", vec!["sales".to_string()]);
    let mary = Authentication::new("mary", vec!["accounting".to_string()]);

    assert!(engine
        .is_authorized(&john, Permission::Access, Resource::Application, "tasklist")
        .await
        .unwrap());
    assert!(engine
        .is_authorized(&john, Permission::ReadHistory, Resource::ProcessDefinition, "invoice")
        .await
        .unwrap());
    assert!(engine
        .is_authorized(&john, Permission::Read, Resource::User, "demo")
        .await
        .unwrap());
    assert!(!engine
        .is_authorized(&john, Permission::Read, Resource::User, "mary")
        .await
        .unwrap());
    assert!(engine
        .is_authorized(&mary, Permission::Update, Resource::Task, "any-task")
        .await
        .unwrap());
    assert!(!engine
        .is_authorized(&john, Permission::Update, Resource::Task, "any-task")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_filters_in_priority_order() {
    let engine = common::engine();
    common::seed(&engine, false).await;

    let filters = engine.list_filters().await.unwrap();
    let listed: Vec<(&str, i32)> = filters.iter().map(|f| (f.name.as_str(), f.priority())).collect();
    assert_eq!(
        listed,
        vec![
            ("My Tasks", -10),
            ("My Group Tasks", -5),
            ("Accounting", -3),
            ("John's Tasks", -1),
            ("Mary's Tasks", -1),
            ("Peter's Tasks", -1),
            ("All Tasks", 10),
        ]
    );
    assert!(filters.iter().all(|f| f.owner == DEMO_USER_ID));
    assert!(filters.iter().all(|f| f.properties.variables.len() == 4));
}

#[tokio::test]
async fn test_read_only_identity_writes_nothing() {
    let engine = common::read_only_engine();

    assert_eq!(common::seed(&engine, false).await, SeedOutcome::ReadOnlyIdentity);
    assert_eq!(common::seed(&engine, true).await, SeedOutcome::ReadOnlyIdentity);

    assert_eq!(engine.user_count(), 0);
    assert_eq!(engine.group_count(), 0);
    assert_eq!(engine.authorization_count(), 0);
    assert!(engine.list_filters().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_reconcile_completes_partial_environment() {
    let engine = common::engine();
    engine
        .create_user(NewUser::new("demo", "Demo", "Demo", "demo", "demo@camunda.org"))
        .await
        .unwrap();

    // the sentinel alone hides the gap
    assert_eq!(common::seed(&engine, false).await, SeedOutcome::AlreadySeeded);
    assert_eq!(engine.group_count(), 0);

    let SeedOutcome::Seeded(report) = common::seed(&engine, true).await else {
        panic!("expected reconcile to seed");
    };
    assert_eq!(report.users_created, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.filters_created, 7);

    let SeedOutcome::Seeded(again) = common::seed(&engine, true).await else {
        panic!("expected reconcile to run");
    };
    assert_eq!(again.created(), 0);
    assert_eq!(engine.user_count(), 4);
    assert_eq!(engine.authorization_count(), SEEDED_AUTHORIZATIONS);
}

#[tokio::test]
async fn test_reconcile_grants_read_on_existing_filters() {
    let engine = common::engine();
    // filters saved by an earlier run that stopped before their grants
    for spec in demo_filters().into_iter().filter(|f| f.name == "My Tasks" || f.name == "Accounting") {
        engine
            .save_filter(Filter::new_task_filter(
                spec.name,
                DEMO_USER_ID,
                spec.query,
                filter_properties(spec.description, spec.priority),
            ))
            .await
            .unwrap();
    }

    let SeedOutcome::Seeded(report) = common::seed(&engine, true).await else {
        panic!("expected reconcile to seed");
    };
    assert_eq!(report.filters_created, 5);
    assert_eq!(report.authorizations_created, SEEDED_AUTHORIZATIONS);
    assert_eq!(engine.authorization_count(), SEEDED_AUTHORIZATIONS);

    let mary = Authentication::new("mary", vec!["accounting".to_string()]);
    let readable: Vec<String> = engine
        .readable_filters(&mary)
        .await
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(readable, vec!["My Tasks", "My Group Tasks", "Accounting"]);

    // nothing left to repair
    let SeedOutcome::Seeded(again) = common::seed(&engine, true).await else {
        panic!("expected reconcile to run");
    };
    assert_eq!(again.created(), 0);
    assert_eq!(engine.authorization_count(), SEEDED_AUTHORIZATIONS);
}

// ============================================================================
// Demo Core - Sample Data Generator
// File: crates/demo-core/src/services/sample_data.rs
// ============================================================================
//! Seeds demo users, groups, authorizations and task-list filters.
//!
//! The provisioning plan is an ordered list of [`SeedStep`]s driven by the
//! tables below. Every step checks what is already present and only creates
//! what is missing, so a run can resume an environment that was left half
//! seeded. By default the whole plan is still gated on the sentinel user: if
//! `demo` exists the environment counts as seeded and nothing runs.

use std::sync::Arc;
use tracing::{debug, info};

use crate::domain::{
    Authentication, Authorization, Filter, FilterProperties, FilterVariable, Group, GroupType,
    NewUser, Permission, Principal, Resource, TaskQuery, ANY_RESOURCE_ID, CURRENT_USER_EXPRESSION,
    CURRENT_USER_GROUPS_EXPRESSION,
};
use crate::error::DomainError;
use crate::ports::{AuthorizationService, FilterService, IdentityService};

pub const CAMUNDA_ADMIN_GROUP_ID: &str = "camunda-admin";
pub const SALES_GROUP_ID: &str = "sales";
pub const ACCOUNTING_GROUP_ID: &str = "accounting";
pub const MANAGEMENT_GROUP_ID: &str = "management";

pub const TASK_LIST_RESOURCE_ID: &str = "tasklist";
pub const INVOICE_RESOURCE_ID: &str = "invoice";

pub const DEMO_USER_ID: &str = "demo";
pub const JOHN_USER_ID: &str = "john";
pub const PETER_USER_ID: &str = "peter";
pub const MARY_USER_ID: &str = "mary";

/// (id, first name, last name, password, email)
const DEMO_USERS: [(&str, &str, &str, &str, &str); 4] = [
    (DEMO_USER_ID, "Demo", "Demo", "demo", "demo@camunda.org"),
    (JOHN_USER_ID, "John", "Doe", "john", "john@camunda.org"),
    (MARY_USER_ID, "Mary", "Anne", "mary", "mary@camunda.org"),
    (PETER_USER_ID, "Peter", "Meter", "peter", "peter@camunda.org"),
];

const BUSINESS_GROUPS: [(&str, &str); 3] = [
    (SALES_GROUP_ID, "Sales"),
    (ACCOUNTING_GROUP_ID, "Accounting"),
    (MANAGEMENT_GROUP_ID, "Management"),
];

const ADMIN_GROUP_NAME: &str = "camunda BPM Administrators";

/// (user id, group ids)
const MEMBERSHIPS: [(&str, &[&str]); 4] = [
    (
        DEMO_USER_ID,
        &[SALES_GROUP_ID, ACCOUNTING_GROUP_ID, MANAGEMENT_GROUP_ID, CAMUNDA_ADMIN_GROUP_ID],
    ),
    (JOHN_USER_ID, &[SALES_GROUP_ID]),
    (MARY_USER_ID, &[ACCOUNTING_GROUP_ID]),
    (PETER_USER_ID, &[MANAGEMENT_GROUP_ID]),
];

/// Colleagues each business group may see: (group id, user ids).
const USER_VISIBILITY: [(&str, &[&str]); 3] = [
    (SALES_GROUP_ID, &[DEMO_USER_ID, JOHN_USER_ID]),
    (MANAGEMENT_GROUP_ID, &[DEMO_USER_ID, PETER_USER_ID]),
    (ACCOUNTING_GROUP_ID, &[DEMO_USER_ID, MARY_USER_ID]),
];

/// (name, label) of the task variables every demo filter displays.
const FILTER_VARIABLES: [(&str, &str); 4] = [
    ("amount", "Invoice Amount"),
    ("invoiceNumber", "Invoice Number"),
    ("creditor", "Creditor"),
    ("approver", "Approver"),
];

/// Who besides the owner may read a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAudience {
    OwnerOnly,
    Everyone,
    Group(&'static str),
}

#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub priority: i32,
    pub query: TaskQuery,
    pub audience: FilterAudience,
}

/// The task-list filters of the demo environment, in creation order.
pub fn demo_filters() -> Vec<FilterSpec> {
    vec![
        FilterSpec {
            name: "My Tasks",
            description: "Tasks assigned to me",
            priority: -10,
            query: TaskQuery::new().assignee_expression(CURRENT_USER_EXPRESSION),
            audience: FilterAudience::Everyone,
        },
        FilterSpec {
            name: "My Group Tasks",
            description: "Tasks assigned to my Groups",
            priority: -5,
            query: TaskQuery::new()
                .candidate_group_in_expression(CURRENT_USER_GROUPS_EXPRESSION)
                .unassigned(),
            audience: FilterAudience::Everyone,
        },
        FilterSpec {
            name: "Accounting",
            description: "Tasks for Group Accounting",
            priority: -3,
            query: TaskQuery::new()
                .candidate_group_in(&[ACCOUNTING_GROUP_ID])
                .unassigned(),
            audience: FilterAudience::Group(ACCOUNTING_GROUP_ID),
        },
        FilterSpec {
            name: "John's Tasks",
            description: "Tasks assigned to John",
            priority: -1,
            query: TaskQuery::new().assignee(JOHN_USER_ID),
            audience: FilterAudience::OwnerOnly,
        },
        FilterSpec {
            name: "Mary's Tasks",
            description: "Tasks assigned to Mary",
            priority: -1,
            query: TaskQuery::new().assignee(MARY_USER_ID),
            audience: FilterAudience::OwnerOnly,
        },
        FilterSpec {
            name: "Peter's Tasks",
            description: "Tasks assigned to Peter",
            priority: -1,
            query: TaskQuery::new().assignee(PETER_USER_ID),
            audience: FilterAudience::OwnerOnly,
        },
        FilterSpec {
            name: "All Tasks",
            description: "All Tasks - Not recommended to be used in production :)",
            priority: 10,
            query: TaskQuery::new(),
            audience: FilterAudience::OwnerOnly,
        },
    ]
}

pub fn filter_properties(description: &str, priority: i32) -> FilterProperties {
    FilterProperties {
        description: description.to_string(),
        priority,
        variables: FILTER_VARIABLES
            .iter()
            .map(|(name, label)| FilterVariable::new(name, label))
            .collect(),
    }
}

/// Authorizations of the business groups and users, admin grants excluded.
pub fn demo_authorizations() -> Vec<Authorization> {
    let mut authorizations = Vec::new();
    for (group_id, _) in BUSINESS_GROUPS {
        authorizations.push(
            Authorization::grant_group(group_id, Resource::Application, TASK_LIST_RESOURCE_ID)
                .with_permission(Permission::Access),
        );
        authorizations.push(
            Authorization::grant_group(group_id, Resource::ProcessDefinition, INVOICE_RESOURCE_ID)
                .with_permissions(&[Permission::Read, Permission::ReadHistory]),
        );
    }
    for (group_id, user_ids) in USER_VISIBILITY {
        for user_id in user_ids {
            authorizations.push(
                Authorization::grant_group(group_id, Resource::User, user_id)
                    .with_permission(Permission::Read),
            );
        }
    }
    authorizations.push(
        Authorization::grant_user(MARY_USER_ID, Resource::Task, ANY_RESOURCE_ID)
            .with_permissions(&[Permission::Read, Permission::Update]),
    );
    authorizations
}

/// Provisioning steps, in the order they must run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedStep {
    Users,
    Groups,
    Memberships,
    Authorizations,
    Filters,
}

impl SeedStep {
    pub const PLAN: [SeedStep; 5] = [
        SeedStep::Users,
        SeedStep::Groups,
        SeedStep::Memberships,
        SeedStep::Authorizations,
        SeedStep::Filters,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeedStep::Users => "users",
            SeedStep::Groups => "groups",
            SeedStep::Memberships => "memberships",
            SeedStep::Authorizations => "authorizations",
            SeedStep::Filters => "filters",
        }
    }
}

/// What a seeding run created and what it found already in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub users_created: usize,
    pub groups_created: usize,
    pub memberships_created: usize,
    pub authorizations_created: usize,
    pub filters_created: usize,
    pub skipped: usize,
}

impl SeedReport {
    pub fn created(&self) -> usize {
        self.users_created
            + self.groups_created
            + self.memberships_created
            + self.authorizations_created
            + self.filters_created
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The identity provider rejects writes; nothing was touched.
    ReadOnlyIdentity,
    /// The sentinel user exists; nothing was touched.
    AlreadySeeded,
    Seeded(SeedReport),
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOptions {
    /// Ignore the sentinel user and run every step, creating only what is missing.
    pub reconcile: bool,
}

/// Generates the demo environment's identities, grants and filters.
pub struct SampleDataGenerator {
    identity: Arc<dyn IdentityService>,
    authorizations: Arc<dyn AuthorizationService>,
    filters: Arc<dyn FilterService>,
    options: SeedOptions,
}

impl SampleDataGenerator {
    pub fn new(
        identity: Arc<dyn IdentityService>,
        authorizations: Arc<dyn AuthorizationService>,
        filters: Arc<dyn FilterService>,
        options: SeedOptions,
    ) -> Self {
        Self {
            identity,
            authorizations,
            filters,
            options,
        }
    }

    /// Safe to call on every start. Service failures propagate unchanged.
    pub async fn generate(&self) -> Result<SeedOutcome, DomainError> {
        if self.identity.is_read_only() {
            info!("Identity service provider is Read Only, not creating any demo users.");
            return Ok(SeedOutcome::ReadOnlyIdentity);
        }

        if !self.options.reconcile && self.identity.find_user(DEMO_USER_ID).await?.is_some() {
            info!("Data was already init");
            return Ok(SeedOutcome::AlreadySeeded);
        }

        let mut report = SeedReport::default();
        for step in SeedStep::PLAN {
            debug!(step = step.as_str(), "Applying seed step");
            self.apply(step, &mut report).await?;
        }

        info!(
            users = report.users_created,
            groups = report.groups_created,
            memberships = report.memberships_created,
            authorizations = report.authorizations_created,
            filters = report.filters_created,
            skipped = report.skipped,
            "Demo data generated"
        );
        Ok(SeedOutcome::Seeded(report))
    }

    async fn apply(&self, step: SeedStep, report: &mut SeedReport) -> Result<(), DomainError> {
        match step {
            SeedStep::Users => self.create_users(report).await,
            SeedStep::Groups => self.create_groups(report).await,
            SeedStep::Memberships => self.create_memberships(report).await,
            SeedStep::Authorizations => self.create_authorizations(report).await,
            SeedStep::Filters => self.create_filters(report).await,
        }
    }

    async fn create_users(&self, report: &mut SeedReport) -> Result<(), DomainError> {
        for (id, first_name, last_name, password, email) in DEMO_USERS {
            if self.identity.find_user(id).await?.is_some() {
                report.skipped += 1;
                continue;
            }
            self.identity
                .create_user(NewUser::new(id, first_name, last_name, password, email))
                .await?;
            report.users_created += 1;
        }
        Ok(())
    }

    async fn create_groups(&self, report: &mut SeedReport) -> Result<(), DomainError> {
        let admin = (CAMUNDA_ADMIN_GROUP_ID, ADMIN_GROUP_NAME, GroupType::System);
        let groups = BUSINESS_GROUPS
            .iter()
            .map(|(id, name)| (*id, *name, GroupType::Workflow))
            .chain(std::iter::once(admin));

        for (id, name, group_type) in groups {
            // a pre-existing admin group belongs to the installation and must survive
            if self.identity.find_group(id).await?.is_some() {
                report.skipped += 1;
                continue;
            }
            self.identity.create_group(Group::new(id, name, group_type)).await?;
            report.groups_created += 1;
        }
        Ok(())
    }

    async fn create_memberships(&self, report: &mut SeedReport) -> Result<(), DomainError> {
        for (user_id, group_ids) in MEMBERSHIPS {
            for group_id in group_ids {
                if self.identity.is_member(user_id, group_id).await? {
                    report.skipped += 1;
                    continue;
                }
                self.identity.create_membership(user_id, group_id).await?;
                report.memberships_created += 1;
            }
        }
        Ok(())
    }

    async fn create_authorizations(&self, report: &mut SeedReport) -> Result<(), DomainError> {
        let admin = Principal::Group(CAMUNDA_ADMIN_GROUP_ID.to_string());
        for resource in Resource::ALL {
            let existing = self
                .authorizations
                .find_authorizations(&admin, resource, ANY_RESOURCE_ID)
                .await?;
            if !existing.is_empty() {
                report.skipped += 1;
                continue;
            }
            self.authorizations
                .save_authorization(
                    Authorization::grant_group(CAMUNDA_ADMIN_GROUP_ID, resource, ANY_RESOURCE_ID)
                        .with_permission(Permission::All),
                )
                .await?;
            report.authorizations_created += 1;
        }

        for authorization in demo_authorizations() {
            if self.save_if_missing(authorization).await? {
                report.authorizations_created += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(())
    }

    async fn create_filters(&self, report: &mut SeedReport) -> Result<(), DomainError> {
        for spec in demo_filters() {
            let filter = match self.filters.find_filter_by_name(spec.name).await? {
                Some(existing) => {
                    report.skipped += 1;
                    existing
                }
                None => {
                    let filter = self
                        .filters
                        .save_filter(Filter::new_task_filter(
                            spec.name,
                            DEMO_USER_ID,
                            spec.query,
                            filter_properties(spec.description, spec.priority),
                        ))
                        .await?;
                    report.filters_created += 1;
                    filter
                }
            };

            // an existing filter may still be missing its read grant
            let filter_id = filter.id.to_string();
            let grant = match spec.audience {
                FilterAudience::OwnerOnly => continue,
                FilterAudience::Everyone => Authorization::global(Resource::Filter, &filter_id),
                FilterAudience::Group(group_id) => Authorization::grant_group(group_id, Resource::Filter, &filter_id),
            };
            if self.save_if_missing(grant.with_permission(Permission::Read)).await? {
                report.authorizations_created += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(())
    }

    /// Returns false when an equal or wider authorization is already stored.
    async fn save_if_missing(&self, authorization: Authorization) -> Result<bool, DomainError> {
        let existing = self
            .authorizations
            .find_authorizations(
                &authorization.principal,
                authorization.resource,
                &authorization.resource_id,
            )
            .await?;
        if existing.iter().any(|a| a.subsumes(&authorization)) {
            return Ok(false);
        }
        self.authorizations.save_authorization(authorization).await?;
        Ok(true)
    }
}

/// Authentication the demo fixtures act under.
pub fn demo_admin_authentication() -> Authentication {
    Authentication::new(DEMO_USER_ID, vec![CAMUNDA_ADMIN_GROUP_ID.to_string()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockAuthorizationService, MockFilterService, MockIdentityService};
    use crate::domain::User;

    fn generator(
        identity: MockIdentityService,
        authorizations: MockAuthorizationService,
        filters: MockFilterService,
        options: SeedOptions,
    ) -> SampleDataGenerator {
        SampleDataGenerator::new(
            Arc::new(identity),
            Arc::new(authorizations),
            Arc::new(filters),
            options,
        )
    }

    #[tokio::test]
    async fn test_read_only_identity_performs_no_calls() {
        let mut identity = MockIdentityService::new();
        identity.expect_is_read_only().return_const(true);
        // any other call on these mocks panics
        let generator = generator(
            identity,
            MockAuthorizationService::new(),
            MockFilterService::new(),
            SeedOptions::default(),
        );

        let outcome = generator.generate().await.unwrap();
        assert_eq!(outcome, SeedOutcome::ReadOnlyIdentity);
    }

    #[tokio::test]
    async fn test_read_only_wins_over_reconcile() {
        let mut identity = MockIdentityService::new();
        identity.expect_is_read_only().return_const(true);
        let generator = generator(
            identity,
            MockAuthorizationService::new(),
            MockFilterService::new(),
            SeedOptions { reconcile: true },
        );

        assert_eq!(generator.generate().await.unwrap(), SeedOutcome::ReadOnlyIdentity);
    }

    #[tokio::test]
    async fn test_sentinel_user_stops_seeding() {
        let mut identity = MockIdentityService::new();
        identity.expect_is_read_only().return_const(false);
        identity
            .expect_find_user()
            .withf(|id| id.to_string() == DEMO_USER_ID)
            .times(1)
            .returning(|_| {
                Ok(Some(User {
                    id: DEMO_USER_ID.to_string(),
                    first_name: "Demo".to_string(),
                    last_name: "Demo".to_string(),
                    email: "demo@camunda.org".to_string(),
                    password_hash: String::new(),
                }))
            });
        let generator = generator(
            identity,
            MockAuthorizationService::new(),
            MockFilterService::new(),
            SeedOptions::default(),
        );

        assert_eq!(generator.generate().await.unwrap(), SeedOutcome::AlreadySeeded);
    }

    #[tokio::test]
    async fn test_service_failure_propagates() {
        let mut identity = MockIdentityService::new();
        identity.expect_is_read_only().return_const(false);
        identity.expect_find_user().returning(|_| Ok(None));
        identity
            .expect_create_user()
            .returning(|user| Err(DomainError::UserAlreadyExists(user.id)));
        let generator = generator(
            identity,
            MockAuthorizationService::new(),
            MockFilterService::new(),
            SeedOptions::default(),
        );

        let err = generator.generate().await.unwrap_err();
        assert_eq!(err, DomainError::UserAlreadyExists(DEMO_USER_ID.to_string()));
    }

    #[test]
    fn test_filter_table() {
        let filters = demo_filters();
        let names: Vec<_> = filters.iter().map(|f| (f.name, f.priority)).collect();
        assert_eq!(
            names,
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
    }

    #[test]
    fn test_filter_properties_carry_display_variables() {
        let properties = filter_properties("Tasks assigned to me", -10);
        let names: Vec<_> = properties.variables.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["amount", "invoiceNumber", "creditor", "approver"]);
        assert_eq!(properties.variables[0].label, "Invoice Amount");
    }

    #[test]
    fn test_demo_authorizations_are_valid() {
        let authorizations = demo_authorizations();
        // 3 groups x (tasklist + invoice) + 6 user visibility + mary's task grant
        assert_eq!(authorizations.len(), 13);
        assert!(authorizations.iter().all(|a| a.validate().is_ok()));
    }
}

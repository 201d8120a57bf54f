//! Adapter tests against a real PostgreSQL server.
//!
//! Run with `DATABASE_URL` pointing at a server where the user may create
//! databases: `cargo test -p customer-service --test postgres_tests -- --ignored`.

mod common;

use auth::Role;
use chrono::Utc;
use common::TestDb;
use customer_service::access::AccessScope;
use customer_service::customer::models::BusinessAddress;
use customer_service::customer::models::CompanyName;
use customer_service::customer::models::CreateCustomerCommand;
use customer_service::customer::models::CustomerFilters;
use customer_service::customer::models::CustomerPatch;
use customer_service::customer::models::CustomerStatus;
use customer_service::customer::models::Latitude;
use customer_service::customer::models::NewCustomer;
use customer_service::customer::ports::CustomerRepository;
use customer_service::identity::errors::IdentityError;
use customer_service::identity::models::EmailAddress;
use customer_service::identity::models::Identity;
use customer_service::identity::models::NewIdentity;
use customer_service::identity::models::Username;
use customer_service::identity::ports::IdentityRepository;
use customer_service::repositories::PostgresCustomerRepository;
use customer_service::repositories::PostgresIdentityRepository;

fn new_identity(username: &str) -> NewIdentity {
    NewIdentity {
        username: Username::new(username.to_string()).unwrap(),
        email: EmailAddress::new(format!("{}@example.com", username)).unwrap(),
        full_name: None,
        role: Role::SalesExecutive,
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
    }
}

fn new_customer(owner: &Identity, company_name: &str, area: Option<&str>) -> NewCustomer {
    NewCustomer {
        owner_id: owner.id,
        fields: CreateCustomerCommand {
            first_name: None,
            last_name: None,
            email: None,
            country_code: None,
            contact_number: None,
            designation: None,
            company_name: CompanyName::new(company_name.to_string()).unwrap(),
            business_address: BusinessAddress::new("1 Main St".to_string()).unwrap(),
            nature_of_business: None,
            latitude: Some(Latitude::new(1.35).unwrap()),
            longitude: None,
            area: area.map(str::to_string),
            remarks: Some("first visit".to_string()),
            status: CustomerStatus::Active,
            tapped: false,
        },
    }
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_identity_repository_lifecycle() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());

    let alice = repository.create(new_identity("alice")).await.unwrap();
    assert_eq!(alice.role, Role::SalesExecutive);
    assert!(alice.active);

    let duplicate = repository.create(new_identity("alice")).await;
    assert!(matches!(
        duplicate,
        Err(IdentityError::DuplicateUsername(_))
    ));

    let credentials = repository
        .find_credentials(alice.username.as_str())
        .await
        .unwrap()
        .unwrap();
    assert!(credentials.password_hash.starts_with("$argon2id"));

    let now = Utc::now();
    repository.record_login(alice.id, now).await.unwrap();
    let reloaded = repository.find_by_id(alice.id).await.unwrap().unwrap();
    assert!(reloaded.last_login_at.is_some());

    let promoted = repository
        .update_role(alice.id, Role::Administrator)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(promoted.role, Role::Administrator);

    assert!(repository.deactivate(alice.id).await.unwrap());
    assert!(!repository.deactivate(alice.id).await.unwrap());
    assert!(repository.find_by_id(alice.id).await.unwrap().is_none());
    assert!(repository.list_active().await.unwrap().is_empty());

    // The username is free again once its holder is deactivated.
    assert!(repository.create(new_identity("alice")).await.is_ok());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_imported_rows_are_read_as_stored() {
    let db = TestDb::new().await;
    let repository = PostgresIdentityRepository::new(db.pool.clone());

    let alice = repository.create(new_identity("alice")).await.unwrap();
    sqlx::query(
        "INSERT INTO users (username, email, password_hash, full_name, created_at) \
         VALUES ('john.doe', 'John.Doe@Example.com', 'x', ' John ', NOW() - INTERVAL '1 day')",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let credentials = repository
        .find_credentials("john.doe")
        .await
        .unwrap()
        .unwrap();
    let imported = credentials.identity;
    assert_eq!(imported.username.as_str(), "john.doe");
    assert_eq!(imported.email.as_str(), "John.Doe@Example.com");
    assert_eq!(imported.full_name.unwrap().as_str(), " John ");
    assert!(repository.find_by_id(imported.id).await.unwrap().is_some());

    // Newest first.
    let active = repository.list_active().await.unwrap();
    let ids: Vec<_> = active.iter().map(|identity| identity.id).collect();
    assert_eq!(ids, vec![alice.id, imported.id]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_legacy_roles_are_rejected_by_constraint() {
    let db = TestDb::new().await;

    let result = sqlx::query(
        "INSERT INTO users (username, email, password_hash, role) VALUES ('bob', 'bob@example.com', 'x', 'agent')",
    )
    .execute(&db.pool)
    .await;

    assert!(result.is_err());
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_customer_repository_scoping_and_filters() {
    let db = TestDb::new().await;
    let identities = PostgresIdentityRepository::new(db.pool.clone());
    let customers = PostgresCustomerRepository::new(db.pool.clone());

    let alice = identities.create(new_identity("alice")).await.unwrap();
    let bob = identities.create(new_identity("bob")).await.unwrap();

    customers
        .create(new_customer(&alice, "Acme 100%", Some("North")))
        .await
        .unwrap();
    customers
        .create(new_customer(&alice, "Globex", Some("East")))
        .await
        .unwrap();
    customers
        .create(new_customer(&bob, "Initech", Some("South")))
        .await
        .unwrap();

    let mine = customers
        .find_all(&AccessScope::OwnedBy(alice.id), &CustomerFilters::default())
        .await
        .unwrap();
    assert_eq!(mine.len(), 2);
    assert!(mine.iter().all(|c| c.owner_id == alice.id));
    assert_eq!(mine[0].company_name, "Globex");

    let everything = customers
        .find_all(&AccessScope::Unrestricted, &CustomerFilters::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);

    let searched = customers
        .find_all(
            &AccessScope::Unrestricted,
            &CustomerFilters {
                search: Some("100%".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].company_name, "Acme 100%");

    let areas = customers
        .list_areas(&AccessScope::OwnedBy(alice.id))
        .await
        .unwrap();
    assert_eq!(areas, vec!["East".to_string(), "North".to_string()]);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn test_customer_repository_update_and_delete() {
    let db = TestDb::new().await;
    let identities = PostgresIdentityRepository::new(db.pool.clone());
    let customers = PostgresCustomerRepository::new(db.pool.clone());

    let alice = identities.create(new_identity("alice")).await.unwrap();
    let created = customers
        .create(new_customer(&alice, "Acme", Some("North")))
        .await
        .unwrap();

    let patch = CustomerPatch {
        company_name: Some(CompanyName::new("Acme Holdings".to_string()).unwrap()),
        remarks: Some(None),
        latitude: Some(None),
        tapped: Some(true),
        ..CustomerPatch::default()
    };
    let updated = customers
        .update(created.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.company_name, "Acme Holdings");
    assert_eq!(updated.remarks, None);
    assert_eq!(updated.latitude, None);
    assert!(updated.tapped);
    assert_eq!(updated.area.as_deref(), Some("North"));
    assert_eq!(updated.owner_id, alice.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    assert!(customers.delete(created.id).await.unwrap());
    assert!(!customers.delete(created.id).await.unwrap());
    assert!(customers.find_by_id(created.id).await.unwrap().is_none());
    assert!(customers.update(created.id, &patch).await.unwrap().is_none());
}

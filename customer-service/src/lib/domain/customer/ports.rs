use async_trait::async_trait;

use crate::domain::access::AccessScope;
use crate::domain::access::Principal;
use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::CreateCustomerCommand;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerFilters;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerPatch;
use crate::domain::customer::models::NewCustomer;

/// Port for customer record operations.
///
/// Every operation takes the request principal and runs it through the
/// access filter before touching the store.
#[async_trait]
pub trait CustomerServicePort: Send + Sync + 'static {
    /// Create a customer owned by the principal.
    ///
    /// Any owner the client tried to submit has already been dropped at the
    /// boundary; the owner is always `principal.id`.
    async fn create_customer(
        &self,
        principal: &Principal,
        command: CreateCustomerCommand,
    ) -> Result<Customer, CustomerError>;

    /// Customers visible to the principal, newest first.
    async fn list_customers(
        &self,
        principal: &Principal,
        filters: CustomerFilters,
    ) -> Result<Vec<Customer>, CustomerError>;

    /// Distinct non-empty areas among the customers visible to the principal.
    async fn list_areas(&self, principal: &Principal) -> Result<Vec<String>, CustomerError>;

    /// # Errors
    /// * `NotFound` - No such customer
    /// * `Forbidden` - Customer is owned by someone else
    async fn get_customer(
        &self,
        principal: &Principal,
        id: CustomerId,
    ) -> Result<Customer, CustomerError>;

    /// Apply a partial update. An empty patch returns the current record.
    ///
    /// # Errors
    /// * `NotFound` - No such customer
    /// * `Forbidden` - Customer is owned by someone else
    async fn update_customer(
        &self,
        principal: &Principal,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, CustomerError>;

    /// # Errors
    /// * `NotFound` - No such customer
    /// * `Forbidden` - Customer is owned by someone else
    async fn delete_customer(&self, principal: &Principal, id: CustomerId)
        -> Result<(), CustomerError>;
}

/// Customer store.
#[async_trait]
pub trait CustomerRepository: Send + Sync + 'static {
    async fn create(&self, customer: NewCustomer) -> Result<Customer, CustomerError>;

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<Customer>, CustomerError>;

    /// All customers within `scope` matching `filters`, ordered by creation
    /// time descending.
    async fn find_all(
        &self,
        scope: &AccessScope,
        filters: &CustomerFilters,
    ) -> Result<Vec<Customer>, CustomerError>;

    /// Sorted distinct non-empty areas within `scope`.
    async fn list_areas(&self, scope: &AccessScope) -> Result<Vec<String>, CustomerError>;

    /// Returns `None` when the row vanished between lookup and update.
    async fn update(
        &self,
        id: CustomerId,
        patch: &CustomerPatch,
    ) -> Result<Option<Customer>, CustomerError>;

    /// Returns whether a row was deleted.
    async fn delete(&self, id: CustomerId) -> Result<bool, CustomerError>;
}

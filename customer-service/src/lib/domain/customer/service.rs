use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::access;
use crate::domain::access::AccessDecision;
use crate::domain::access::AccessError;
use crate::domain::access::AccessScope;
use crate::domain::access::Operation;
use crate::domain::access::Principal;
use crate::domain::customer::errors::CustomerError;
use crate::domain::customer::models::CreateCustomerCommand;
use crate::domain::customer::models::Customer;
use crate::domain::customer::models::CustomerFilters;
use crate::domain::customer::models::CustomerId;
use crate::domain::customer::models::CustomerPatch;
use crate::domain::customer::models::NewCustomer;
use crate::domain::customer::ports::CustomerRepository;
use crate::domain::customer::ports::CustomerServicePort;
use crate::domain::identity::models::IdentityId;

/// Domain service for customer records.
///
/// Runs every request through the access filter first, then hands the
/// repository either the decided owner, the scope, or an already-checked id.
pub struct CustomerService<CR>
where
    CR: CustomerRepository,
{
    repository: Arc<CR>,
}

impl<CR> CustomerService<CR>
where
    CR: CustomerRepository,
{
    /// Create a new customer service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Customer persistence implementation
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }

    fn owner_for_create(principal: &Principal) -> Result<IdentityId, CustomerError> {
        match access::decide::<Customer>(principal, Operation::Create, None) {
            Ok(AccessDecision::AssignOwner(owner_id)) => Ok(owner_id),
            other => Err(unexpected_decision(Operation::Create, other)),
        }
    }

    fn read_scope(principal: &Principal) -> Result<AccessScope, CustomerError> {
        match access::decide::<Customer>(principal, Operation::ReadMany, None) {
            Ok(AccessDecision::Scoped(scope)) => Ok(scope),
            other => Err(unexpected_decision(Operation::ReadMany, other)),
        }
    }

    /// Look up `id` and check that `principal` may perform `operation` on it.
    async fn load_authorized(
        &self,
        principal: &Principal,
        operation: Operation,
        id: CustomerId,
    ) -> Result<Customer, CustomerError> {
        let target = self.repository.find_by_id(id).await?;

        match access::authorize(principal, operation, target.as_ref()) {
            Ok(_) => target.ok_or(CustomerError::NotFound(id)),
            Err(e) => {
                if e == AccessError::Forbidden {
                    tracing::warn!(
                        subject_id = %principal.id,
                        customer_id = %id,
                        operation = %operation,
                        "Customer access forbidden"
                    );
                }
                Err(CustomerError::from_access(e, id))
            }
        }
    }
}

fn unexpected_decision(
    operation: Operation,
    decision: Result<AccessDecision, AccessError>,
) -> CustomerError {
    CustomerError::Unknown(format!(
        "Unexpected access decision for {}: {:?}",
        operation, decision
    ))
}

#[async_trait]
impl<CR> CustomerServicePort for CustomerService<CR>
where
    CR: CustomerRepository,
{
    async fn create_customer(
        &self,
        principal: &Principal,
        command: CreateCustomerCommand,
    ) -> Result<Customer, CustomerError> {
        let customer = self
            .repository
            .create(NewCustomer {
                owner_id: Self::owner_for_create(principal)?,
                fields: command,
            })
            .await?;

        tracing::info!(
            customer_id = %customer.id,
            owner_id = %customer.owner_id,
            "Customer created"
        );

        Ok(customer)
    }

    async fn list_customers(
        &self,
        principal: &Principal,
        filters: CustomerFilters,
    ) -> Result<Vec<Customer>, CustomerError> {
        let scope = Self::read_scope(principal)?;
        self.repository.find_all(&scope, &filters).await
    }

    async fn list_areas(&self, principal: &Principal) -> Result<Vec<String>, CustomerError> {
        let scope = Self::read_scope(principal)?;
        self.repository.list_areas(&scope).await
    }

    async fn get_customer(
        &self,
        principal: &Principal,
        id: CustomerId,
    ) -> Result<Customer, CustomerError> {
        self.load_authorized(principal, Operation::ReadOne, id)
            .await
    }

    async fn update_customer(
        &self,
        principal: &Principal,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, CustomerError> {
        let current = self
            .load_authorized(principal, Operation::Update, id)
            .await?;

        if patch.is_empty() {
            return Ok(current);
        }

        let customer = self
            .repository
            .update(id, &patch)
            .await?
            .ok_or(CustomerError::NotFound(id))?;

        tracing::info!(
            customer_id = %id,
            updated_by = %principal.id,
            "Customer updated"
        );

        Ok(customer)
    }

    async fn delete_customer(
        &self,
        principal: &Principal,
        id: CustomerId,
    ) -> Result<(), CustomerError> {
        self.load_authorized(principal, Operation::Delete, id)
            .await?;

        if !self.repository.delete(id).await? {
            return Err(CustomerError::NotFound(id));
        }

        tracing::info!(
            customer_id = %id,
            deleted_by = %principal.id,
            "Customer deleted"
        );

        Ok(())
    }
}

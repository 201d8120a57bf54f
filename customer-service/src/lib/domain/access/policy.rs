use crate::domain::access::models::AccessDecision;
use crate::domain::access::models::AccessError;
use crate::domain::access::models::AccessScope;
use crate::domain::access::models::Operation;
use crate::domain::access::models::Owned;
use crate::domain::access::models::Principal;

/// Decide whether `principal` may perform `operation`.
///
/// * `Create` is always allowed and yields the owner to stamp on the record,
///   whatever the client submitted.
/// * `ReadMany` yields the scope: unrestricted for Administrators, otherwise
///   restricted to the principal's own records.
/// * `ReadOne`, `Update` and `Delete` need the looked-up target: `NotFound`
///   when it is absent, `Forbidden` unless the principal is an Administrator
///   or owns it.
pub fn decide<T: Owned>(
    principal: &Principal,
    operation: Operation,
    target: Option<&T>,
) -> Result<AccessDecision, AccessError> {
    match operation {
        Operation::Create => Ok(AccessDecision::AssignOwner(principal.id)),
        Operation::ReadMany => Ok(AccessDecision::Scoped(scope_for(principal))),
        Operation::ReadOne | Operation::Update | Operation::Delete => {
            let target = target.ok_or(AccessError::NotFound)?;
            if principal.is_administrator() || target.owner_id() == principal.id {
                Ok(AccessDecision::Granted)
            } else {
                Err(AccessError::Forbidden)
            }
        }
    }
}

fn scope_for(principal: &Principal) -> AccessScope {
    if principal.is_administrator() {
        AccessScope::Unrestricted
    } else {
        AccessScope::OwnedBy(principal.id)
    }
}

/// Check a single-record operation and hand the target back on success.
pub fn authorize<'a, T: Owned>(
    principal: &Principal,
    operation: Operation,
    target: Option<&'a T>,
) -> Result<&'a T, AccessError> {
    decide(principal, operation, target)?;
    target.ok_or(AccessError::NotFound)
}

pub fn require_administrator(principal: &Principal) -> Result<(), AccessError> {
    if principal.is_administrator() {
        Ok(())
    } else {
        Err(AccessError::Forbidden)
    }
}

pub mod customer;
pub mod identity;

pub use customer::PostgresCustomerRepository;
pub use identity::PostgresIdentityRepository;

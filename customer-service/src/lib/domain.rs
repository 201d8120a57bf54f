pub mod access;
pub mod customer;
pub mod identity;

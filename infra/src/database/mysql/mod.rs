//! MySQL repository implementations.

mod account_repository_impl;
mod pending_repository_impl;
mod row;

pub use account_repository_impl::MySqlAccountRepository;
pub use pending_repository_impl::MySqlPendingRegistrationRepository;

//! Repository interfaces for domain persistence.
//!
//! Traits here are the seam between the domain and the database. The
//! `with_locked*` methods run a closure while the target row is held
//! under an exclusive lock (`SELECT ... FOR UPDATE` in the MySQL
//! implementations, an in-process lock in the mocks), which is the only
//! synchronization the verification subsystem requires.

pub mod account;
pub mod pending;

pub use account::{AccountRepository, MockAccountRepository};
pub use pending::{MockPendingRegistrationRepository, PendingRegistrationRepository};

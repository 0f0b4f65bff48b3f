//! User repository trait defining the interface for user data persistence.
//!
//! The core treats user rows as read/write through this trait only. The
//! relational store's unique constraint on email is the correctness backstop
//! for concurrent signups, so implementations must report a duplicate email
//! as [`DomainError::Conflict`] rather than a generic failure.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use ba_core::repositories::UserRepository;
/// use ba_core::domain::entities::user::User;
/// use ba_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn delete(&self, id: Uuid) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Store unavailable or query failed
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Insert a new user
    ///
    /// # Errors
    /// * `DomainError::Conflict` - A user with the same email already exists
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Persist changes to an existing user
    ///
    /// # Errors
    /// * `DomainError::NotFound` - No user with that id exists
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Delete a user by id
    ///
    /// # Returns
    /// * `Ok(true)` - The user was deleted
    /// * `Ok(false)` - No user with that id existed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

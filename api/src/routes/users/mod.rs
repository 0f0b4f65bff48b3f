//! Routes for the authenticated user

pub mod me;

//! Registration and session route handlers
//!
//! This module contains the public authentication endpoints:
//! - Sign-up and email verification
//! - Verification mail resend
//! - Login and token refresh

pub mod login;
pub mod refresh;
pub mod resend;
pub mod signup;
pub mod verify;

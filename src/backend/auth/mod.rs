//! Authentication Module
//!
//! The relay does not keep users or sign tokens. Authentication is delegated
//! to the analytics platform: the browser posts a sign-in secret, the relay
//! forwards it, and the platform's session token plus site id come back as
//! the `Credential` the browser sends on every later request.
//!
//! # Authentication Flow
//!
//! 1. **Sign in**: secret → `POST /api/auth/signin` → platform sign-in → `{ token, siteId }`
//! 2. **Use**: token + site id → `RequireCredential` extractor → remote calls

/// Sign-in passthrough handler
pub mod signin;

pub use signin::sign_in;

//! Collection of security primitives shared by the auth flow.
//!
//! Password hashing and bearer token issuance live here so services and
//! middleware can reach them without depending on each other.

pub mod jwt;
pub mod password;

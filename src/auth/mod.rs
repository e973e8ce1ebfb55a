// Authentication module
// Verifies provider-issued bearer tokens and checks granted permissions

pub mod errors;
pub mod jwks;
pub mod jwt;
pub mod permissions;

pub use errors::AuthError;
pub use jwks::{KeyStore, RemoteJwks, StaticKeyStore};
pub use jwt::{bearer_token, Claims, TokenValidator};

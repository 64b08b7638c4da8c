//! Authentication core: credential hashing, bearer-token codec, and the
//! authentication service that ties them to the account store.

pub mod crypto;
pub mod service;
pub mod token;

pub use crypto::{CredentialHashError, CredentialHasher};
pub use service::AuthService;
pub use token::{Claims, TokenCodec, TokenSettings};

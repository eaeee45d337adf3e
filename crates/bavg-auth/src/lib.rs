//! Credentials and request signing for the BitcoinAverage API
//!
//! Every REST request, including the one that issues websocket tickets, is
//! authorized by an `X-signature` header of the form
//! `{timestamp}.{public_key}.{hex(hmac_sha256(secret, "{timestamp}.{public_key}"))}`.
//!
//! # Example
//!
//! ```no_run
//! use bavg_auth::Credentials;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//! let token = creds.sign_now();
//! println!("X-signature: {}", token);
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod token;

pub use credentials::{Credentials, PUBLIC_KEY_VAR, SECRET_KEY_VAR};
pub use error::{AuthError, AuthResult};
pub use token::{sign, SignedToken};

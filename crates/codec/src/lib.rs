//! Envelope codec and crypto primitives (component C1).
//!
//! Everything here is deterministic and IO-free: encoding/decoding the
//! request/response envelope, deriving the bootstrap seed, minting opaque
//! codes, and projecting base64 into the URL-safe alphabet used in path
//! segments. Callers (the auth gate, the API layer) own the clock, the
//! randomness source is the only impurity and it is isolated to `mint`.

mod envelope;
mod error;
mod mint;
mod seed;
mod urlsafe;

pub use envelope::{decode, encode, Envelope, TicksField};
pub use error::CodecError;
pub use mint::{mint_code, random_session_private, session_id_for, Code};
pub use seed::{derive_request_hash, derive_seed, verify_seed};
pub use urlsafe::{from_url_safe, to_url_safe};

//! Request-side concerns: path sanitization and conditional evaluation.
//!
//! These are the first components a raw tile request passes through before
//! any filesystem or cache access happens:
//!
//! ```text
//! raw path fragment ──► path::decode ──► DescriptorResolver
//!                                             │
//!                                             ▼
//!                          conditional::evaluate ──► Not-Modified | transforms
//! ```

pub mod conditional;
pub mod path;

pub use conditional::{evaluate, ConditionalOutcome, ViewState};
pub use path::{decode, DecodedPath};

//! Image descriptor resolution and caching.
//!
//! This module turns a sanitized request path into a resolved
//! [`ImageDescriptor`], going through a bounded shared cache:
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            DescriptorResolver            │
//! │  (lookup-or-probe, codec dispatch, open) │
//! └──────────┬──────────────────┬────────────┘
//!            │                  │
//!            ▼                  ▼
//! ┌────────────────────┐  ┌───────────────────────┐
//! │  DescriptorCache   │  │  filesystem probing /  │
//! │ (insertion-ordered │  │  sequence discovery    │
//! │  bounded map)      │  └───────────────────────┘
//! └────────────────────┘
//! ```
//!
//! Descriptors are immutable once cached; a later request for the same
//! canonical path reuses the cached metadata without touching the
//! filesystem.

mod cache;
mod descriptor;
mod resolver;
mod sequence;

pub use cache::{DescriptorCache, DEFAULT_DESCRIPTOR_CACHE_CAPACITY};
pub use descriptor::{CodecKind, ColourSpace, ImageDescriptor, SourceKind};
pub use resolver::{probe_source, CodecHandle, DescriptorResolver, Resolved, TileCodec};
pub use sequence::{discover, SequenceDiscovery};

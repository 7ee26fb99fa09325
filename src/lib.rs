//! # gigatile
//!
//! Tile-resolution and pixel-transform core for large-image tile servers.
//!
//! Given a client-supplied image identifier this library sanitizes the
//! untrusted path, resolves it to a source image (single file or multi-angle
//! sequence) through a bounded shared descriptor cache, evaluates
//! conditional requests, and runs decoded tiles through a pipeline of
//! numerically exact pixel transforms.
//!
//! Format-specific decoders, the transport layer and process startup are
//! external collaborators; the codec seam is the [`image::TileCodec`] trait.
//!
//! ## Architecture
//!
//! ```text
//! request path ──► request::path::decode
//!                        │
//!                        ▼
//!              image::DescriptorResolver ◄──► image::DescriptorCache
//!                        │                        (shared, bounded)
//!                        ▼
//!              codec open (external)
//!                        │
//!                        ▼
//!              request::conditional::evaluate ──► Not-Modified
//!                        │
//!                        ▼
//!              tile::transform pipeline ──► response layer
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use gigatile::{decode, DescriptorCache, DescriptorResolver};
//! # use gigatile::{CodecHandle, CodecKind, ImageDescriptor, CodecError, TileCodec};
//! # struct MyCodec;
//! # #[async_trait::async_trait]
//! # impl TileCodec for MyCodec {
//! #     async fn open(&self, _: CodecKind, _: &ImageDescriptor) -> Result<CodecHandle, CodecError> {
//! #         unimplemented!()
//! #     }
//! # }
//!
//! #[tokio::main]
//! async fn main() {
//!     let cache = Arc::new(DescriptorCache::new());
//!     let resolver = DescriptorResolver::new(MyCodec, cache, "/data/images/", "_pyr_");
//!
//!     let sanitized = decode("collection%2Fslide.tif");
//!     let resolved = resolver.resolve(&sanitized.path).await.unwrap();
//!     println!("{} x {}", resolved.handle.width(), resolved.handle.height());
//! }
//! ```

pub mod config;
pub mod error;
pub mod image;
pub mod request;
pub mod tile;

// Re-export commonly used types
pub use config::{Config, DEFAULT_FILENAME_PATTERN, DEFAULT_FILESYSTEM_PREFIX};
pub use error::{CodecError, ResolveError, StatusReport, UNAVAILABLE_STATUS};
pub use image::{
    discover, probe_source, CodecHandle, CodecKind, ColourSpace, DescriptorCache,
    DescriptorResolver, ImageDescriptor, Resolved, SequenceDiscovery, SourceKind, TileCodec,
    DEFAULT_DESCRIPTOR_CACHE_CAPACITY,
};
pub use request::{decode, evaluate, ConditionalOutcome, DecodedPath, ViewState};
pub use tile::{
    adjust_contrast, adjust_gamma, apply_colormap, convert_lab_to_srgb, crop, hillshade, invert,
    normalize, resample, rotate, to_greyscale, ColormapKind, PixelBuffer, RawTile, ResampleMethod,
    SampleFormat,
};

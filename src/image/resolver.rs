//! Descriptor resolution: cache lookup, filesystem probing, codec dispatch.
//!
//! The resolver is the entry point for turning a sanitized request path into
//! a ready-to-tile descriptor plus an opened codec handle. It is generic
//! over the codec collaborator so the core stays independent of any
//! container format.
//!
//! Concurrency: the only shared state is the [`DescriptorCache`]. Lookups
//! run under its read path, filesystem probing and codec opens run outside
//! any lock (two concurrent misses on the same path may both probe), and
//! only the terminal insert takes the write path. The capacity bound holds
//! after every completed insert.

use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use crate::error::{CodecError, ResolveError};

use super::cache::DescriptorCache;
use super::descriptor::{CodecKind, ColourSpace, ImageDescriptor, SourceKind};
use super::sequence;
use crate::tile::SampleFormat;

// =============================================================================
// Codec collaborator
// =============================================================================

/// Metadata yielded by a successful codec open.
///
/// Width/height lists are per resolution level, full resolution first.
#[derive(Debug, Clone)]
pub struct CodecHandle {
    pub widths: Vec<u32>,
    pub heights: Vec<u32>,
    pub tile_width: u32,
    pub tile_height: u32,
    pub channels: u32,
    pub bits_per_channel: u32,
    pub sample_format: SampleFormat,
    pub quality_layers: u32,
    pub colour_space: ColourSpace,
    pub channel_min: Vec<f32>,
    pub channel_max: Vec<f32>,
    pub timestamp: SystemTime,
}

impl CodecHandle {
    /// Full-resolution width.
    pub fn width(&self) -> u32 {
        self.widths.first().copied().unwrap_or(0)
    }

    /// Full-resolution height.
    pub fn height(&self) -> u32 {
        self.heights.first().copied().unwrap_or(0)
    }

    /// Number of resolution levels.
    pub fn resolutions(&self) -> u32 {
        self.widths.len() as u32
    }
}

/// Format-specific decoder collaborator.
///
/// Implementations open the source named by a descriptor and report its
/// canonical metadata. Selection happens purely by lowercased extension
/// before `open` is called; the `kind` tells the collaborator which decoder
/// family was dispatched.
#[async_trait]
pub trait TileCodec: Send + Sync {
    /// Open the source behind `descriptor` and return its metadata.
    async fn open(
        &self,
        kind: CodecKind,
        descriptor: &ImageDescriptor,
    ) -> Result<CodecHandle, CodecError>;
}

// =============================================================================
// Filesystem probing
// =============================================================================

/// Probe the filesystem for the source behind `prefix + path`.
///
/// A regular file becomes a single-file descriptor with fixed angle lists
/// `[0]`/`[90]` and its extension taken from the substring after the final
/// `.`. Anything else goes through sequence discovery. Never touches the
/// descriptor cache.
pub async fn probe_source(
    prefix: &str,
    path: &str,
    pattern: &str,
) -> Result<ImageDescriptor, ResolveError> {
    let mut descriptor = ImageDescriptor::new(path, prefix, pattern);
    let full = descriptor.full_path();

    match fs::metadata(&full).await {
        Ok(metadata) if metadata.is_file() => {
            descriptor.kind = SourceKind::SingleFile;
            descriptor.extension = path
                .rfind('.')
                .map(|dot| path[dot + 1..].to_string())
                .unwrap_or_else(|| path.to_string());
            descriptor.timestamp = metadata
                .modified()
                .map_err(|e| ResolveError::Io(e.to_string()))?;
            descriptor.horizontal_angles = vec![0];
            descriptor.vertical_angles = vec![90];
        }
        _ => {
            let seq = sequence::discover(prefix, path, pattern).await?;
            descriptor.kind = SourceKind::Sequence;
            descriptor.extension = seq.extension;
            descriptor.horizontal_angles = seq.horizontal_angles;
            descriptor.vertical_angles = seq.vertical_angles;
            descriptor.timestamp = seq.timestamp;
        }
    }

    Ok(descriptor)
}

// =============================================================================
// Resolver
// =============================================================================

/// A successfully resolved request, ready for tiling.
#[derive(Debug, Clone)]
pub struct Resolved {
    /// The (possibly cached) descriptor.
    pub descriptor: ImageDescriptor,

    /// The opened codec handle for this request.
    pub handle: CodecHandle,

    /// Whether the descriptor came from the cache.
    pub cache_hit: bool,

    /// Timestamp to surface as the response's last-modified value.
    pub last_modified: SystemTime,
}

/// Resolves sanitized paths to descriptors through the shared cache.
pub struct DescriptorResolver<C: TileCodec> {
    /// The codec collaborator.
    codec: C,

    /// Shared descriptor cache, passed in rather than ambient.
    cache: Arc<DescriptorCache>,

    /// Configured filesystem prefix.
    prefix: String,

    /// Configured sequence filename pattern.
    pattern: String,
}

impl<C: TileCodec> DescriptorResolver<C> {
    pub fn new(
        codec: C,
        cache: Arc<DescriptorCache>,
        prefix: impl Into<String>,
        pattern: impl Into<String>,
    ) -> Self {
        Self {
            codec,
            cache,
            prefix: prefix.into(),
            pattern: pattern.into(),
        }
    }

    /// The shared cache backing this resolver.
    pub fn cache(&self) -> &Arc<DescriptorCache> {
        &self.cache
    }

    /// The codec collaborator backing this resolver.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Resolve a sanitized path to a descriptor and opened codec handle.
    ///
    /// Cache hits reuse the stored metadata verbatim without touching the
    /// filesystem; misses probe, dispatch and open, then insert on success.
    /// Any failure propagates without touching the cache.
    pub async fn resolve(&self, path: &str) -> Result<Resolved, ResolveError> {
        // An empty cache cannot hit; skip the lookup entirely
        let cached = if self.cache.is_empty().await {
            debug!("image cache initialisation");
            None
        } else {
            self.cache.lookup(path).await
        };

        let (mut descriptor, cache_hit) = match cached {
            Some(descriptor) => {
                debug!(
                    "image cache hit, {} cached descriptors",
                    self.cache.len().await
                );
                (descriptor, true)
            }
            None => {
                debug!("image cache miss");
                let descriptor = probe_source(&self.prefix, path, &self.pattern).await?;
                (descriptor, false)
            }
        };

        let kind = CodecKind::from_extension(&descriptor.extension)?;

        let handle = self
            .codec
            .open(kind, &descriptor)
            .await
            .map_err(|e| ResolveError::DecoderOpen {
                path: descriptor.full_path(),
                message: e.to_string(),
            })?;

        merge_handle(&mut descriptor, &handle);

        // Cached descriptors are immutable; re-inserting a hit would also
        // perturb the strict insertion order, so only misses insert.
        if !cache_hit {
            self.cache.insert(descriptor.clone()).await;
        }

        Ok(Resolved {
            last_modified: descriptor.timestamp,
            cache_hit,
            handle,
            descriptor,
        })
    }
}

/// Merge the metadata of a successful open into the descriptor.
fn merge_handle(descriptor: &mut ImageDescriptor, handle: &CodecHandle) {
    descriptor.widths = handle.widths.clone();
    descriptor.heights = handle.heights.clone();
    descriptor.resolutions = handle.resolutions();
    descriptor.tile_width = handle.tile_width;
    descriptor.tile_height = handle.tile_height;
    descriptor.channels = handle.channels;
    descriptor.bits_per_channel = handle.bits_per_channel;
    descriptor.sample_format = handle.sample_format;
    descriptor.quality_layers = handle.quality_layers;
    descriptor.colour_space = handle.colour_space;
    descriptor.channel_min = handle.channel_min.clone();
    descriptor.channel_max = handle.channel_max.clone();
    descriptor.timestamp = handle.timestamp;
}

// =============================================================================
// Tests
// =============================================================================

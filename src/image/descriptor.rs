//! Resolved image metadata.

use std::time::SystemTime;

use crate::error::ResolveError;
use crate::tile::SampleFormat;

// =============================================================================
// Supporting enums
// =============================================================================

/// Whether a descriptor denotes a single file or an angle-indexed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// One regular file on disk.
    SingleFile,

    /// A multi-angle set of files sharing a path stem.
    Sequence,
}

/// Colour space of the source samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColourSpace {
    Greyscale,
    Srgb,
    CieLab,
}

/// Codec family selected for a source, purely by lowercased extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecKind {
    /// Baseline tiled decoder: tif, tiff, ptif, dat.
    BaselineTiff,

    /// JPEG2000 decoder: jpx, jp2, j2k.
    #[cfg(feature = "jpeg2000")]
    Jpeg2000,
}

impl CodecKind {
    /// Map a detected extension to a codec family.
    ///
    /// The extension is lower-cased before matching. Unknown extensions fail
    /// as [`ResolveError::UnsupportedType`].
    pub fn from_extension(extension: &str) -> Result<CodecKind, ResolveError> {
        match extension.to_ascii_lowercase().as_str() {
            "tif" | "tiff" | "ptif" | "dat" => Ok(CodecKind::BaselineTiff),
            #[cfg(feature = "jpeg2000")]
            "jpx" | "jp2" | "j2k" => Ok(CodecKind::Jpeg2000),
            _ => Err(ResolveError::UnsupportedType {
                extension: extension.to_string(),
            }),
        }
    }
}

// =============================================================================
// ImageDescriptor
// =============================================================================

/// Resolved, cacheable metadata for a source image or image sequence.
///
/// Built by the resolver on a cache miss after a successful probe and codec
/// open, then inserted into the [`DescriptorCache`](super::DescriptorCache).
/// Never mutated by any consumer after insertion; equality is defined solely
/// by the canonical path.
#[derive(Debug, Clone)]
pub struct ImageDescriptor {
    /// Canonical (sanitized) request path.
    pub path: String,

    /// Filesystem prefix the path is resolved under.
    pub prefix: String,

    /// Sequence filename pattern (e.g. `_pyr_`).
    pub pattern: String,

    /// Detected type extension, as found on disk.
    pub extension: String,

    /// Single file or angle-indexed sequence.
    pub kind: SourceKind,

    /// Widths of each resolution level, full resolution first.
    pub widths: Vec<u32>,

    /// Heights of each resolution level, full resolution first.
    pub heights: Vec<u32>,

    /// Tile width in pixels.
    pub tile_width: u32,

    /// Tile height in pixels.
    pub tile_height: u32,

    /// Number of resolution levels.
    pub resolutions: u32,

    /// Channels per pixel.
    pub channels: u32,

    /// Bits per channel (8, 16 or 32).
    pub bits_per_channel: u32,

    /// Integer or floating-point samples.
    pub sample_format: SampleFormat,

    /// Number of quality layers (JPEG2000 sources).
    pub quality_layers: u32,

    /// Colour space of the source.
    pub colour_space: ColourSpace,

    /// Ascending horizontal view angles; `[0]` for a single file.
    pub horizontal_angles: Vec<u32>,

    /// Ascending vertical view angles; `[90]` for a single file.
    pub vertical_angles: Vec<u32>,

    /// Source modification time, surfaced as the last-modified value.
    pub timestamp: SystemTime,

    /// Per-channel minimum sample values.
    pub channel_min: Vec<f32>,

    /// Per-channel maximum sample values.
    pub channel_max: Vec<f32>,
}

impl ImageDescriptor {
    /// Create an unresolved descriptor for a canonical path.
    ///
    /// Geometry and sample metadata are filled in by the codec open; angle
    /// lists and timestamp by the filesystem probe.
    pub fn new(path: impl Into<String>, prefix: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            prefix: prefix.into(),
            pattern: pattern.into(),
            extension: String::new(),
            kind: SourceKind::SingleFile,
            widths: Vec::new(),
            heights: Vec::new(),
            tile_width: 0,
            tile_height: 0,
            resolutions: 0,
            channels: 0,
            bits_per_channel: 0,
            sample_format: SampleFormat::UnsignedInt,
            quality_layers: 0,
            colour_space: ColourSpace::Srgb,
            horizontal_angles: Vec::new(),
            vertical_angles: Vec::new(),
            timestamp: SystemTime::UNIX_EPOCH,
            channel_min: Vec::new(),
            channel_max: Vec::new(),
        }
    }

    /// Full filesystem path of the probed target (`prefix + path`).
    pub fn full_path(&self) -> String {
        format!("{}{}", self.prefix, self.path)
    }

    /// Concrete on-disk file name for one sequence member.
    ///
    /// Single-file descriptors resolve to their one file; sequence members
    /// embed zero-padded 3-digit angle tokens.
    pub fn source_file_name(&self, seq: u32, ang: u32) -> String {
        match self.kind {
            SourceKind::SingleFile => self.full_path(),
            SourceKind::Sequence => format!(
                "{}{}{:03}_{:03}.{}",
                self.full_path(),
                self.pattern,
                seq,
                ang,
                self.extension
            ),
        }
    }
}

impl PartialEq for ImageDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for ImageDescriptor {}

// =============================================================================
// Tests
// =============================================================================

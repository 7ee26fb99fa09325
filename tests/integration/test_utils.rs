//! Shared test utilities: scratch directories and a mock codec.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use gigatile::{
    CodecError, CodecHandle, CodecKind, ColourSpace, ImageDescriptor, SampleFormat, TileCodec,
};

/// Create a unique scratch directory for one test.
pub fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gigatile-it-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// Create an empty file in a scratch directory.
pub fn touch(dir: &Path, name: &str) {
    File::create(dir.join(name)).unwrap();
}

/// Prefix string for a scratch directory, with trailing separator.
pub fn prefix_of(dir: &Path) -> String {
    format!("{}/", dir.display())
}

/// Codec collaborator that records its open calls and reports fixed
/// metadata.
pub struct MockCodec {
    open_count: AtomicUsize,
}

impl MockCodec {
    pub fn new() -> Self {
        Self {
            open_count: AtomicUsize::new(0),
        }
    }

    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TileCodec for MockCodec {
    async fn open(
        &self,
        _kind: CodecKind,
        descriptor: &ImageDescriptor,
    ) -> Result<CodecHandle, CodecError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);
        Ok(CodecHandle {
            widths: vec![8192, 4096, 2048, 1024],
            heights: vec![6144, 3072, 1536, 768],
            tile_width: 256,
            tile_height: 256,
            channels: 3,
            bits_per_channel: 8,
            sample_format: SampleFormat::UnsignedInt,
            quality_layers: 1,
            colour_space: ColourSpace::Srgb,
            channel_min: vec![0.0; 3],
            channel_max: vec![255.0; 3],
            timestamp: descriptor.timestamp,
        })
    }
}

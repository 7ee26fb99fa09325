//! End-to-end resolution tests: sanitized path in, descriptor + handle out.

use std::sync::Arc;

use gigatile::{
    request, ConditionalOutcome, DescriptorCache, DescriptorResolver, ResolveError, SourceKind,
    ViewState,
};

use super::test_utils::{prefix_of, scratch, touch, MockCodec};

fn resolver_with_capacity(
    prefix: String,
    capacity: usize,
) -> DescriptorResolver<MockCodec> {
    DescriptorResolver::new(
        MockCodec::new(),
        Arc::new(DescriptorCache::with_capacity(capacity)),
        prefix,
        "_pyr_",
    )
}

#[tokio::test]
async fn test_encoded_path_resolves_single_file() {
    let dir = scratch("encoded");
    touch(&dir, "my slide.tif");

    let resolver = resolver_with_capacity(prefix_of(&dir), 10);

    // The raw request arrives plus/percent-encoded
    let decoded = request::path::decode("my+slide.tif");
    let resolved = resolver.resolve(&decoded.path).await.unwrap();

    assert_eq!(resolved.descriptor.kind, SourceKind::SingleFile);
    assert_eq!(resolved.descriptor.path, "my slide.tif");
    assert_eq!(resolved.handle.width(), 8192);
    assert_eq!(resolved.handle.resolutions(), 4);
}

#[tokio::test]
async fn test_traversal_cannot_escape_prefix() {
    let dir = scratch("traversal");
    touch(&dir, "slide.tif");

    let resolver = resolver_with_capacity(prefix_of(&dir), 10);

    // After sanitization the traversal collapses to a plain relative path
    let decoded = request::path::decode("../../slide.tif");
    assert_eq!(decoded.path, "slide.tif");
    assert!(resolver.resolve(&decoded.path).await.is_ok());
}

#[tokio::test]
async fn test_sequence_resolution_and_angles() {
    let dir = scratch("sequence");
    for name in [
        "scan_pyr_000_090.tif",
        "scan_pyr_030_090.tif",
        "scan_pyr_120_090.tif",
        "scan_pyr_000_030.tif",
        "scan_pyr_000_150.tif",
    ] {
        touch(&dir, name);
    }

    let resolver = resolver_with_capacity(prefix_of(&dir), 10);
    let resolved = resolver.resolve("scan").await.unwrap();

    assert_eq!(resolved.descriptor.kind, SourceKind::Sequence);
    assert_eq!(resolved.descriptor.horizontal_angles, vec![0, 30, 120]);
    assert_eq!(resolved.descriptor.vertical_angles, vec![30, 90, 150]);
    assert_eq!(
        resolved.descriptor.source_file_name(30, 90),
        format!("{}scan_pyr_030_090.tif", prefix_of(&dir))
    );
}

#[tokio::test]
async fn test_eviction_under_many_paths() {
    let dir = scratch("eviction");
    for i in 0..4 {
        touch(&dir, &format!("slide-{i}.tif"));
    }

    let resolver = resolver_with_capacity(prefix_of(&dir), 3);
    for i in 0..4 {
        resolver.resolve(&format!("slide-{i}.tif")).await.unwrap();
    }

    let cache = resolver.cache();
    assert_eq!(cache.len().await, 3);
    // Oldest-inserted entry evicted first
    assert!(cache.lookup("slide-0.tif").await.is_none());
    assert!(cache.lookup("slide-1.tif").await.is_some());
    assert!(cache.lookup("slide-3.tif").await.is_some());
}

#[tokio::test]
async fn test_resolved_timestamp_feeds_conditional() {
    let dir = scratch("conditional");
    touch(&dir, "slide.tif");

    let resolver = resolver_with_capacity(prefix_of(&dir), 10);
    let resolved = resolver.resolve("slide.tif").await.unwrap();

    let mut view = ViewState {
        h_angle: 45,
        v_angle: 10,
    };

    // A client that saw this exact timestamp gets a Not-Modified
    let header = httpdate::fmt_http_date(resolved.last_modified);
    let outcome = request::conditional::evaluate(resolved.last_modified, Some(&header), &mut view);
    assert_eq!(outcome, ConditionalOutcome::NotModified);
    assert_eq!(view, ViewState::default());

    // An older client copy proceeds to normal serving
    let stale = httpdate::fmt_http_date(
        resolved.last_modified - std::time::Duration::from_secs(3600),
    );
    let outcome = request::conditional::evaluate(resolved.last_modified, Some(&stale), &mut view);
    assert_eq!(outcome, ConditionalOutcome::Proceed);
}

#[tokio::test]
async fn test_failure_surfaces_unavailable_status() {
    let dir = scratch("failure");

    let resolver = resolver_with_capacity(prefix_of(&dir), 10);
    let err = resolver.resolve("ghost").await.unwrap_err();

    assert!(matches!(err, ResolveError::NotFileNotSequence { .. }));
    let report = err.status();
    assert_eq!(report.code, "1 3");
    assert!(report.diagnostic.contains("ghost"));
    assert!(resolver.cache().is_empty().await);
}

#[tokio::test]
async fn test_concurrent_mixed_paths_respect_capacity() {
    let dir = scratch("concurrent");
    for i in 0..6 {
        touch(&dir, &format!("slide-{i}.tif"));
    }

    let resolver = Arc::new(resolver_with_capacity(prefix_of(&dir), 4));

    let mut handles = Vec::new();
    for task in 0..12 {
        let resolver = resolver.clone();
        handles.push(tokio::spawn(async move {
            resolver.resolve(&format!("slide-{}.tif", task % 6)).await
        }));
    }
    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    // Capacity must hold no matter how the misses interleaved
    assert!(resolver.cache().len().await <= 4);
}

#[tokio::test]
async fn test_cache_hit_reuses_metadata_verbatim() {
    let dir = scratch("verbatim");
    touch(&dir, "slide.tif");

    let resolver = resolver_with_capacity(prefix_of(&dir), 10);
    let first = resolver.resolve("slide.tif").await.unwrap();

    // Replace the file; the cached descriptor must win over the filesystem
    std::fs::remove_file(dir.join("slide.tif")).unwrap();
    touch(&dir, "slide.tif");

    let second = resolver.resolve("slide.tif").await.unwrap();
    assert!(second.cache_hit);
    assert_eq!(second.descriptor.timestamp, first.descriptor.timestamp);
    // The codec still opens per request
    assert_eq!(resolver_open_count(&resolver), 2);
}

fn resolver_open_count(resolver: &DescriptorResolver<MockCodec>) -> usize {
    resolver.codec().open_count()
}

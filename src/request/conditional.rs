//! Conditional-request evaluation.
//!
//! Compares a resolved descriptor's modification timestamp against an
//! optional `If-Modified-Since`-style header and short-circuits unmodified
//! responses before any tile work happens.

use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

/// Default horizontal view angle.
pub const DEFAULT_HORIZONTAL_ANGLE: i32 = 0;

/// Default vertical view angle.
pub const DEFAULT_VERTICAL_ANGLE: i32 = 90;

/// Outcome of evaluating a conditional request.
///
/// `NotModified` is a control signal for the response layer, not an error:
/// it bypasses the transform pipeline entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionalOutcome {
    /// The client's copy is current; skip tile generation.
    NotModified,

    /// Serve normally.
    Proceed,
}

/// Per-request view-angle state used by subsequent shading requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    /// Horizontal azimuth in degrees.
    pub h_angle: i32,

    /// Vertical azimuth in degrees.
    pub v_angle: i32,
}

impl ViewState {
    /// Reset both angles to their defaults (0, 90).
    pub fn reset(&mut self) {
        self.h_angle = DEFAULT_HORIZONTAL_ANGLE;
        self.v_angle = DEFAULT_VERTICAL_ANGLE;
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            h_angle: DEFAULT_HORIZONTAL_ANGLE,
            v_angle: DEFAULT_VERTICAL_ANGLE,
        }
    }
}

/// Evaluate a conditional request against a descriptor timestamp.
///
/// The header, when present, is an RFC1123-style date
/// (`"Weekday, DD Mon YYYY HH:MM:SS GMT"`). A header that fails to parse is
/// logged and treated as "condition not satisfied"; it is never a hard
/// error. The view-angle state is reset to its defaults regardless of the
/// outcome.
pub fn evaluate(
    last_modified: SystemTime,
    if_modified_since: Option<&str>,
    view: &mut ViewState,
) -> ConditionalOutcome {
    view.reset();

    let Some(header) = if_modified_since else {
        return ConditionalOutcome::Proceed;
    };

    // Header dates carry one-second precision; filesystem timestamps may
    // carry nanoseconds. Compare at the header's granularity.
    let last_modified = truncate_to_seconds(last_modified);

    match httpdate::parse_http_date(header) {
        Ok(condition) => {
            if last_modified <= condition {
                debug!("unmodified content");
                ConditionalOutcome::NotModified
            } else {
                debug!("content modified");
                ConditionalOutcome::Proceed
            }
        }
        Err(err) => {
            warn!("error parsing conditional timestamp {:?}: {}", header, err);
            ConditionalOutcome::Proceed
        }
    }
}

fn truncate_to_seconds(time: SystemTime) -> SystemTime {
    match time.duration_since(SystemTime::UNIX_EPOCH) {
        Ok(since_epoch) => SystemTime::UNIX_EPOCH + Duration::from_secs(since_epoch.as_secs()),
        Err(_) => time,
    }
}

// =============================================================================
// Tests
// =============================================================================

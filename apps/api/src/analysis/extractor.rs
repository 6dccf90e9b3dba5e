//! Response extractor — recovers a JSON object from provider output that is
//! nominally JSON but may be wrapped in prose or code fences.
//!
//! A `None` here is not an error condition: it is the defined trigger for
//! the heuristic fallback in the orchestrator.

use serde_json::Value;

/// Scans for the first `{` through the last `}` (greedy span) and attempts a
/// strict JSON parse on that span. Returns `None` if no span exists or the
/// span does not parse.
pub fn extract_json(raw: &str) -> Option<Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&raw[start..=end]).ok()
}

//! Sentinel markers delimiting the generated block.

/// Opening sentinel line. Must match byte-for-byte across inject, detect,
/// and remove.
pub const BEGIN_MARKER: &str = "-- DO NOT MODIFY ::: BEGIN Auto-Generated Mod Update-Checker";

/// Closing sentinel line.
pub const END_MARKER: &str = "-- DO NOT MODIFY ::: END Auto-Generated Mod Update-Checker";

/// Returns true if the opening sentinel appears anywhere in the content.
///
/// Pure substring containment, no parsing. This is the idempotency gate
/// run before any mutation.
pub fn has_block(content: &str) -> bool {
    content.contains(BEGIN_MARKER)
}

//! Skill text canonicalization.
//!
//! Skill declarations are normalized once, at write time, and stored in
//! canonical form. Project `skills_needed` entries and article tags are
//! stored verbatim and compared case-insensitively at read time instead —
//! the two comparison semantics are intentionally distinct (see
//! [`matches_declared`]).

use std::collections::BTreeSet;

/// Canonicalize a raw skill string: trim surrounding whitespace, lowercase.
///
/// Total and idempotent. A result of `""` means the input carried no skill
/// text; callers drop such values silently rather than storing or erroring.
pub fn normalize_skill(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Read-time comparison for project/article entries against a user's
/// declared (already-normalized) skill set.
///
/// Intentionally lowercases without trimming: these entries are never
/// canonically normalized, so `" React "` does not match a declared
/// `"react"` while `"React"` does. Keep in sync with how entries are stored.
pub fn matches_declared(entry: &str, declared: &BTreeSet<String>) -> bool {
    declared.contains(&entry.to_lowercase())
}

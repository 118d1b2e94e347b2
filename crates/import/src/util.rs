/// Case-insensitive substring test. Both sides are lowercased with Unicode
/// rules; no other normalization is applied.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

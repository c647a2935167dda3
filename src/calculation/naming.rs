//! Employee name normalization.
//!
//! Attendance workbooks are uploaded with the template's boilerplate in
//! their file names, e.g. `ACG_식대 정리_Template_2025년 상반기_홍길동.xlsx`.
//! This module derives the display name (`홍길동`) from such a name.

use crate::config::{NamePolicy, NamingConfig};
use crate::models::Period;

/// Separator between the template parts of a file name.
pub const NAME_SEPARATOR: char = '_';

/// Removes the first occurrence of each part, in order.
///
/// # Example
///
/// ```
/// use stipend_engine::calculation::remove_substrings;
///
/// assert_eq!(remove_substrings("a-b-a", &["a", "-"]), "b-a");
/// ```
pub fn remove_substrings(s: &str, parts: &[&str]) -> String {
    parts.iter().fold(s.to_string(), |acc, part| {
        if part.is_empty() {
            acc
        } else {
            acc.replacen(part, "", 1)
        }
    })
}

/// Returns the text before the last `.`, or the whole string if there is none.
///
/// # Example
///
/// ```
/// use stipend_engine::calculation::strip_extension;
///
/// assert_eq!(strip_extension("홍길동.xlsx"), "홍길동");
/// assert_eq!(strip_extension("a.b.xlsx"), "a.b");
/// assert_eq!(strip_extension("홍길동"), "홍길동");
/// ```
pub fn strip_extension(s: &str) -> &str {
    match s.rfind('.') {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Removes `prefix` if `s` starts with it, then `suffix` if it ends with it.
///
/// # Example
///
/// ```
/// use stipend_engine::calculation::trim_affixes;
///
/// assert_eq!(trim_affixes("[홍길동]", "[", "]"), "홍길동");
/// assert_eq!(trim_affixes("홍길동", "[", "]"), "홍길동");
/// ```
pub fn trim_affixes<'a>(s: &'a str, prefix: &str, suffix: &str) -> &'a str {
    let s = s.strip_prefix(prefix).unwrap_or(s);
    s.strip_suffix(suffix).unwrap_or(s)
}

/// Builds the period-specific template prefix: `<base>_<year>년 <half>_`.
///
/// # Example
///
/// ```
/// use stipend_engine::calculation::template_prefix;
/// use stipend_engine::models::Period;
///
/// let period = Period::new(2025, 9).unwrap();
/// assert_eq!(template_prefix("ACG", &period), "ACG_2025년 하반기_");
/// ```
pub fn template_prefix(base: &str, period: &Period) -> String {
    format!(
        "{base}{sep}{year}년 {half}{sep}",
        sep = NAME_SEPARATOR,
        year = period.year,
        half = period.half_label()
    )
}

/// Strips the extension, then the template prefix for `period`, or the
/// legacy prefix when no period is given.
pub fn strip_template_prefix(raw: &str, naming: &NamingConfig, period: Option<&Period>) -> String {
    let stem = strip_extension(raw);
    let prefix = match period {
        Some(period) => template_prefix(&naming.template_base, period),
        None => naming.legacy_prefix.clone(),
    };
    trim_affixes(stem, &prefix, "").to_string()
}

/// Strips the extension, then keeps the text after the last `_`.
///
/// # Example
///
/// ```
/// use stipend_engine::calculation::last_segment;
///
/// assert_eq!(last_segment("any_prefix_홍길동.xlsx"), "홍길동");
/// assert_eq!(last_segment("홍길동.xlsx"), "홍길동");
/// ```
pub fn last_segment(raw: &str) -> String {
    let stem = strip_extension(raw);
    match stem.rfind(NAME_SEPARATOR) {
        Some(idx) => stem[idx + NAME_SEPARATOR.len_utf8()..].to_string(),
        None => stem.to_string(),
    }
}

/// Derives an employee display name from a raw file name using the
/// configured policy.
pub fn normalize_name(raw: &str, naming: &NamingConfig, period: Option<&Period>) -> String {
    let name = match naming.policy {
        NamePolicy::TemplatePrefix => strip_template_prefix(raw, naming, period),
        NamePolicy::LastSegment => last_segment(raw),
    };
    name.trim().to_string()
}

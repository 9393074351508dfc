//! Composite variant names and stepped size names
//!
//! A generated component is named after the slice variants it combines:
//! `"Radius=S, Border width=M"`. Segments are joined by `", "` and each
//! segment splits on its first `=`, so variant names may contain `=` but never
//! `,` or the reserved link delimiter.

use regex::{Captures, Regex};
use thiserror::Error;

use crate::ledger::LINK_DELIMITER;

/// Separator between `slice=variant` segments
pub const SEGMENT_SEPARATOR: &str = ", ";

/// Separator between slice and variant inside a segment
pub const PAIR_SEPARATOR: char = '=';

const BASE_STEPS: [&str; 5] = ["xs", "s", "m", "l", "xl"];

/// Why a variant name cannot be used in composite names
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("variant name is empty")]
    Empty,

    #[error("variant name `{0}` contains `,`")]
    Comma(String),

    #[error("variant name `{0}` contains the reserved delimiter `/#/`")]
    ReservedDelimiter(String),
}

/// Join `(slice, variant)` pairs into a composite name
pub fn compose_name<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(slice, variant)| format!("{slice}{PAIR_SEPARATOR}{variant}"))
        .collect::<Vec<_>>()
        .join(SEGMENT_SEPARATOR)
}

/// Split a composite name back into `(slice, variant)` pairs, in order.
///
/// Segments without `=` are not slice segments and are skipped.
pub fn decompose_name(name: &str) -> Vec<(&str, &str)> {
    name.split(SEGMENT_SEPARATOR)
        .filter_map(|segment| segment.split_once(PAIR_SEPARATOR))
        .collect()
}

/// Map an ordinal to a t-shirt size: `xs, s, m, l, xl, 2xl, 3xl, ...`
pub fn step_name(index: usize) -> String {
    match BASE_STEPS.get(index) {
        Some(step) => (*step).to_string(),
        None => format!("{}xl", index - BASE_STEPS.len() + 2),
    }
}

/// Replace the variant of `slice_name` inside a composite name.
///
/// The slice token matches case-insensitively and only the first matching
/// segment is rewritten. Names without that segment come back unchanged.
pub fn rename_in_composite(name: &str, slice_name: &str, new_variant: &str) -> String {
    let pattern = format!(
        "(?i)(^|{SEGMENT_SEPARATOR}){}{PAIR_SEPARATOR}[^,]*",
        regex::escape(slice_name)
    );
    let regex = match Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(err) => {
            tracing::warn!("rename_in_composite: invalid pattern for {slice_name:?}: {err}");
            return name.to_string();
        }
    };

    regex
        .replace(name, |caps: &Captures<'_>| {
            format!("{}{slice_name}{PAIR_SEPARATOR}{new_variant}", &caps[1])
        })
        .into_owned()
}

/// Check that a variant name survives composition and ledger encoding
pub fn validate_variant_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }
    if name.contains(LINK_DELIMITER) {
        return Err(NameError::ReservedDelimiter(name.to_string()));
    }
    if name.contains(',') {
        return Err(NameError::Comma(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_names_cover_base_scale() {
        let names: Vec<String> = (0..5).map(step_name).collect();
        assert_eq!(names, vec!["xs", "s", "m", "l", "xl"]);
    }

    #[test]
    fn step_names_grow_past_xl() {
        assert_eq!(step_name(5), "2xl");
        assert_eq!(step_name(6), "3xl");
        assert_eq!(step_name(7), "4xl");
        assert_eq!(step_name(12), "9xl");
    }

    #[test]
    fn compose_then_decompose_keeps_order() {
        let pairs = [("Radius", "S"), ("Border width", "XS"), ("Shadow", "soft")];
        let name = compose_name(pairs);
        assert_eq!(name, "Radius=S, Border width=XS, Shadow=soft");
        assert_eq!(decompose_name(&name), pairs.to_vec());
    }

    #[test]
    fn decompose_splits_on_first_equals() {
        assert_eq!(
            decompose_name("Radius=a=b, Border width=x y"),
            vec![("Radius", "a=b"), ("Border width", "x y")]
        );
    }

    #[test]
    fn rename_rewrites_matching_segment_only() {
        let name = "Radius=S, Border width=M";
        assert_eq!(
            rename_in_composite(name, "Radius", "Small"),
            "Radius=Small, Border width=M"
        );
        assert_eq!(
            rename_in_composite(name, "Border width", "XL"),
            "Radius=S, Border width=XL"
        );
        // input untouched
        assert_eq!(name, "Radius=S, Border width=M");
    }

    #[test]
    fn rename_matches_slice_case_insensitively() {
        assert_eq!(
            rename_in_composite("radius=S, Border width=M", "Radius", "L"),
            "Radius=L, Border width=M"
        );
    }

    #[test]
    fn rename_ignores_segments_that_only_end_with_slice_name() {
        assert_eq!(
            rename_in_composite("Inner Radius=S, Radius=M", "Radius", "L"),
            "Inner Radius=S, Radius=L"
        );
    }

    #[test]
    fn rename_keeps_replacement_literal() {
        assert_eq!(rename_in_composite("Radius=S", "Radius", "$1"), "Radius=$1");
    }

    #[test]
    fn rename_without_segment_is_noop() {
        assert_eq!(rename_in_composite("Shadow=soft", "Radius", "L"), "Shadow=soft");
    }

    #[test]
    fn variant_name_constraints() {
        assert!(validate_variant_name("M").is_ok());
        assert!(validate_variant_name("a=b").is_ok());
        assert_eq!(validate_variant_name("  "), Err(NameError::Empty));
        assert_eq!(
            validate_variant_name("S, M"),
            Err(NameError::Comma("S, M".to_string()))
        );
        assert_eq!(
            validate_variant_name("S/#/M"),
            Err(NameError::ReservedDelimiter("S/#/M".to_string()))
        );
    }
}

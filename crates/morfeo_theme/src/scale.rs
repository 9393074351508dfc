//! Named value scales

use std::cmp::Ordering;

use indexmap::IndexMap;
use morfeo_core::step_name;
use serde::{Serialize, Serializer};

/// Suffix appended to step names of relative (percent) scales
pub const RELATIVE_SUFFIX: &str = "Relative";

/// A scale entry: a number, or the `auto` keyword of line heights
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ScaleValue {
    Auto,
    Value(f32),
}

impl ScaleValue {
    fn sort_order(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Auto, Self::Auto) => Ordering::Equal,
            (Self::Auto, _) => Ordering::Less,
            (_, Self::Auto) => Ordering::Greater,
            (Self::Value(a), Self::Value(b)) => a.total_cmp(b),
        }
    }
}

impl From<f32> for ScaleValue {
    fn from(value: f32) -> Self {
        Self::Value(value)
    }
}

impl Serialize for ScaleValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Auto => serializer.serialize_str("auto"),
            Self::Value(value) => serializer.serialize_f32(*value),
        }
    }
}

/// Step name to value, smallest first
pub type Scale = IndexMap<String, ScaleValue>;

/// Name a set of values by their rank.
///
/// Values are sorted with `auto` first and numbers ascending. `auto` is named
/// `auto`, zero is named `none`, and every other value takes the step name of
/// its position in the sorted list (`xs`, `s`, `m`, ...), with
/// [`RELATIVE_SUFFIX`] appended when `relative` is set.
pub fn assign_names(values: &[ScaleValue], relative: bool) -> Scale {
    let mut sorted = values.to_vec();
    sorted.sort_by(ScaleValue::sort_order);

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, value)| {
            let name = match value {
                ScaleValue::Auto => "auto".to_string(),
                ScaleValue::Value(v) if v == 0.0 => "none".to_string(),
                ScaleValue::Value(_) if relative => format!("{}{RELATIVE_SUFFIX}", step_name(i)),
                ScaleValue::Value(_) => step_name(i),
            };
            (name, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(raw: &[f32]) -> Vec<ScaleValue> {
        raw.iter().copied().map(ScaleValue::from).collect()
    }

    fn names(scale: &Scale) -> Vec<&str> {
        scale.keys().map(String::as_str).collect()
    }

    #[test]
    fn values_are_named_by_rank() {
        let scale = assign_names(&values(&[24.0, 12.0, 16.0]), false);
        assert_eq!(names(&scale), vec!["xs", "s", "m"]);
        assert_eq!(scale["m"], ScaleValue::Value(24.0));
    }

    #[test]
    fn zero_is_none_and_keeps_its_slot() {
        let scale = assign_names(&values(&[2.0, 0.0, 1.0]), false);
        assert_eq!(names(&scale), vec!["none", "s", "m"]);
    }

    #[test]
    fn auto_comes_first_and_relative_names_get_a_suffix() {
        let mut input = values(&[150.0, 120.0]);
        input.push(ScaleValue::Auto);
        let scale = assign_names(&input, true);
        assert_eq!(names(&scale), vec!["auto", "sRelative", "mRelative"]);
    }

    #[test]
    fn long_scales_continue_past_xl() {
        let scale = assign_names(&values(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]), false);
        assert_eq!(names(&scale), vec!["xs", "s", "m", "l", "xl", "2xl", "3xl"]);
    }

    #[test]
    fn serializes_auto_as_keyword() {
        let scale = assign_names(&[ScaleValue::Auto, ScaleValue::Value(1.5)], true);
        assert_eq!(
            serde_json::to_string(&scale).unwrap(),
            r#"{"auto":"auto","sRelative":1.5}"#
        );
    }
}

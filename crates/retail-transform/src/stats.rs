//! Column statistics polars does not offer in the shape the stages need.
//!
//! Both helpers work on plain slices so they can be checked without a
//! frame.

use std::collections::HashMap;

/// Row of the first occurrence of the most frequent present value.
///
/// Ties go to the value seen first. Missing entries are ignored; returns
/// `None` when nothing is present.
pub fn mode_position<'a, I>(values: I) -> Option<usize>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, value) in values.into_iter().enumerate() {
        if let Some(value) = value {
            counts.entry(value).or_insert((0, idx)).0 += 1;
        }
    }
    counts
        .into_values()
        .max_by(|(count_a, first_a), (count_b, first_b)| {
            count_a.cmp(count_b).then(first_b.cmp(first_a))
        })
        .map(|(_, first)| first)
}

/// Linear interpolation by row position.
///
/// Gaps between two known values lie on the line joining them; gaps after
/// the last known value take that value; gaps before the first known value
/// stay empty. Returns cells filled.
pub fn interpolate_linear(values: &mut [Option<f64>]) -> usize {
    let mut filled = 0;
    let mut previous: Option<(usize, f64)> = None;
    let mut idx = 0;
    while idx < values.len() {
        let Some(current) = values[idx] else {
            idx += 1;
            continue;
        };
        if let Some((start, start_value)) = previous
            && idx > start + 1
        {
            let span = (idx - start) as f64;
            for gap in start + 1..idx {
                let fraction = (gap - start) as f64 / span;
                values[gap] = Some(start_value + (current - start_value) * fraction);
                filled += 1;
            }
        }
        previous = Some((idx, current));
        idx += 1;
    }
    if let Some((last, last_value)) = previous {
        for slot in values.iter_mut().skip(last + 1) {
            *slot = Some(last_value);
            filled += 1;
        }
    }
    filled
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_prefers_first_on_tie() {
        assert_eq!(mode_position([Some("b"), Some("a"), Some("a"), Some("b")]), Some(0));
        assert_eq!(mode_position([Some("b"), Some("a"), Some("a")]), Some(1));
        assert_eq!(mode_position(Vec::<Option<&str>>::new()), None);
    }

    #[test]
    fn mode_skips_missing_entries() {
        assert_eq!(mode_position([None, None, Some("x"), None]), Some(2));
        assert_eq!(mode_position([None, Some("a"), Some("b"), Some("b")]), Some(2));
        assert_eq!(mode_position([None::<&str>, None]), None);
    }

    #[test]
    fn interpolation_fills_interior_and_trailing_gaps() {
        let mut values = vec![None, Some(1.0), None, None, Some(4.0), None];
        assert_eq!(interpolate_linear(&mut values), 3);
        assert_eq!(values, vec![None, Some(1.0), Some(2.0), Some(3.0), Some(4.0), Some(4.0)]);
    }

    #[test]
    fn interpolation_leaves_empty_column_alone() {
        let mut values: Vec<Option<f64>> = vec![None, None];
        assert_eq!(interpolate_linear(&mut values), 0);
        assert_eq!(values, vec![None, None]);
    }
}

//! Diff decoding for server arrays.
//!
//! The server sends map and city arrays as diffs against the previous update.
//! A diff alternates runs:
//!
//! ```text
//! <matching count> <mismatching count> <mismatching values...> ...
//! ```
//!
//! Matching runs are copied from the old array, mismatching values are taken
//! from the diff itself.

use crate::error::{BotError, Result};

/// Apply `diff` to `old`, returning the new array.
///
/// # Errors
///
/// Returns [`BotError::MalformedPatch`] when a count is negative, a matching
/// run reaches past the end of `old`, or the diff ends inside a run of
/// mismatching values.
pub fn patch(old: &[i32], diff: &[i32]) -> Result<Vec<i32>> {
    let mut out = Vec::with_capacity(old.len());
    let mut i = 0;

    while i < diff.len() {
        let matching = run_length(diff[i], i)?;
        let start = out.len();
        let kept = start
            .checked_add(matching)
            .and_then(|end| old.get(start..end))
            .ok_or_else(|| {
                BotError::MalformedPatch(format!(
                    "matching run of {matching} at {i} passes the end of {} old values",
                    old.len()
                ))
            })?;
        out.extend_from_slice(kept);
        i += 1;

        if i < diff.len() {
            let mismatching = run_length(diff[i], i)?;
            let fresh = diff.get(i + 1..i + 1 + mismatching).ok_or_else(|| {
                BotError::MalformedPatch(format!(
                    "mismatching run of {mismatching} at {i} is truncated"
                ))
            })?;
            out.extend_from_slice(fresh);
            i += mismatching;
        }
        i += 1;
    }

    Ok(out)
}

fn run_length(value: i32, at: usize) -> Result<usize> {
    usize::try_from(value)
        .map_err(|_| BotError::MalformedPatch(format!("negative run length {value} at {at}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_then_replace() {
        assert_eq!(patch(&[0, 0], &[1, 1, 3]).unwrap(), vec![0, 3]);
    }

    #[test]
    fn test_replace_then_keep() {
        assert_eq!(patch(&[0, 0], &[0, 1, 2, 1]).unwrap(), vec![2, 0]);
    }

    #[test]
    fn test_from_empty() {
        assert_eq!(patch(&[], &[0, 3, 7, 8, 9]).unwrap(), vec![7, 8, 9]);
        assert!(patch(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_shrinks_to_matching_prefix() {
        assert_eq!(patch(&[4, 5, 6], &[2]).unwrap(), vec![4, 5]);
    }

    #[test]
    fn test_truncated_values() {
        assert!(matches!(
            patch(&[0, 0], &[0, 3, 1]),
            Err(BotError::MalformedPatch(_))
        ));
    }

    #[test]
    fn test_matching_past_end() {
        assert!(matches!(patch(&[0], &[2]), Err(BotError::MalformedPatch(_))));
    }

    #[test]
    fn test_negative_count() {
        assert!(matches!(patch(&[0], &[-1]), Err(BotError::MalformedPatch(_))));
    }
}

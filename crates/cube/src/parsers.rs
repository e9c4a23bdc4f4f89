//! Token parsers for the text header of a binary cube file

// nom parser combinators
use nom::bytes::complete::tag;
use nom::character::complete;
use nom::combinator::{all_consuming, map_res};
use nom::IResult;

/// Literal token opening the line that announces the binary voxel data
pub(crate) const BINARY_MARKER: &str = "BINARYVOXEL";

/// Checks if the line is the marker announcing binary voxel data
///
/// Must be at the very start of the line, no leading whitespace allowed.
pub(crate) fn is_binary_marker(i: &str) -> bool {
    marker_tag(i).is_ok()
}

fn marker_tag(i: &str) -> IResult<&str, &str> {
    tag(BINARY_MARKER)(i)
}

/// Parse the element byte width and values per line from the marker line
///
/// These are always the last two whitespace separated tokens on the line,
/// whatever else is in between.
pub(crate) fn marker_dimensions(i: &str) -> Option<(usize, usize)> {
    let (i, _) = marker_tag(i).ok()?;
    let mut tokens = i.split_whitespace().rev();
    let count = tokens.next().and_then(unsigned_token)?;
    let width = tokens.next().and_then(unsigned_token)?;
    Some((width, count))
}

/// Parse the first token of a header line as a signed integer
///
/// Used for the voxel counts along each axis, which may legitimately be
/// negative in the cube format.
pub(crate) fn leading_integer(i: &str) -> Option<i64> {
    i.split_whitespace().next().and_then(signed_token)
}

/// A whole token that is an unsigned integer, nothing else
fn unsigned_token(i: &str) -> Option<usize> {
    let (_, v) = all_consuming(uint)(i).ok()?;
    Some(v)
}

/// A whole token that is a signed integer, nothing else
fn signed_token(i: &str) -> Option<i64> {
    let (_, v) = all_consuming(int)(i).ok()?;
    Some(v)
}

/// Signed 64-bit integer value
fn int(i: &str) -> IResult<&str, i64> {
    complete::i64(i)
}

/// Unsigned size value, allowing an explicit `+`
fn uint(i: &str) -> IResult<&str, usize> {
    let i = i.strip_prefix('+').unwrap_or(i);
    map_res(complete::u64, usize::try_from)(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_detection() {
        assert!(is_binary_marker("BINARYVOXEL 4 6\n"));
        assert!(is_binary_marker("BINARYVOXEL"));
        assert!(!is_binary_marker(" BINARYVOXEL 4 6"));
        assert!(!is_binary_marker("binaryvoxel 4 6"));
        assert!(!is_binary_marker("    48    0.000000    0.000000    0.188973"));
    }

    #[test]
    fn marker_values() {
        assert_eq!(marker_dimensions("BINARYVOXEL 4 6\n"), Some((4, 6)));
        assert_eq!(marker_dimensions("BINARYVOXEL   8   3  "), Some((8, 3)));
        assert_eq!(marker_dimensions("BINARYVOXEL data 16 +12"), Some((16, 12)));
    }

    #[test]
    fn marker_values_invalid() {
        assert_eq!(marker_dimensions("BINARYVOXEL"), None);
        assert_eq!(marker_dimensions("BINARYVOXEL 6"), None);
        assert_eq!(marker_dimensions("BINARYVOXEL 4 six"), None);
        assert_eq!(marker_dimensions("BINARYVOXEL -4 6"), None);
        assert_eq!(marker_dimensions("BINARYVOXEL 4.0 6"), None);
    }

    #[test]
    fn marker_values_fit_usize() {
        let line = format!("BINARYVOXEL {} 6", usize::MAX);
        assert_eq!(marker_dimensions(&line), Some((usize::MAX, 6)));

        let line = format!("BINARYVOXEL {} 6", u128::from(u64::MAX) + 1);
        assert_eq!(marker_dimensions(&line), None);
    }

    #[test]
    fn leading_integers() {
        assert_eq!(
            leading_integer("   48    0.000000    0.000000    0.188973\n"),
            Some(48)
        );
        assert_eq!(leading_integer("-40 0.1 0.0 0.0"), Some(-40));
        assert_eq!(leading_integer("48.0 0.1 0.0 0.0"), None);
        assert_eq!(leading_integer("z 0.1 0.0 0.0"), None);
        assert_eq!(leading_integer("   \n"), None);
    }
}

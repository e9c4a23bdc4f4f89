//! Text representation of voxel values

// cubetools modules
use cubetools_utils::{f, ValueExt};

/// Style of the numbers written to the text cube file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormattingMode {
    /// Scientific notation with 4 decimal places, e.g. `-1.2345E+00`
    #[default]
    Standard,
    /// Exact match of the CP2K text output, e.g. `-0.12345E+01`
    ///
    /// The mantissa always has a leading zero and lines are broken at the end
    /// of every loop over the third axis.
    Legacy,
    /// Scientific notation with every significant digit of the binary data
    MaxPrecision,
}

impl FormattingMode {
    /// Lines follow the CP2K cadence rather than a fixed line length
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy)
    }
}

impl std::fmt::Display for FormattingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match self {
            Self::Standard => "standard",
            Self::Legacy => "legacy",
            Self::MaxPrecision => "max precision",
        };
        write!(f, "{s}")
    }
}

/// Number of significant decimal digits for an element width in bytes
///
/// Single, double, and quad precision give 7, 15, and 34 digits. Anything else
/// is treated as single precision.
///
/// ```rust
/// # use cubetools_cube::significant_digits;
/// assert_eq!(significant_digits(4), 7);
/// assert_eq!(significant_digits(8), 15);
/// assert_eq!(significant_digits(16), 34);
/// ```
pub fn significant_digits(width: usize) -> usize {
    match width {
        8 => 15,
        w if w >= 16 => 34,
        _ => 7,
    }
}

/// Whether [significant_digits] has a real entry for the element width
pub fn is_known_width(width: usize) -> bool {
    matches!(width, 4 | 8) || width >= 16
}

/// Format a single voxel value for the text cube file
///
/// The `significant_digits` are only used by [FormattingMode::MaxPrecision].
///
/// ```rust
/// # use cubetools_cube::{format_value, FormattingMode};
/// assert_eq!(format_value(1.0, FormattingMode::Standard, 7), " 1.0000E+00");
/// assert_eq!(format_value(1.0, FormattingMode::Legacy, 7), " 0.10000E+01");
/// assert_eq!(format_value(1.0, FormattingMode::MaxPrecision, 7), " 1.000000E+00");
/// ```
pub fn format_value(value: f64, mode: FormattingMode, significant_digits: usize) -> String {
    match mode {
        FormattingMode::Standard => value.sci(4, 2),
        FormattingMode::Legacy => legacy(value),
        FormattingMode::MaxPrecision => value.sci(significant_digits.saturating_sub(1), 2),
    }
}

/// Fortran `E13.5` style with a zero before the decimal point
///
/// The value is scaled by 10 so that the usual leading digit becomes the first
/// decimal place while the exponent stays correct for a `0.ddddd` mantissa.
/// Only the last four characters of the exponent are kept, so three digit
/// exponents drop the `E` exactly as Fortran does.
fn legacy(value: f64) -> String {
    let base = (value * 10.0).sci(4, 2);

    // inf and NaN have no mantissa to shift
    if !base.contains('E') {
        return value.sci(4, 2);
    }

    f!(
        "{}0.{}{}{}",
        &base[..1],
        &base[1..2],
        &base[3..7],
        &base[base.len() - 4..]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard() {
        assert_eq!(format_value(-1.2345, FormattingMode::Standard, 7), "-1.2345E+00");
        assert_eq!(format_value(0.001234, FormattingMode::Standard, 7), " 1.2340E-03");
        assert_eq!(format_value(0.0, FormattingMode::Standard, 15), " 0.0000E+00");
    }

    #[test]
    fn legacy_shifts_mantissa() {
        assert_eq!(legacy(1.0), " 0.10000E+01");
        assert_eq!(legacy(-2.5), "-0.25000E+01");
        assert_eq!(legacy(0.0), " 0.00000E+00");
        assert_eq!(legacy(123.456), " 0.12346E+03");
        assert_eq!(legacy(f64::from(0.001234_f32)), " 0.12340E-02");
    }

    #[test]
    fn legacy_width_matches_e13_5() {
        for value in [1.0, -1.0, 3.2e-12, -7.7e21, 0.5] {
            assert_eq!(legacy(value).len(), 12);
        }
    }

    #[test]
    fn legacy_rounding_into_next_decade() {
        assert_eq!(legacy(9.999999), " 0.10000E+02");
    }

    #[test]
    fn legacy_three_digit_exponent() {
        assert_eq!(legacy(1.0e-101), " 0.10000-100");
    }

    #[test]
    fn legacy_non_finite() {
        assert_eq!(legacy(f64::INFINITY), " INF");
        assert_eq!(legacy(f64::NEG_INFINITY), "-INF");
        assert_eq!(legacy(f64::NAN), " NAN");
    }

    #[test]
    fn legacy_round_trip() {
        for value in [1.0, -2.5, 0.0123456, 98765.4321, -3.3e-7] {
            let parsed: f64 = legacy(value).trim().parse().unwrap();
            assert!(((parsed - value) / value).abs() < 1e-4, "{value} -> {parsed}");
        }
    }

    #[test]
    fn max_precision() {
        let single = significant_digits(4);
        let double = significant_digits(8);
        assert_eq!(
            format_value(f64::from(0.1_f32), FormattingMode::MaxPrecision, single),
            " 1.000000E-01"
        );
        assert_eq!(
            format_value(0.1, FormattingMode::MaxPrecision, double),
            " 1.00000000000000E-01"
        );
        assert_eq!(
            format_value(-1.5, FormattingMode::MaxPrecision, significant_digits(16)).len(),
            40
        );
    }

    #[test]
    fn idempotent() {
        for mode in [
            FormattingMode::Standard,
            FormattingMode::Legacy,
            FormattingMode::MaxPrecision,
        ] {
            assert_eq!(format_value(0.75, mode, 7), format_value(0.75, mode, 7));
        }
    }

    #[test]
    fn digit_table() {
        assert_eq!(significant_digits(4), 7);
        assert_eq!(significant_digits(8), 15);
        assert_eq!(significant_digits(16), 34);
        assert_eq!(significant_digits(32), 34);
        assert_eq!(significant_digits(12), 7);
        assert!(is_known_width(4));
        assert!(!is_known_width(12));
        assert!(!is_known_width(6));
    }
}

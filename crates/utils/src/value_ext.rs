use crate::f;

/// Extends primitives with more specific formatting options
pub trait ValueExt {
    /// Scientific number formatting with a sign slot
    ///
    /// Mirrors the `% .{precision}E` conversion of C `printf`. Non-negative
    /// values get a leading space where the `-` would go, the exponent
    /// character is upper case, and the exponent is always signed and padded
    /// with zeros to at least `exp_pad` digits.
    ///
    /// Every rendering of a finite value therefore has the same width for a
    /// given precision, which is what column-aligned text formats rely on.
    ///
    /// ```rust
    /// # use cubetools_utils::ValueExt;
    /// assert_eq!((-1.0_f64).sci(4, 2), "-1.0000E+00".to_string());
    /// assert_eq!(1.0_f64.sci(4, 2), " 1.0000E+00".to_string());
    /// assert_eq!(0.00123_f64.sci(2, 2), " 1.23E-03".to_string());
    /// ```
    ///
    /// Values without an exponent (infinities and NaN) are returned upper case
    /// in the same sign slot, e.g. `" INF"` or `"-INF"`.
    fn sci(&self, precision: usize, exp_pad: usize) -> String;
}

impl<T: std::fmt::UpperExp> ValueExt for T {
    fn sci(&self, precision: usize, exp_pad: usize) -> String {
        let mut num = f!("{:.precision$E}", &self, precision = precision);

        // Reserve the sign slot for non-negative values
        if !num.starts_with('-') {
            num.insert(0, ' ');
        }

        // Nothing more to do for inf and NaN
        let Some(idx) = num.find('E') else {
            return num.to_uppercase();
        };

        let exp = num.split_off(idx);
        // Make sure the exponent is signed
        let (sign, exp) = match exp.strip_prefix("E-") {
            Some(exp) => ('-', exp),
            None => ('+', &exp[1..]),
        };
        // Pad the exponent with zeros if needed and put it back on the number
        num.push_str(&f!("E{}{:0>pad$}", sign, exp, pad = exp_pad));
        num
    }
}

//! Decimal pattern formatting for the `@decfmt` echo function.
//!
//! Supports the common subset of `DecimalFormat` patterns scripts actually
//! use: literal prefix and suffix text, `0` digits for mandatory positions,
//! `#` digits for optional fraction positions, and a single `.` separating
//! the integer and fraction parts. `0.00`, `#.##`, `0.0#`, and plain `0`
//! all behave as expected. Grouping separators and exponents are out, and a
//! negative sign is emitted with the digits, after any literal prefix
//! (`$-3.5`, where the full pattern language would give `-$3.5`).

/// A parsed decimal pattern.
#[derive(Debug, PartialEq, Eq)]
pub struct DecimalPattern {
    prefix: String,
    suffix: String,
    /// Minimum digit count left of the point, zero-padded.
    min_int: usize,
    /// Minimum digit count right of the point, zero-padded.
    min_frac: usize,
    /// Maximum digit count right of the point, rounded half-to-even.
    max_frac: usize,
}

impl DecimalPattern {
    /// Parse a pattern. Lenient: unrecognized characters outside the digit
    /// run become literal prefix or suffix text.
    pub fn parse(pattern: &str) -> DecimalPattern {
        let chars: Vec<char> = pattern.chars().collect();
        let digit_start = chars
            .iter()
            .position(|&c| c == '0' || c == '#' || c == '.')
            .unwrap_or(chars.len());
        let digit_end = chars
            .iter()
            .rposition(|&c| c == '0' || c == '#' || c == '.')
            .map_or(digit_start, |i| i + 1);

        let prefix: String = chars[..digit_start].iter().collect();
        let suffix: String = chars[digit_end..].iter().collect();
        let body = &chars[digit_start..digit_end];

        let point = body.iter().position(|&c| c == '.');
        let (int_part, frac_part) = match point {
            Some(i) => (&body[..i], &body[i + 1..]),
            None => (body, &[][..]),
        };

        let min_int = int_part.iter().filter(|&&c| c == '0').count().max(1);
        let min_frac = frac_part.iter().filter(|&&c| c == '0').count();
        let max_frac = frac_part.len().max(min_frac);

        DecimalPattern {
            prefix,
            suffix,
            min_int,
            min_frac,
            max_frac,
        }
    }

    /// Format `value` under this pattern.
    pub fn format(&self, value: f64) -> String {
        let rounded = format!("{value:.prec$}", prec = self.max_frac);
        let (sign, magnitude) = match rounded.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", rounded.as_str()),
        };
        let (int_digits, frac_digits) = match magnitude.split_once('.') {
            Some((i, f)) => (i, f),
            None => (magnitude, ""),
        };

        let mut int_digits = int_digits.to_string();
        while int_digits.len() < self.min_int {
            int_digits.insert(0, '0');
        }

        let mut frac_digits = frac_digits.to_string();
        while frac_digits.len() > self.min_frac && frac_digits.ends_with('0') {
            frac_digits.pop();
        }

        let mut out = String::new();
        out.push_str(&self.prefix);
        out.push_str(sign);
        out.push_str(&int_digits);
        if !frac_digits.is_empty() {
            out.push('.');
            out.push_str(&frac_digits);
        }
        out.push_str(&self.suffix);
        out
    }
}

/// Format `value` under `pattern` in one step.
pub fn format_decimal(value: f64, pattern: &str) -> String {
    DecimalPattern::parse(pattern).format(value)
}

//! Number → string conversion used when building expected answers.
//!
//! Learners type numbers the way they are usually printed: `16`, not `16.0`; `-1`, not
//! `-1.0`. Expected answers are compared as strings, so the formatting here is part of
//! the verification contract.

pub trait NumStr {
    fn num_str(&self) -> String;
}

/// Magnitudes at or above this print in exponent form.
const EXP_UPPER: f64 = 1e21;
/// Non-zero magnitudes below this print in exponent form.
const EXP_LOWER: f64 = 1e-6;

impl NumStr for f64 {
    fn num_str(&self) -> String {
        let f = *self;
        if f.is_nan() {
            return "NaN".to_string();
        }
        if f.is_infinite() {
            return if f > 0. { "Infinity" } else { "-Infinity" }.to_string();
        }
        if f == 0. {
            // Covers -0 as well
            return "0".to_string();
        }
        let abs = f.abs();
        if abs >= EXP_UPPER || abs < EXP_LOWER {
            let rendered = format!("{:e}", f);
            return match rendered.split_once('e') {
                Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
                _ => rendered,
            };
        }
        // `Display` for f64 is the shortest round-trip decimal, and omits ".0" for integral values
        format!("{}", f)
    }
}

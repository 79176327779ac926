// src/score.rs

//! Score literal parsing and canonical formatting.
//!
//! Scores travel on the wire as strings. Accepted inputs are signed decimal
//! integers, decimal floats, and the case-insensitive tokens `+inf` / `-inf`.
//! NaN is never a valid score, and a finite literal that overflows to
//! infinity is rejected rather than silently saturated.

use crate::errors::ZSetError;

/// The result of classifying one score literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreValue {
    PosInfinity,
    NegInfinity,
    Finite(f64),
    Invalid,
}

impl ScoreValue {
    /// Classifies a raw token as a score literal.
    pub fn parse(raw: &str) -> ScoreValue {
        if raw.eq_ignore_ascii_case("+inf") {
            return ScoreValue::PosInfinity;
        }
        if raw.eq_ignore_ascii_case("-inf") {
            return ScoreValue::NegInfinity;
        }
        match raw.parse::<f64>() {
            // Spelled-out specials ("nan", "inf", "infinity") and literals that
            // overflow the f64 range are not valid score inputs.
            Ok(v) if v.is_nan() || v.is_infinite() => ScoreValue::Invalid,
            Ok(v) => ScoreValue::Finite(v),
            Err(_) => ScoreValue::Invalid,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScoreValue::PosInfinity => Some(f64::INFINITY),
            ScoreValue::NegInfinity => Some(f64::NEG_INFINITY),
            ScoreValue::Finite(v) => Some(*v),
            ScoreValue::Invalid => None,
        }
    }
}

/// Parses a score literal from raw argument bytes.
pub fn parse_score(raw: &[u8]) -> Result<f64, ZSetError> {
    let text = std::str::from_utf8(raw).map_err(|_| ZSetError::NotAFloat)?;
    ScoreValue::parse(text)
        .as_f64()
        .ok_or(ZSetError::NotAFloat)
}

/// Formats a score the one canonical way used across every response shape:
/// fixed six-decimal notation for finite values, `inf` / `-inf` otherwise.
pub fn format_score(score: f64) -> String {
    if score == f64::INFINITY {
        "inf".to_string()
    } else if score == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{score:.6}")
    }
}

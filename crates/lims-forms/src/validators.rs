//! Field validators derived from schema metadata.

use regex::Regex;

/// One validation rule attached to a form field.
#[derive(Debug, Clone)]
pub enum Validator {
    /// A value must be present and non-blank.
    Required,
    /// Numeric minimum (inclusive).
    Min(f64),
    /// Successive (lower, upper) open intervals; a trailing unpaired value
    /// is an open lower bound. A value passes when it falls strictly inside
    /// any interval, or strictly above the trailing bound.
    Range(Vec<f64>),
    /// Regex the whole value must match.
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

impl Validator {
    /// Check `value`, returning the failure message when the rule is
    /// violated. Blank values only fail `Required`; optional fields left
    /// empty pass the other rules.
    pub fn check(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        match self {
            Validator::Required => {
                if trimmed.is_empty() {
                    Some("required".to_string())
                } else {
                    None
                }
            }
            Validator::Min(min) => {
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(parsed) if parsed >= *min => None,
                    Ok(parsed) => Some(format!("{} is less than the minimum {}", parsed, min)),
                    Err(_) => Some(format!("not a number: {}", trimmed)),
                }
            }
            Validator::Range(bounds) => {
                if trimmed.is_empty() {
                    return None;
                }
                let Ok(parsed) = trimmed.parse::<f64>() else {
                    return Some(format!("not a number: {}", trimmed));
                };
                if in_range(bounds, parsed) {
                    None
                } else {
                    Some(format!("{} is outside the allowed ranges {:?}", parsed, bounds))
                }
            }
            Validator::Pattern { regex, message } => {
                if trimmed.is_empty() || regex.is_match(trimmed) {
                    None
                } else {
                    Some(
                        message
                            .clone()
                            .unwrap_or_else(|| format!("does not match pattern {}", regex.as_str())),
                    )
                }
            }
        }
    }
}

/// True when `value` is strictly inside any (lower, upper) pair, or
/// strictly above a trailing unpaired lower bound.
fn in_range(bounds: &[f64], value: f64) -> bool {
    let mut pairs = bounds.chunks_exact(2);
    for pair in pairs.by_ref() {
        if value > pair[0] && value < pair[1] {
            return true;
        }
    }
    match pairs.remainder() {
        [lower] => value > *lower,
        _ => false,
    }
}

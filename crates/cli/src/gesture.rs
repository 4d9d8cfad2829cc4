//! User gestures on the label screen, in command-line form.

use core::str::FromStr;

use thiserror::Error;

use cartonforge_core::DomainError;
use cartonforge_labels::parse_quantity_input;

/// One user action. Line and carton numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Split { line: usize },
    Unsplit { line: usize },
    Set { line: usize, carton: usize, quantity: i64 },
    Toggle { line: usize },
    SelectAll,
    SelectNone,
}

#[derive(Debug, Error)]
pub enum GestureError {
    #[error("unknown gesture {0:?}")]
    Unknown(String),

    #[error("expected a line number >= 1, got {0:?}")]
    BadNumber(String),

    #[error("expected set:LINE:CARTON=QTY, got {0:?}")]
    BadSet(String),

    #[error(transparent)]
    Quantity(#[from] DomainError),
}

fn number(raw: &str) -> Result<usize, GestureError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(GestureError::BadNumber(raw.to_string())),
    }
}

impl FromStr for Gesture {
    type Err = GestureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (verb, rest) = s.split_once(':').unwrap_or((s, ""));

        match verb {
            "all" if rest.is_empty() => Ok(Gesture::SelectAll),
            "none" if rest.is_empty() => Ok(Gesture::SelectNone),
            "split" => Ok(Gesture::Split { line: number(rest)? }),
            "unsplit" => Ok(Gesture::Unsplit { line: number(rest)? }),
            "toggle" => Ok(Gesture::Toggle { line: number(rest)? }),
            "set" => {
                let (target, quantity) = rest
                    .split_once('=')
                    .ok_or_else(|| GestureError::BadSet(s.to_string()))?;
                let (line, carton) = target
                    .split_once(':')
                    .ok_or_else(|| GestureError::BadSet(s.to_string()))?;

                Ok(Gesture::Set {
                    line: number(line)?,
                    carton: number(carton)?,
                    quantity: parse_quantity_input(quantity)?,
                })
            }
            _ => Err(GestureError::Unknown(s.to_string())),
        }
    }
}

impl core::fmt::Display for Gesture {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Gesture::Split { line } => write!(f, "split:{line}"),
            Gesture::Unsplit { line } => write!(f, "unsplit:{line}"),
            Gesture::Set {
                line,
                carton,
                quantity,
            } => write!(f, "set:{line}:{carton}={quantity}"),
            Gesture::Toggle { line } => write!(f, "toggle:{line}"),
            Gesture::SelectAll => f.write_str("all"),
            Gesture::SelectNone => f.write_str("none"),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Coordinate convention of the MAS position column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionBase {
    /// 1-based, as in SAM (the default)
    #[default]
    OneBased,
    /// 0-based, as in BED; shifted by one on output
    ZeroBased,
}

impl PositionBase {
    /// Offset added to a MAS position to make it 1-based
    #[must_use]
    pub fn offset(self) -> u64 {
        match self {
            Self::OneBased => 0,
            Self::ZeroBased => 1,
        }
    }
}

/// How to handle MAS lines that cannot be converted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum InvalidLineHandling {
    /// Stop at the first invalid line with an error
    #[default]
    Fail,
    /// Log a warning for each invalid line and skip it
    Warn,
    /// Skip invalid lines without logging
    Silent,
}

impl std::fmt::Display for InvalidLineHandling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fail => write!(f, "fail"),
            Self::Warn => write!(f, "warn"),
            Self::Silent => write!(f, "silent"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_base_offset() {
        assert_eq!(PositionBase::OneBased.offset(), 0);
        assert_eq!(PositionBase::ZeroBased.offset(), 1);
        assert_eq!(PositionBase::default(), PositionBase::OneBased);
    }

    #[test]
    fn test_invalid_line_handling_serde() {
        let json = serde_json::to_string(&InvalidLineHandling::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        assert_eq!(InvalidLineHandling::default(), InvalidLineHandling::Fail);
    }
}

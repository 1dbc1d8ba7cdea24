//! Output formatting for command results.
//!
//! Supports multiple output formats: table (human-readable), JSON, and toon.

use clap::ValueEnum;
use serde::Serialize;

use crate::db::DataValue;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// Token-efficient toon format
    Toon,
}

/// Trait for types that can be formatted for output
pub trait Outputable: Serialize {
    /// Format as a human-readable table
    fn to_table(&self) -> String;

    /// Format according to the specified output format
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Table => self.to_table(),
            OutputFormat::Json => serde_json::to_string_pretty(self).unwrap_or_default(),
            OutputFormat::Toon => {
                let json_value = serde_json::to_value(self).unwrap_or_default();
                toon::encode(&json_value, None)
            }
        }
    }
}

/// Render stored bytes for display: UTF-8 text as-is, anything else as hex.
pub fn display_bytes(bytes: &[u8]) -> String {
    DataValue::from(bytes).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Serialize)]
    struct Sample {
        name: String,
        count: usize,
    }

    impl Outputable for Sample {
        fn to_table(&self) -> String {
            format!("{}: {}", self.name, self.count)
        }
    }

    #[rstest]
    fn test_table_format() {
        let sample = Sample {
            name: "cells".to_string(),
            count: 3,
        };
        assert_eq!(sample.format(OutputFormat::Table), "cells: 3");
    }

    #[rstest]
    fn test_json_format() {
        let sample = Sample {
            name: "cells".to_string(),
            count: 3,
        };
        let parsed: serde_json::Value =
            serde_json::from_str(&sample.format(OutputFormat::Json)).unwrap();
        assert_eq!(parsed["name"], "cells");
        assert_eq!(parsed["count"], 3);
    }

    #[rstest]
    fn test_toon_format() {
        let sample = Sample {
            name: "cells".to_string(),
            count: 3,
        };
        let output = sample.format(OutputFormat::Toon);
        assert!(output.contains("name: cells"));
        assert!(output.contains("count: 3"));
    }

    #[rstest]
    #[case(b"plain", "plain")]
    #[case(&[0xff, 0x00], "0xff00")]
    #[case(b"", "")]
    fn test_display_bytes(#[case] bytes: &[u8], #[case] expected: &str) {
        assert_eq!(display_bytes(bytes), expected);
    }
}

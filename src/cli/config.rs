//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser};

/// Bill output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Receipt table with totals.
    Table,

    /// JSON document with two-decimal amounts.
    Json,
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Fruit bill calculator
#[derive(Debug, Parser)]
#[command(name = "fruit-bill", about = "Compute a fruit shopping-cart bill", long_about = None)]
pub(crate) struct BillConfig {
    /// Catalog file (YAML, or JSON when the extension is `.json`)
    #[arg(
        short,
        long,
        env = "FRUIT_BILL_CATALOG",
        default_value = "fixtures/catalog/fruits.yml"
    )]
    pub catalog: PathBuf,

    /// JSON request file: `[{"name": "APPLE", "quantity": 3}, ...]`
    #[arg(short, long, conflicts_with = "items")]
    pub request: Option<PathBuf>,

    /// Output format
    #[arg(short, long, env = "FRUIT_BILL_OUTPUT", value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Items to bill, each `NAME` (one unit) or `NAME=QTY`
    pub items: Vec<String>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_items_and_defaults() -> TestResult {
        let config = BillConfig::try_parse_from(["fruit-bill", "apple=3", "melon"])?;

        assert_eq!(config.items, ["apple=3", "melon"]);
        assert_eq!(config.output, OutputFormat::Table);
        assert!(config.request.is_none());

        Ok(())
    }

    #[test]
    fn parses_catalog_request_and_formats() -> TestResult {
        let config = BillConfig::try_parse_from([
            "fruit-bill",
            "--catalog",
            "offer.json",
            "--request",
            "order.json",
            "--output",
            "json",
            "--log-format",
            "json",
        ])?;

        assert_eq!(config.catalog, PathBuf::from("offer.json"));
        assert_eq!(config.request, Some(PathBuf::from("order.json")));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.logging.log_format, LogFormat::Json);

        Ok(())
    }

    #[test]
    fn request_file_conflicts_with_items() {
        let result = BillConfig::try_parse_from(["fruit-bill", "-r", "order.json", "apple"]);

        assert!(result.is_err());
    }
}

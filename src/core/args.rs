use chrono::{DateTime, Utc};
use clap::Parser;

#[derive(Parser, Debug, PartialEq)]
#[command(version, about)]
pub struct CliArgs {
    #[arg(short, long)]
    pub config: Option<String>,

    /// Run the check as if it were this instant (RFC 3339), instead of now.
    #[arg(long)]
    pub at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_args_parsing() {
        let args = CliArgs::parse_from(["self", "--config", "foo"]);
        assert_eq!(
            args,
            CliArgs {
                config: Some("foo".to_string()),
                at: None,
            }
        );
    }

    #[test]
    fn test_args_at_timestamp() {
        let args = CliArgs::parse_from(["self", "--at", "2025-10-08T20:47:00Z"]);
        assert_eq!(
            args.at,
            Some(Utc.with_ymd_and_hms(2025, 10, 8, 20, 47, 0).unwrap())
        );
    }

    #[test]
    fn test_args_rejects_garbage_timestamp() {
        let res = CliArgs::try_parse_from(["self", "--at", "yesterday"]);
        assert!(res.is_err());
    }
}

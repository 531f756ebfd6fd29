//
//  bcr-api
//  util/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Utility Module
//!
//! Small helpers shared by the configuration layer and the `bcr` binary.
//!
//! - **Dates**: [`parse_date_arg`] for `--since` / `--until` style arguments
//! - **Paths**: [`expand_home`] for `~/` in configured paths
//! - **Secrets**: [`mask_token`] for `bcr auth status --show-token`

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Duration, Local, NaiveDate};

/// Parses a date given on the command line.
///
/// Accepts an ISO date (`2025-03-01`), `today`, `yesterday`, or a relative
/// offset in days or weeks (`7d`, `2w`) counted back from today.
///
/// # Example
///
/// ```rust
/// use bcr_api::util::parse_date_arg;
///
/// let date = parse_date_arg("2025-03-01").unwrap();
/// assert_eq!(date.to_string(), "2025-03-01");
/// assert!(parse_date_arg("next tuesday").is_err());
/// ```
pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    parse_date_relative_to(input, Local::now().date_naive())
}

fn parse_date_relative_to(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }

    if let Some((count, unit_days)) = split_offset(&input) {
        return Ok(today - Duration::days(count * unit_days));
    }

    NaiveDate::parse_from_str(&input, "%Y-%m-%d").with_context(|| {
        format!(
            "Invalid date '{}'. Use YYYY-MM-DD, today, yesterday, or an offset like 7d or 2w",
            input
        )
    })
}

fn split_offset(input: &str) -> Option<(i64, i64)> {
    let (number, unit_days) = if let Some(n) = input.strip_suffix('d') {
        (n, 1)
    } else if let Some(n) = input.strip_suffix('w') {
        (n, 7)
    } else {
        return None;
    };

    let count: i64 = number.parse().ok()?;
    (count >= 0).then_some((count, unit_days))
}

/// Replaces a leading `~` with the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };

    match directories::BaseDirs::new() {
        Some(dirs) => dirs.home_dir().join(rest),
        None => path.to_path_buf(),
    }
}

/// Shows the first and last four characters of a token.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_date_relative_to("2025-01-31", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_parse_relative_dates() {
        assert_eq!(parse_date_relative_to("today", today()).unwrap(), today());
        assert_eq!(
            parse_date_relative_to("Yesterday", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
        );
        assert_eq!(
            parse_date_relative_to("7d", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 8).unwrap()
        );
        assert_eq!(
            parse_date_relative_to("2w", today()).unwrap(),
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date_relative_to("31/01/2025", today()).is_err());
        assert!(parse_date_relative_to("-3d", today()).is_err());
    }

    #[test]
    fn test_expand_home_leaves_plain_paths() {
        assert_eq!(expand_home(Path::new("/etc/bcr")), PathBuf::from("/etc/bcr"));
        assert!(!expand_home(Path::new("~/.bcr/credentials.txt")).starts_with("~"));
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*****");
        assert_eq!(mask_token("abcd1234efgh5678"), "abcd...5678");
    }
}

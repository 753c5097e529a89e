//! Payload types returned by the GitHub REST API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository as listed by `/users/{user}/repos` or `/user/repos`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub private: bool,
    pub name: String,
    /// `<owner>/<name>`
    pub full_name: String,
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visibility = if self.private { "private" } else { "public" };
        write!(
            f,
            "{:<12} {:<8} {:<30} {}",
            self.id, visibility, self.name, self.full_name
        )
    }
}

/// One weekly sample of code frequency for a repository.
///
/// `deletions` is reported non-positive upstream, so the sign already
/// encodes direction and the two counts are summed as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFrequency {
    /// Start of the week, Unix seconds.
    pub time: i64,
    pub additions: i64,
    pub deletions: i64,
}

impl CodeFrequency {
    /// Lines touched during the week (`additions + deletions`).
    pub fn lines_changed(&self) -> i64 {
        self.additions + self.deletions
    }

    /// Start of the week as a UTC timestamp, if representable.
    pub fn week_start(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.time, 0)
    }

    /// Convert the raw `[[time, additions, deletions], ...]` payload.
    ///
    /// Samples whose length is not exactly 3 are dropped. The result is
    /// newest first, i.e. reversed relative to the payload.
    pub fn from_raw(raw: Vec<Vec<i64>>) -> Vec<CodeFrequency> {
        raw.into_iter()
            .rev()
            .filter_map(|sample| match sample.as_slice() {
                &[time, additions, deletions] => Some(CodeFrequency {
                    time,
                    additions,
                    deletions,
                }),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_reverses_payload_order() {
        let raw = vec![vec![1000, 1, 1], vec![2000, 2, 2], vec![3000, 3, 3]];
        let decoded = CodeFrequency::from_raw(raw);
        let times: Vec<i64> = decoded.iter().map(|c| c.time).collect();
        assert_eq!(times, vec![3000, 2000, 1000]);
        assert_eq!(
            decoded[0],
            CodeFrequency {
                time: 3000,
                additions: 3,
                deletions: 3
            }
        );
    }

    #[test]
    fn test_from_raw_drops_malformed_samples() {
        let raw = vec![
            vec![1000, 10, -2],
            vec![2000, 5],
            vec![],
            vec![3000, 1, -1, 7],
            vec![4000, 4, -4],
        ];
        let decoded = CodeFrequency::from_raw(raw);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].time, 4000);
        assert_eq!(decoded[1].time, 1000);
    }

    #[test]
    fn test_lines_changed_adds_signed_deletions() {
        let sample = CodeFrequency {
            time: 0,
            additions: 3375,
            deletions: -813,
        };
        assert_eq!(sample.lines_changed(), 2562);
    }

    #[test]
    fn test_week_start_converts_unix_seconds() {
        let sample = CodeFrequency {
            time: 1_627_171_200,
            additions: 0,
            deletions: 0,
        };
        let week = sample.week_start().unwrap();
        assert_eq!(week.to_rfc3339(), "2021-07-25T00:00:00+00:00");
    }

    #[test]
    fn test_repository_ignores_unknown_fields() {
        let json = r#"{
            "id": 489517307,
            "node_id": "R_kgDOHSunOw",
            "private": false,
            "name": "account-book-api",
            "full_name": "kokoichi206/account-book-api",
            "fork": false
        }"#;
        let repo: Repository = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 489517307);
        assert_eq!(repo.full_name, "kokoichi206/account-book-api");
        assert!(!repo.private);
    }

    #[test]
    fn test_repository_display_includes_full_name() {
        let repo = Repository {
            id: 1,
            private: true,
            name: "utils".to_string(),
            full_name: "kokoichi206/utils".to_string(),
        };
        let line = repo.to_string();
        assert!(line.contains("private"));
        assert!(line.contains("kokoichi206/utils"));
    }
}

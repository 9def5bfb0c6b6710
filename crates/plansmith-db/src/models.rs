use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Status of a generated plan.
///
/// `Draft` is the row default; `Complete` is set once the completion text
/// has been sectionized and the full record written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    Draft,
    Complete,
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Complete => "complete",
        };
        f.write_str(s)
    }
}

impl FromStr for PlanStatus {
    type Err = PlanStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "complete" => Ok(Self::Complete),
            other => Err(PlanStatusParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`PlanStatus`] string.
#[derive(Debug, Clone, Error)]
#[error("invalid plan status: {0:?}")]
pub struct PlanStatusParseError(pub String);

// ---------------------------------------------------------------------------
// Row structs
// ---------------------------------------------------------------------------

/// A generated business plan -- the top-level document record.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: Uuid,
    pub title: String,
    pub industry: String,
    pub status: PlanStatus,
    pub created_at: DateTime<Utc>,
}

/// One named section of a plan, ordered by `position`.
///
/// `edited_at` is set only when the content has been overwritten by a
/// direct user edit after generation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PlanSection {
    pub plan_id: Uuid,
    pub position: i32,
    pub title: String,
    pub content: String,
    pub edited_at: Option<DateTime<Utc>>,
}

/// A video lesson from the fixed catalog.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lesson {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub duration_minutes: i32,
    pub category: String,
    pub position: i32,
    pub created_at: DateTime<Utc>,
}

/// Watched-state for a single lesson.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct LessonProgress {
    pub lesson_id: Uuid,
    pub watched: bool,
    pub watched_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_status_display_roundtrip() {
        let variants = [PlanStatus::Draft, PlanStatus::Complete];
        for v in &variants {
            let s = v.to_string();
            let parsed: PlanStatus = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn plan_status_invalid() {
        let result = "bogus".parse::<PlanStatus>();
        assert!(result.is_err());
    }

    #[test]
    fn plan_status_serde_snake_case() {
        let json = serde_json::to_string(&PlanStatus::Complete).unwrap();
        assert_eq!(json, "\"complete\"");
        let parsed: PlanStatus = serde_json::from_str("\"draft\"").unwrap();
        assert_eq!(parsed, PlanStatus::Draft);
    }
}

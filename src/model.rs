use std::fmt;
use std::str::FromStr;

use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// Numeric contest identifier assigned by the site. Always positive; zero
/// never appears in scraped data and is rejected on input validation.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct ContestId(u64);

impl ContestId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for ContestId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for ContestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl fmt::Display for ContestId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Problem position within a contest ("A", "B1", ...), as shown in the
/// problems table and used in statement urls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct ProblemIndex(String);

impl ProblemIndex {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for ProblemIndex {
    fn from(index: T) -> Self {
        Self(index.into())
    }
}

impl AsRef<str> for ProblemIndex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Site-wide submission identifier.
#[derive(
    Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(transparent)]
pub struct SubmissionId(u64);

impl SubmissionId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<u64> for SubmissionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One row of the upcoming-contests table. Times and durations stay the
/// site's display strings; the listing has no stable machine format.
#[derive(Serialize, Deserialize, Getters, Debug, Clone, PartialEq, Eq, Hash)]
#[get = "pub"]
pub struct ContestSummary {
    name: String,
    organizer: String,
    start_time: String,
    duration: String,
}

impl ContestSummary {
    pub fn new(
        name: impl Into<String>,
        organizer: impl Into<String>,
        start_time: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            organizer: organizer.into(),
            start_time: start_time.into(),
            duration: duration.into(),
        }
    }
}

/// One row of the finished-contests table. Unlike upcoming contests these
/// carry the numeric id used by every per-contest operation.
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoricalContest {
    #[get_copy = "pub"]
    contest_id: ContestId,
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    organizer: String,
    #[get = "pub"]
    start_time: String,
    #[get = "pub"]
    duration: String,
}

impl HistoricalContest {
    pub fn new(
        contest_id: ContestId,
        name: impl Into<String>,
        organizer: impl Into<String>,
        start_time: impl Into<String>,
        duration: impl Into<String>,
    ) -> Self {
        Self {
            contest_id,
            name: name.into(),
            organizer: organizer.into(),
            start_time: start_time.into(),
            duration: duration.into(),
        }
    }
}

/// One row of a contest's problems table.
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemSummary {
    #[get_copy = "pub"]
    contest_id: ContestId,
    #[get = "pub"]
    problem_index: ProblemIndex,
    #[get = "pub"]
    name: String,
    /// Resource-limit line as displayed, e.g. "2 s, 256 MB".
    #[get = "pub"]
    constraints: String,
    #[get_copy = "pub"]
    solved_count: u32,
}

impl ProblemSummary {
    pub fn new(
        contest_id: ContestId,
        problem_index: impl Into<ProblemIndex>,
        name: impl Into<String>,
        constraints: impl Into<String>,
        solved_count: u32,
    ) -> Self {
        Self {
            contest_id,
            problem_index: problem_index.into(),
            name: name.into(),
            constraints: constraints.into(),
            solved_count,
        }
    }
}

/// Statement fragments of one problem, kept as raw inner HTML for the host
/// to render. Input and output specifications are always present; the
/// other sections legitimately vary by problem.
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProblemDetail {
    #[get_copy = "pub"]
    contest_id: ContestId,
    #[get = "pub"]
    problem_index: ProblemIndex,
    #[get = "pub"]
    description: Option<String>,
    #[get = "pub"]
    input_spec: String,
    #[get = "pub"]
    output_spec: String,
    #[get = "pub"]
    samples: Option<String>,
    #[get = "pub"]
    note: Option<String>,
}

impl ProblemDetail {
    pub fn new(
        contest_id: ContestId,
        problem_index: impl Into<ProblemIndex>,
        description: Option<String>,
        input_spec: impl Into<String>,
        output_spec: impl Into<String>,
        samples: Option<String>,
        note: Option<String>,
    ) -> Self {
        Self {
            contest_id,
            problem_index: problem_index.into(),
            description,
            input_spec: input_spec.into(),
            output_spec: output_spec.into(),
            samples,
            note,
        }
    }
}

/// Authenticated-session snapshot. All fields empty means anonymous.
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Default)]
pub struct AccountSession {
    #[get = "pub"]
    handle: Option<String>,
    #[get_copy = "pub"]
    rating: Option<i32>,
    #[get = "pub"]
    level_name: Option<String>,
    #[get = "pub"]
    avatar_url: Option<String>,
}

impl AccountSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(
        handle: impl Into<String>,
        rating: i32,
        level_name: impl Into<String>,
        avatar_url: impl Into<String>,
    ) -> Self {
        Self {
            handle: Some(handle.into()),
            rating: Some(rating),
            level_name: Some(level_name.into()),
            avatar_url: Some(avatar_url.into()),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.handle.is_some()
    }
}

/// One row of a my-submissions table. Verdict text is whatever the site
/// displays ("Accepted", "Wrong answer on test 3", ...).
#[derive(Serialize, Deserialize, Getters, CopyGetters, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubmissionRecord {
    #[get_copy = "pub"]
    id: SubmissionId,
    #[get = "pub"]
    submitted_at: String,
    /// Full display name including the index prefix, e.g. "A1 - Dual (Hard Version)".
    #[get = "pub"]
    problem_full_name: String,
    #[get = "pub"]
    language: String,
    #[get = "pub"]
    verdict: String,
    #[get_copy = "pub"]
    time_consumed_ms: u32,
    #[get_copy = "pub"]
    memory_consumed_kb: u32,
}

impl SubmissionRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SubmissionId,
        submitted_at: impl Into<String>,
        problem_full_name: impl Into<String>,
        language: impl Into<String>,
        verdict: impl Into<String>,
        time_consumed_ms: u32,
        memory_consumed_kb: u32,
    ) -> Self {
        Self {
            id,
            submitted_at: submitted_at.into(),
            problem_full_name: problem_full_name.into(),
            language: language.into(),
            verdict: verdict.into(),
            time_consumed_ms,
            memory_consumed_kb,
        }
    }
}

/// One entry of the static submission-language catalog. The code is the
/// submit form's option value.
#[derive(Serialize, CopyGetters, Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct SupportedLanguage {
    #[get_copy = "pub"]
    code: u32,
    #[get_copy = "pub"]
    name: &'static str,
}

impl SupportedLanguage {
    pub const fn new(code: u32, name: &'static str) -> Self {
        Self { code, name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contest_id_display_and_parse() {
        let id = ContestId::from(1854);
        assert_eq!(id.to_string(), "1854");
        assert_eq!("1854".parse::<ContestId>().unwrap(), id);
        assert!("abc".parse::<ContestId>().is_err());
    }

    #[test]
    fn problem_index_from_str_like() {
        assert_eq!(ProblemIndex::from("A1").as_str(), "A1");
        assert_eq!(ProblemIndex::from(String::from("B")).to_string(), "B");
    }

    #[test]
    fn account_session_states() {
        let anonymous = AccountSession::anonymous();
        assert!(!anonymous.is_authenticated());
        assert_eq!(anonymous.handle(), &None);

        let session = AccountSession::authenticated("tourist", 3821, "legendary grandmaster", "//userpic.example/1.jpg");
        assert!(session.is_authenticated());
        assert_eq!(session.rating(), Some(3821));
    }

    #[test]
    fn newtypes_serialize_transparently() {
        let json = serde_json::to_string(&ContestId::from(566)).unwrap();
        assert_eq!(json, "566");
        let json = serde_json::to_string(&ProblemIndex::from("A")).unwrap();
        assert_eq!(json, "\"A\"");
    }
}

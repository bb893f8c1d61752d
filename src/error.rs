use std::fmt;

use thiserror::Error;

use crate::model::{ContestId, ProblemIndex};

pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds surfaced by the engine.
///
/// Kinds are part of the contract: hosts match on them to decide what to
/// show the user. Operations wrap transport and parse failures into their
/// `Request*` / `AnswerSubmissionFailed` kind at the boundary, while kinds
/// from this taxonomy pass through unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The browser process could not be launched. Fatal for the session.
    #[error("Failed to launch headless browser: {detail}")]
    BrowserLaunchFailed { detail: String },

    /// Transport-level page failure (navigation, DOM command, evaluation).
    /// Never escapes an operation raw.
    #[error("Browser page error: {detail}")]
    Page { detail: String },

    /// A required DOM fragment was absent: markup drift or an unexpected
    /// page state. Carries the fragment name, not the selector.
    #[error("Could not find {element} on the page")]
    ElementNotFound { element: &'static str },

    /// A fragment was present but its content did not parse.
    #[error("Failed to scrape {what}: {detail}")]
    ScrapeFailed { what: &'static str, detail: String },

    /// Host-provided storage failed.
    #[error("Storage operation failed: {detail}")]
    Store { detail: String },

    #[error("Login into codeforces need both account and password info")]
    AccountAndPasswordRequired,

    /// The site did not accept the credentials; the header still shows an
    /// anonymous session after the form was submitted.
    #[error("Failed to log in to codeforces as {account}")]
    LoginFailed { account: String },

    #[error("{detail}")]
    LoggedInAccountRequired { detail: &'static str },

    #[error("Could not find ratings info on profile page of {handle}")]
    RatingsInfoNotFound { handle: String },

    #[error("Could not find level name on profile page of {handle}")]
    LevelNameNotFound { handle: String },

    #[error("Could not find avatar url on profile page of {handle}")]
    AvatarUrlNotFound { handle: String },

    #[error("ContestId must be provided when requesting data from Codeforces")]
    ContestIdRequired,

    #[error("{detail}")]
    ParamsUndefined { detail: String },

    /// The statement root is missing: bad contest/problem pair or a page
    /// the site refused to render.
    #[error("Could not find problem statement for {contest_id}/{problem_index}")]
    ProblemStatementNotFound {
        contest_id: ContestId,
        problem_index: ProblemIndex,
    },

    /// The requested code is not in the static language catalog.
    #[error("Unsupported submission language code: {code}")]
    LanguageNotFound { code: u32 },

    /// The site rejected the submission as an exact duplicate of earlier
    /// source code.
    #[error("The same code was already submitted before")]
    SameCodeSubmitted,

    /// The newest submission was still being judged when the poll budget
    /// ran out.
    #[error("Timed out waiting for the judge verdict after {attempts} checks")]
    AnswerTestingTimeOut { attempts: usize },

    #[error("Error occurred when requesting info from codeforces.\nDetailed error message: {source}")]
    RequestInfo { source: Box<Error> },

    #[error("Error occurred when requesting problem data from Codeforces\nDetailed error message: {source}")]
    RequestProblems { source: Box<Error> },

    #[error("Error occurred when requesting detailed problem info\nContest: {contest_id}, problem: {problem_index}\nDetailed error message: {source}")]
    RequestDetailedProblemInfo {
        contest_id: ContestId,
        problem_index: ProblemIndex,
        source: Box<Error>,
    },

    #[error("Error occurred when requesting submissions data\nContestID: {contest_id}\nDetailed error message: {source}")]
    RequestSubmissionInfo {
        contest_id: ContestId,
        source: Box<Error>,
    },

    #[error("Error occurred when submitting answer to codeforces\nDetailed error message: {source}")]
    AnswerSubmissionFailed { source: Box<Error> },
}

impl Error {
    pub(crate) fn page(err: impl fmt::Display) -> Self {
        Error::Page {
            detail: err.to_string(),
        }
    }

    pub(crate) fn launch(err: impl fmt::Display) -> Self {
        Error::BrowserLaunchFailed {
            detail: err.to_string(),
        }
    }

    /// Whether a boundary wrap applies. Transport and parse failures get
    /// wrapped into the operation kind; everything else in the taxonomy is
    /// already meaningful to the host and passes through.
    fn is_wrappable(&self) -> bool {
        matches!(self, Error::Page { .. } | Error::ScrapeFailed { .. })
    }

    pub(crate) fn into_request_info(self) -> Self {
        if self.is_wrappable() {
            Error::RequestInfo {
                source: Box::new(self),
            }
        } else {
            self
        }
    }

    pub(crate) fn into_request_problems(self) -> Self {
        if self.is_wrappable() {
            Error::RequestProblems {
                source: Box::new(self),
            }
        } else {
            self
        }
    }

    pub(crate) fn into_request_detail(
        self,
        contest_id: ContestId,
        problem_index: ProblemIndex,
    ) -> Self {
        if self.is_wrappable() {
            Error::RequestDetailedProblemInfo {
                contest_id,
                problem_index,
                source: Box::new(self),
            }
        } else {
            self
        }
    }

    pub(crate) fn into_request_submission_info(self, contest_id: ContestId) -> Self {
        if self.is_wrappable() {
            Error::RequestSubmissionInfo {
                contest_id,
                source: Box::new(self),
            }
        } else {
            self
        }
    }

    pub(crate) fn into_answer_submission_failed(self) -> Self {
        if self.is_wrappable() {
            Error::AnswerSubmissionFailed {
                source: Box::new(self),
            }
        } else {
            self
        }
    }
}

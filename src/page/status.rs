//! My-submissions page (`/contest/{id}/my`).

use scraper::{ElementRef, Html};
use url::Url;

use crate::macros::fragment;
use crate::model::{ContestId, SubmissionId, SubmissionRecord};
use crate::page::page_url;
use crate::scrape::{parse_leading_u32, ElementRefExt as _, Fragment, Scrape};
use crate::{Error, Result};

pub fn url(contest_id: ContestId) -> Result<Url> {
    page_url(&format!("/contest/{}/my", contest_id))
}

/// The submissions table; used as the page-ready marker.
pub fn submissions_table() -> &'static Fragment {
    fragment!("submissions table", "table.status-frame-datatable")
}

fn submission_rows() -> &'static Fragment {
    fragment!("submission rows", "tr[data-submission-id]")
}

fn verdict_cell() -> &'static Fragment {
    fragment!("verdict cell", "td.status-verdict-cell")
}

fn row_cells() -> &'static Fragment {
    fragment!("submission row cells", "td")
}

pub struct StatusPage {
    content: Html,
}

impl StatusPage {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }

    /// All submission rows, newest first (site order). Rows without the id
    /// attribute are filler and skipped; a row whose id does not parse
    /// aborts the whole read.
    pub fn extract_submissions(&self) -> Result<Vec<SubmissionRecord>> {
        self.require(submissions_table())?
            .select(submission_rows().selector())
            .map(|row| SubmissionRowElem(row).extract_record())
            .collect()
    }

    /// Whether the newest submission is still being judged.
    ///
    /// The verdict cell carries `waiting="false"` once the verdict is
    /// final. No rows yet, or a cell without the attribute, counts as
    /// still waiting: polling longer beats declaring a verdict the site
    /// has not produced.
    pub fn latest_is_waiting(&self) -> Result<bool> {
        let table = self.require(submissions_table())?;
        let first = match table.select(submission_rows().selector()).next() {
            Some(row) => row,
            None => return Ok(true),
        };
        let waiting = SubmissionRowElem(first)
            .find_first(verdict_cell())
            .and_then(|cell| cell.value().attr("waiting").map(str::to_owned));
        Ok(waiting.as_deref() != Some("false"))
    }
}

impl Scrape for StatusPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct SubmissionRowElem<'a>(ElementRef<'a>);

impl Scrape for SubmissionRowElem<'_> {
    fn elem(&self) -> ElementRef {
        self.0
    }
}

impl SubmissionRowElem<'_> {
    fn extract_record(&self) -> Result<SubmissionRecord> {
        let id_attr = self.0.value().attr("data-submission-id").unwrap_or_default();
        let id: u64 = id_attr.trim().parse().map_err(|_| Error::ScrapeFailed {
            what: "submission id attribute",
            detail: format!("not a number: {:?}", id_attr),
        })?;

        let mut cells = self.0.select(row_cells().selector());
        let mut next_text = |what: &'static str| -> Result<String> {
            cells
                .next()
                .map(|td| td.inner_text().trim().to_owned())
                .ok_or(Error::ElementNotFound { element: what })
        };
        // First cell repeats the id as a link; the row attribute is
        // authoritative.
        next_text("submission id cell")?;
        let submitted_at = next_text("submission time cell")?;
        next_text("submission author cell")?;
        let problem_full_name = next_text("submission problem cell")?;
        let language = next_text("submission language cell")?;
        let verdict = next_text("submission verdict cell")?;
        let time_consumed_ms =
            parse_leading_u32(&next_text("submission running time cell")?, "running time")?;
        let memory_consumed_kb =
            parse_leading_u32(&next_text("submission memory cell")?, "consumed memory")?;

        Ok(SubmissionRecord::new(
            SubmissionId::from(id),
            submitted_at,
            problem_full_name,
            language,
            verdict,
            time_consumed_ms,
            memory_consumed_kb,
        ))
    }
}

//! Problem statement page (`/contest/{id}/problem/{index}`).

use scraper::{ElementRef, Html};
use url::Url;

use crate::macros::fragment;
use crate::model::{ContestId, ProblemDetail, ProblemIndex};
use crate::page::page_url;
use crate::scrape::{Fragment, Scrape};
use crate::{Error, Result};

pub fn url(contest_id: ContestId, index: &ProblemIndex) -> Result<Url> {
    page_url(&format!("/contest/{}/problem/{}", contest_id, index))
}

/// Statement root; its absence means the contest/problem pair does not
/// exist or the site refused to render it.
pub fn statement_root() -> &'static Fragment {
    fragment!("problem statement", "div.problem-statement")
}

fn description_block() -> &'static Fragment {
    fragment!("problem description", "div.header + div")
}

fn input_spec_block() -> &'static Fragment {
    fragment!("input specification", "div.input-specification")
}

fn output_spec_block() -> &'static Fragment {
    fragment!("output specification", "div.output-specification")
}

fn samples_block() -> &'static Fragment {
    fragment!("sample tests", "div.sample-tests")
}

fn note_block() -> &'static Fragment {
    fragment!("problem note", "div.note")
}

pub struct ProblemPage {
    content: Html,
}

impl ProblemPage {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }

    /// Extracts the statement fragments as raw inner HTML.
    ///
    /// Input and output specifications are required; description, samples
    /// and note are optional because interactive and special formats
    /// legitimately omit them.
    pub fn extract_detail(
        &self,
        contest_id: ContestId,
        index: &ProblemIndex,
    ) -> Result<ProblemDetail> {
        let root = StatementElem(self.find_first(statement_root()).ok_or_else(|| {
            Error::ProblemStatementNotFound {
                contest_id,
                problem_index: index.clone(),
            }
        })?);

        // When the description is absent the sibling selector lands on the
        // next section instead; the description is the only unclassed div.
        let description = root
            .find_first(description_block())
            .filter(|div| div.value().attr("class").is_none())
            .map(|div| div.inner_html());
        let input_spec = root.require_html(input_spec_block())?;
        let output_spec = root.require_html(output_spec_block())?;
        let samples = root.optional_html(samples_block());
        let note = root.optional_html(note_block());

        Ok(ProblemDetail::new(
            contest_id,
            index.clone(),
            description,
            input_spec,
            output_spec,
            samples,
            note,
        ))
    }
}

impl Scrape for ProblemPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct StatementElem<'a>(ElementRef<'a>);

impl Scrape for StatementElem<'_> {
    fn elem(&self) -> ElementRef {
        self.0
    }
}

//! Contest dashboard (`/contest/{id}`): the problems table.

use scraper::{ElementRef, Html};
use url::Url;

use crate::macros::fragment;
use crate::model::{ContestId, ProblemSummary};
use crate::page::page_url;
use crate::scrape::{parse_solved_count, ElementRefExt as _, Fragment, Scrape};
use crate::{Error, Result};

pub fn url(contest_id: ContestId) -> Result<Url> {
    page_url(&format!("/contest/{}", contest_id))
}

/// Body of the problems table; used as the page-ready marker.
pub fn problems_table() -> &'static Fragment {
    fragment!(
        "contest problems table",
        "#pageContent > .datatable > div > table.problems > tbody"
    )
}

fn table_rows() -> &'static Fragment {
    fragment!("problem table rows", "tr")
}

fn row_cells() -> &'static Fragment {
    fragment!("problem row cells", "td")
}

fn name_link() -> &'static Fragment {
    fragment!("problem name link", "div > div > a")
}

fn constraints_notice() -> &'static Fragment {
    fragment!("problem constraints notice", "div > div.notice")
}

fn solved_link() -> &'static Fragment {
    fragment!("solved count link", "a")
}

pub struct ProblemsPage {
    content: Html,
}

impl ProblemsPage {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }

    /// Problem rows after the column header.
    pub fn extract_problems(&self, contest_id: ContestId) -> Result<Vec<ProblemSummary>> {
        self.require(problems_table())?
            .select(table_rows().selector())
            .skip(1)
            .map(|row| ProblemRowElem(row).extract_summary(contest_id))
            .collect()
    }
}

impl Scrape for ProblemsPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct ProblemRowElem<'a>(ElementRef<'a>);

impl ProblemRowElem<'_> {
    fn extract_summary(&self, contest_id: ContestId) -> Result<ProblemSummary> {
        let mut cells = self.0.select(row_cells().selector());

        let index = cells
            .next()
            .map(|td| td.inner_text().trim().to_owned())
            .ok_or(Error::ElementNotFound {
                element: "problem index cell",
            })?;

        let name_cell = NameCellElem(cells.next().ok_or(Error::ElementNotFound {
            element: "problem name cell",
        })?);
        let name = name_cell
            .require(name_link())?
            .inner_text()
            .trim()
            .to_owned();
        // The notice mixes the io mode and the limits; the limits are its
        // last text run.
        let constraints = name_cell
            .require(constraints_notice())?
            .text_runs()
            .pop()
            .unwrap_or_default();

        // Third cell is the submit column; the solved count sits in the
        // fourth.
        let solved_cell = cells.nth(1).ok_or(Error::ElementNotFound {
            element: "solved count cell",
        })?;
        let solved_text = solved_cell
            .select(solved_link().selector())
            .next()
            .ok_or(Error::ElementNotFound {
                element: "solved count link",
            })?
            .inner_text();
        let solved_count = parse_solved_count(&solved_text)?;

        Ok(ProblemSummary::new(
            contest_id,
            index,
            name,
            constraints,
            solved_count,
        ))
    }
}

struct NameCellElem<'a>(ElementRef<'a>);

impl Scrape for NameCellElem<'_> {
    fn elem(&self) -> ElementRef {
        self.0
    }
}

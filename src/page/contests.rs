//! Contest listing page (`/contests`): the upcoming and finished tables.

use scraper::{ElementRef, Html};
use url::Url;

use crate::macros::fragment;
use crate::model::{ContestId, ContestSummary, HistoricalContest};
use crate::page::page_url;
use crate::scrape::{ElementRefExt as _, Fragment, Scrape};
use crate::{Error, Result};

pub fn url() -> Result<Url> {
    page_url("/contests")
}

/// Body of the upcoming-contests table; used as the page-ready marker.
pub fn upcoming_table() -> &'static Fragment {
    fragment!(
        "upcoming contests table",
        "div.contestList > div.datatable > div > table > tbody"
    )
}

/// Body of the finished-contests table.
pub fn history_table() -> &'static Fragment {
    fragment!(
        "contest history table",
        "div.contestList > div.contests-table > div.datatable > div > table > tbody"
    )
}

fn table_rows() -> &'static Fragment {
    fragment!("contest table rows", "tr")
}

/// Only history rows carry the contest id attribute; header and filler
/// rows do not.
fn history_rows() -> &'static Fragment {
    fragment!("contest history rows", "tr[data-contestid]")
}

fn row_cells() -> &'static Fragment {
    fragment!("contest row cells", "td")
}

pub struct ContestsPage {
    content: Html,
}

impl ContestsPage {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }

    /// Upcoming contests. The first row is the column header; a table with
    /// only that row is a valid empty listing.
    pub fn extract_upcoming(&self) -> Result<Vec<ContestSummary>> {
        self.require(upcoming_table())?
            .select(table_rows().selector())
            .skip(1)
            .map(|row| ContestRowElem(row).extract_summary())
            .collect()
    }

    /// Finished contests with their numeric ids.
    pub fn extract_history(&self) -> Result<Vec<HistoricalContest>> {
        self.require(history_table())?
            .select(history_rows().selector())
            .map(|row| HistoryRowElem(row).extract_contest())
            .collect()
    }
}

impl Scrape for ContestsPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

struct ContestRowElem<'a>(ElementRef<'a>);

impl ContestRowElem<'_> {
    fn extract_summary(&self) -> Result<ContestSummary> {
        let mut cells = self.0.select(row_cells().selector());
        let mut next_text = |what: &'static str| -> Result<String> {
            cells
                .next()
                .map(|td| td.inner_text().trim().to_owned())
                .ok_or(Error::ElementNotFound { element: what })
        };
        let name = next_text("contest name cell")?;
        let organizer = next_text("contest organizer cell")?;
        let start_time = next_text("contest start time cell")?;
        let duration = next_text("contest duration cell")?;
        Ok(ContestSummary::new(name, organizer, start_time, duration))
    }
}

struct HistoryRowElem<'a>(ElementRef<'a>);

impl HistoryRowElem<'_> {
    fn extract_contest(&self) -> Result<HistoricalContest> {
        let id_attr = self.0.value().attr("data-contestid").unwrap_or_default();
        let contest_id: u64 = id_attr.trim().parse().map_err(|_| Error::ScrapeFailed {
            what: "contest id attribute",
            detail: format!("not a number: {:?}", id_attr),
        })?;
        if contest_id == 0 {
            return Err(Error::ScrapeFailed {
                what: "contest id attribute",
                detail: "contest id must be positive".to_owned(),
            });
        }

        let mut cells = self.0.select(row_cells().selector());
        // The name cell nests author links; only its direct text is the
        // contest name.
        let name = cells
            .next()
            .map(|td| td.direct_text().trim().to_owned())
            .ok_or(Error::ElementNotFound {
                element: "contest name cell",
            })?;
        let mut next_text = |what: &'static str| -> Result<String> {
            cells
                .next()
                .map(|td| td.inner_text().trim().to_owned())
                .ok_or(Error::ElementNotFound { element: what })
        };
        let organizer = next_text("contest organizer cell")?;
        let start_time = next_text("contest start time cell")?;
        let duration = next_text("contest duration cell")?;
        Ok(HistoricalContest::new(
            ContestId::from(contest_id),
            name,
            organizer,
            start_time,
            duration,
        ))
    }
}

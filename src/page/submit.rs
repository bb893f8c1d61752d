//! Submit form (`/contest/{id}/submit/{index}`; the path preselects the
//! problem, so the form only needs a language and source code).

use scraper::{ElementRef, Html};
use url::Url;

use crate::macros::fragment;
use crate::model::{ContestId, ProblemIndex};
use crate::page::page_url;
use crate::scrape::{Fragment, Scrape};
use crate::Result;

pub fn url(contest_id: ContestId, index: &ProblemIndex) -> Result<Url> {
    page_url(&format!("/contest/{}/submit/{}", contest_id, index))
}

pub fn language_select() -> &'static Fragment {
    fragment!("language selector", r#"select[name="programTypeId"]"#)
}

pub fn source_input() -> &'static Fragment {
    fragment!("source code editor", "#sourceCodeTextarea")
}

pub fn submit_button() -> &'static Fragment {
    fragment!("submit button", "form.submit-form input.submit")
}

fn duplicate_notice() -> &'static Fragment {
    fragment!("duplicate submission notice", "span.error.for__source")
}

pub struct SubmitPage {
    content: Html,
}

impl SubmitPage {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }

    /// The site re-renders the form with this notice instead of navigating
    /// when the exact same source was submitted before.
    pub fn has_duplicate_notice(&self) -> bool {
        self.find_first(duplicate_notice()).is_some()
    }
}

impl Scrape for SubmitPage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

//! Account profile page (`/profile/{handle}`).

use scraper::{ElementRef, Html};
use url::Url;

use crate::macros::fragment;
use crate::model::AccountSession;
use crate::page::page_url;
use crate::scrape::{ElementRefExt as _, Fragment, Scrape};
use crate::{Error, Result};

pub fn url(handle: &str) -> Result<Url> {
    page_url(&format!("/profile/{}", handle))
}

/// Main info box; used as the page-ready marker.
pub fn info_root() -> &'static Fragment {
    fragment!("profile info box", "div.info")
}

fn info_rows() -> &'static Fragment {
    fragment!("profile info rows", "div.info ul li")
}

fn row_value() -> &'static Fragment {
    fragment!("profile info row value", "span")
}

fn level_name() -> &'static Fragment {
    fragment!("account level", "div.user-rank span")
}

fn avatar_image() -> &'static Fragment {
    fragment!("profile avatar", "div.title-photo img")
}

pub struct ProfilePage {
    content: Html,
}

impl ProfilePage {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }

    /// Builds the session snapshot for `handle`. Each field raises its own
    /// kind, so markup drift names the exact extraction that broke.
    pub fn extract_session(&self, handle: &str) -> Result<AccountSession> {
        // The info list mixes rating, contribution and friend counts; only
        // the row labelled "Contest rating" holds the rating.
        let rating_text = self
            .elem()
            .select(info_rows().selector())
            .find(|row| {
                row.inner_text()
                    .trim_start()
                    .starts_with("Contest rating")
            })
            .and_then(|row| row.select(row_value().selector()).next())
            .ok_or_else(|| Error::RatingsInfoNotFound {
                handle: handle.to_owned(),
            })?
            .inner_text();
        let rating: i32 =
            rating_text
                .trim()
                .parse()
                .map_err(|_| Error::ScrapeFailed {
                    what: "contest rating",
                    detail: format!("not a number: {:?}", rating_text.trim()),
                })?;

        let level = self
            .find_first(level_name())
            .ok_or_else(|| Error::LevelNameNotFound {
                handle: handle.to_owned(),
            })?
            .inner_text()
            .trim()
            .to_owned();

        let avatar = self
            .find_first(avatar_image())
            .and_then(|img| img.value().attr("src"))
            .ok_or_else(|| Error::AvatarUrlNotFound {
                handle: handle.to_owned(),
            })?
            .to_owned();

        Ok(AccountSession::authenticated(handle, rating, level, avatar))
    }
}

impl Scrape for ProfilePage {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

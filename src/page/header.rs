//! The header block present on every page, used to read the login state.

use scraper::{ElementRef, Html};

use crate::macros::fragment;
use crate::scrape::{ElementRefExt as _, Fragment, Scrape};
use crate::Result;

/// Header block showing either the Enter/Register pair or the handle.
pub fn login_status() -> &'static Fragment {
    fragment!("login status header", "div.lang-chooser > div:nth-child(2)")
}

/// Logout control inside the header, present only when authenticated.
pub fn logout_link() -> &'static Fragment {
    fragment!("logout link", r#"div.lang-chooser a[href$="/logout"]"#)
}

fn header_links() -> &'static Fragment {
    fragment!("login status links", "a")
}

/// Login-state reads shared by every page.
pub trait HasHeader: Scrape {
    /// The authenticated handle, or `None` for an anonymous session.
    ///
    /// Anonymous sessions render the Enter/Register link pair where an
    /// authenticated session renders the handle as the first link. A
    /// missing header block is markup drift, not anonymity.
    fn current_handle(&self) -> Result<Option<String>> {
        let header = self.require(login_status())?;
        let texts: Vec<String> = header
            .select(header_links().selector())
            .map(|link| link.inner_text().trim().to_owned())
            .collect();
        let is_anonymous = texts.first().map(String::as_str) == Some("Enter")
            || texts.get(1).map(String::as_str) == Some("Register");
        if is_anonymous {
            return Ok(None);
        }
        Ok(texts.into_iter().next())
    }

    fn is_logged_in(&self) -> Result<bool> {
        Ok(self.current_handle()?.is_some())
    }

    fn is_logged_in_as(&self, handle: &str) -> Result<bool> {
        Ok(self.current_handle()?.as_deref() == Some(handle))
    }
}

/// Any snapshot, viewed only for its header.
pub struct HeaderView {
    content: Html,
}

impl HeaderView {
    pub fn parse(html: &str) -> Self {
        Self {
            content: Html::parse_document(html),
        }
    }
}

impl Scrape for HeaderView {
    fn elem(&self) -> ElementRef {
        self.content.root_element()
    }
}

impl HasHeader for HeaderView {}

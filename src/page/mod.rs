//! Site pages: urls, fragment declarations and snapshot extractors.
//!
//! Each module owns the selectors of one page and parses an HTML snapshot
//! taken from the live page; nothing here touches the browser. The site's
//! markup is an unversioned contract, so every selector is a named
//! fragment and extraction failures point at one extraction point.

use once_cell::sync::Lazy;
use url::Url;

use crate::{Error, Result};

pub mod contests;
pub mod enter;
pub mod header;
pub mod problem;
pub mod problems;
pub mod profile;
pub mod status;
pub mod submit;

pub use header::{HasHeader, HeaderView};

pub static BASE_URL: Lazy<Url> = Lazy::new(|| Url::parse("https://codeforces.com").unwrap());

/// The site front page.
pub fn home_url() -> Result<Url> {
    page_url("/")
}

pub(crate) fn page_url(path: &str) -> Result<Url> {
    BASE_URL.join(path).map_err(|err| Error::Page {
        detail: format!("invalid url path {:?}: {}", path, err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_paths_onto_the_site_base() {
        assert_eq!(home_url().unwrap().as_str(), "https://codeforces.com/");
        assert_eq!(
            page_url("/contest/1854/problem/A1").unwrap().as_str(),
            "https://codeforces.com/contest/1854/problem/A1"
        );
    }
}

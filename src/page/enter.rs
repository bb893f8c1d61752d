//! The login page (`/enter`).

use url::Url;

use crate::macros::fragment;
use crate::page::page_url;
use crate::scrape::Fragment;
use crate::Result;

pub fn url() -> Result<Url> {
    page_url("/enter")
}

pub fn handle_input() -> &'static Fragment {
    fragment!("login handle field", "#handleOrEmail")
}

pub fn password_input() -> &'static Fragment {
    fragment!("login password field", "#password")
}

pub fn submit_button() -> &'static Fragment {
    fragment!("login submit button", "#enterForm input.submit")
}

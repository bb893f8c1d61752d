/// Declares a cached regex compiled from a literal pattern.
#[macro_export]
macro_rules! regex {
    ($expr:expr) => {{
        static REGEX: ::once_cell::sync::Lazy<::regex::Regex> =
            ::once_cell::sync::Lazy::new(|| ::regex::Regex::new($expr).unwrap());
        &REGEX
    }};
}

/// Declares a named page fragment with a cached selector.
///
/// The name is what [`Error::ElementNotFound`](crate::Error::ElementNotFound)
/// reports when a required fragment is missing, so it should describe the
/// extraction point, not the selector.
#[macro_export]
macro_rules! fragment {
    ($name:literal, $selectors:literal) => {{
        static FRAGMENT: $crate::scrape::Fragment = $crate::scrape::Fragment::new(
            $name,
            $selectors,
            ::once_cell::sync::Lazy::new(|| {
                ::scraper::Selector::parse($selectors).unwrap()
            }),
        );
        &FRAGMENT
    }};
}

pub use {fragment, regex};

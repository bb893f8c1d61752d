//! Static catalog of submission languages.
//!
//! Entries mirror the `programTypeId` option values of the submit form.
//! The catalog only validates and resolves caller-supplied codes before a
//! submission touches the network; the site itself stays the source of
//! truth for which codes it accepts at any given time.

use crate::model::SupportedLanguage;

/// Languages known to the submit form, by option value.
pub static SUPPORTED_LANGUAGES: &[SupportedLanguage] = &[
    SupportedLanguage::new(3, "Delphi 7"),
    SupportedLanguage::new(4, "Free Pascal 3.0.2"),
    SupportedLanguage::new(6, "PHP 8.1.7"),
    SupportedLanguage::new(7, "Python 2.7.18"),
    SupportedLanguage::new(9, "C# Mono 6.8"),
    SupportedLanguage::new(12, "Haskell GHC 8.10.1"),
    SupportedLanguage::new(13, "Perl 5.20.1"),
    SupportedLanguage::new(19, "OCaml 4.02.1"),
    SupportedLanguage::new(20, "Scala 2.12.8"),
    SupportedLanguage::new(28, "D DMD32 v2.105.0"),
    SupportedLanguage::new(31, "Python 3.8.10"),
    SupportedLanguage::new(32, "Go 1.19.6"),
    SupportedLanguage::new(34, "JavaScript V8 4.8.0"),
    SupportedLanguage::new(36, "Java 1.8.0_241"),
    SupportedLanguage::new(40, "PyPy 2.7.13 (7.3.0)"),
    SupportedLanguage::new(41, "PyPy 3.6.9 (7.3.0)"),
    SupportedLanguage::new(43, "GNU GCC C11 5.1.0"),
    SupportedLanguage::new(48, "Kotlin 1.5.31"),
    SupportedLanguage::new(50, "GNU G++14 6.4.0"),
    SupportedLanguage::new(51, "PascalABC.NET 3.8.3"),
    SupportedLanguage::new(52, "Clang++17 Diagnostics"),
    SupportedLanguage::new(54, "GNU G++17 7.3.0"),
    SupportedLanguage::new(55, "Node.js 15.8.0 (64bit)"),
    SupportedLanguage::new(60, "Java 11.0.6"),
    SupportedLanguage::new(61, "GNU G++17 9.2.0 (64 bit, msys 2)"),
    SupportedLanguage::new(65, "C# 8, .NET Core 3.1"),
    SupportedLanguage::new(67, "Ruby 3.2.2"),
    SupportedLanguage::new(70, "PyPy 3.9.10 (7.3.9, 64bit)"),
    SupportedLanguage::new(73, "GNU G++20 11.2.0 (64 bit, winlibs)"),
    SupportedLanguage::new(75, "Rust 1.75.0 (2021)"),
    SupportedLanguage::new(79, "C# 10, .NET SDK 6.0"),
    SupportedLanguage::new(83, "Kotlin 1.6.10"),
];

/// Looks up a language by its submit-form option value.
pub fn find_language(code: u32) -> Option<&'static SupportedLanguage> {
    SUPPORTED_LANGUAGES.iter().find(|lang| lang.code() == code)
}

//! Embed OpenURL citation metadata in article pages as COinS spans.
//!
//! `coinspan` turns the article, journal, and issue metadata a journal
//! platform has already resolved for a page render into a COinS tag: a
//! `<span class="Z3988">` element whose `title` attribute carries an
//! OpenURL (Z39.88-2004) ContextObject. Reference managers such as Zotero
//! scan rendered pages for these spans and import the citation without
//! touching the platform's APIs.
//!
//! The crate is a pure formatter. It does not parse citation formats,
//! validate metadata, or talk to the network; routing, template
//! resolution, and output-buffer concatenation stay with the host. One
//! call per qualifying page render goes in, one HTML fragment (or
//! nothing) comes out.
//!
//! # Basic usage
//!
//! ```rust
//! use coinspan::{
//!     Article, Author, CoinsConfig, CoinsFooter, FooterHook, Issue, Journal, Localized,
//!     PageContext, Publication, Route,
//! };
//!
//! let article = Article {
//!     id: "42".into(),
//!     public_id: "42".into(),
//!     locale: "en".into(),
//!     title: Localized::single("en", "On the Electrodynamics of Moving Bodies"),
//!     publication: Publication {
//!         authors: vec![Author {
//!             family_name: Localized::single("en", "Einstein"),
//!             given_name: Localized::single("en", "Albert"),
//!             full_name: "Albert Einstein".into(),
//!         }],
//!     },
//!     ..Default::default()
//! };
//! let journal = Journal {
//!     name: Localized::single("en", "Annalen der Physik"),
//!     ..Default::default()
//! };
//! let issue = Issue {
//!     volume: Some("322".into()),
//!     number: Some("10".into()),
//!     ..Default::default()
//! };
//!
//! let resolver = |_: &str, _: &str, id: &str| {
//!     format!("https://journal.example/article/view/{}", id)
//! };
//! let ctx = PageContext {
//!     route: Route::new("article", "view"),
//!     article: Some(&article),
//!     journal: Some(&journal),
//!     issue: Some(&issue),
//!     resolver: &resolver,
//! };
//!
//! let footer = CoinsFooter::new(CoinsConfig::default());
//! let fragment = footer.on_page_footer(&ctx).expect("article page yields a tag");
//! assert!(fragment.starts_with("<span class=\"Z3988\" title=\"ctx_ver=Z39.88-2004"));
//! ```
//!
//! # Hook integration
//!
//! Hosts register a [`CoinsFooter`] wherever they dispatch page-footer
//! extensions and append whatever [`FooterHook::on_page_footer`] returns
//! to the render buffer. The hook never asks the host to stop the chain:
//! `None` simply means "nothing to add for this page".
//!
//! # Thread safety
//!
//! [`CoinsFooter`] holds only its configuration and can be shared freely
//! between request-handling threads.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

pub mod coins;
pub mod config;
pub mod error;
pub mod kev;

mod utils;

// Reexports
pub use coins::CoinsFooter;
pub use config::CoinsConfig;
pub use error::RouteParseError;
pub use kev::KevPairs;
pub use utils::parse_iso_date;

/// The page a request resolved to, as a `page` plus `operation` pair.
///
/// Journal platforms route requests as `page/operation` (an article view
/// is `article/view`); the footer hook compares the current route against
/// its configured list before doing any work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    page: CompactString,
    operation: CompactString,
}

impl Route {
    /// Create a route from its two segments.
    pub fn new(page: impl Into<CompactString>, operation: impl Into<CompactString>) -> Self {
        Self {
            page: page.into(),
            operation: operation.into(),
        }
    }

    /// The page segment (e.g. `article`).
    pub fn page(&self) -> &str {
        &self.page
    }

    /// The operation segment (e.g. `view`).
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.page, self.operation)
    }
}

impl FromStr for Route {
    type Err = RouteParseError;

    /// Parse a `page/operation` string, as routes appear in host settings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((page, operation)) = s.split_once('/') else {
            return Err(RouteParseError::MissingSeparator(s.to_string()));
        };
        if operation.contains('/') {
            return Err(RouteParseError::ExtraSeparator(s.to_string()));
        }
        if page.is_empty() || operation.is_empty() {
            return Err(RouteParseError::EmptySegment(s.to_string()));
        }
        Ok(Route::new(page, operation))
    }
}

impl Serialize for Route {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Locale-keyed text values with a preferred-locale lookup.
///
/// Journal platforms store user-entered text (titles, journal names,
/// author names) once per enabled locale. [`Localized::get`] looks up one
/// locale exactly; [`Localized::get_or_any`] falls back to any stored
/// value so a journal named only in its primary locale still surfaces on
/// pages rendered in another.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Localized {
    values: BTreeMap<String, String>,
}

impl Localized {
    /// An empty set of values.
    pub fn new() -> Self {
        Self::default()
    }

    /// A value stored under a single locale.
    pub fn single(locale: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().with(locale, value)
    }

    /// Add a value for a locale, replacing any previous value (builder style).
    #[must_use]
    pub fn with(mut self, locale: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(locale.into(), value.into());
        self
    }

    /// The value stored for exactly `locale`, if any.
    pub fn get(&self, locale: &str) -> Option<&str> {
        self.values.get(locale).map(String::as_str)
    }

    /// The value for `locale`, or any stored value when that locale has none.
    pub fn get_or_any(&self, locale: &str) -> Option<&str> {
        self.get(locale)
            .or_else(|| self.values.values().next().map(String::as_str))
    }

    /// Whether no value is stored under any locale.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A publication date with required year and optional month/day components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Date {
    /// Publication year (required)
    pub year: i32,
    /// Publication month (1-12)
    pub month: Option<u8>,
    /// Publication day (1-31)
    pub day: Option<u8>,
}

impl Date {
    /// A full year-month-day date.
    pub fn ymd(year: i32, month: u8, day: u8) -> Self {
        Self {
            year,
            month: Some(month),
            day: Some(day),
        }
    }

    /// A date known only to the year.
    pub fn year_only(year: i32) -> Self {
        Self {
            year,
            month: None,
            day: None,
        }
    }

    /// Render as ISO-8601: `YYYY`, `YYYY-MM`, or `YYYY-MM-DD` depending on
    /// which components are present. A day without a month is ignored.
    pub fn to_iso8601(&self) -> String {
        match (self.month, self.day) {
            (Some(month), Some(day)) => format!("{:04}-{:02}-{:02}", self.year, month, day),
            (Some(month), None) => format!("{:04}-{:02}", self.year, month),
            _ => format!("{:04}", self.year),
        }
    }
}

/// An author of a publication.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    /// Family name, keyed by locale.
    pub family_name: Localized,
    /// Given name, keyed by locale.
    pub given_name: Localized,
    /// Display form of the full name.
    pub full_name: String,
}

/// The current publication version of an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Authors in citation order (possibly empty).
    pub authors: Vec<Author>,
}

/// A journal article as resolved for one page render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Internal identifier; feeds canonical-URL construction.
    pub id: String,
    /// Reader-facing identifier: the assigned URL path when one exists,
    /// otherwise the internal id.
    pub public_id: String,
    /// Locale the article was published in (e.g. `en`).
    pub locale: String,
    /// Full title, keyed by locale.
    pub title: Localized,
    /// Publication date of the article itself.
    pub date_published: Option<Date>,
    /// Page range within the issue (e.g. `1-10`).
    pub pages: Option<String>,
    /// Digital Object Identifier, without any `doi:`/URL prefix.
    pub doi: Option<String>,
    /// The article's current publication version.
    pub publication: Publication,
}

/// The journal an article belongs to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    /// Journal name, keyed by locale.
    pub name: Localized,
    /// Journal abbreviation, keyed by locale.
    pub abbreviation: Localized,
    /// Print ISSN.
    pub print_issn: Option<String>,
    /// Online ISSN.
    pub online_issn: Option<String>,
}

/// The issue an article was published in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Volume designation.
    pub volume: Option<String>,
    /// Issue number designation.
    pub number: Option<String>,
    /// Publication date of the issue; stands in for articles without one.
    pub date_published: Option<Date>,
}

/// Host-provided construction of canonical public URLs.
///
/// Journal platforms own their URL schemes (path prefixes, rewriting,
/// mirror domains), so the footer hook asks the host for the article-view
/// URL rather than assembling one. Implemented for any
/// `Fn(&str, &str, &str) -> String` closure.
pub trait UrlResolver {
    /// Canonical public URL for `operation` on `page` with the given id.
    fn url(&self, page: &str, operation: &str, id: &str) -> String;
}

impl<F> UrlResolver for F
where
    F: Fn(&str, &str, &str) -> String,
{
    fn url(&self, page: &str, operation: &str, id: &str) -> String {
        self(page, operation, id)
    }
}

/// Everything the rendering layer has resolved for the page being rendered.
///
/// The metadata handles are optional because a footer hook runs on every
/// page, including ones where no article context exists; hooks treat a
/// missing handle as "nothing to do" rather than an error.
pub struct PageContext<'a> {
    /// Route of the current request.
    pub route: Route,
    /// The article being viewed, when the page has one.
    pub article: Option<&'a Article>,
    /// The journal the page belongs to.
    pub journal: Option<&'a Journal>,
    /// The issue the article appeared in.
    pub issue: Option<&'a Issue>,
    /// Canonical-URL construction, owned by the host.
    pub resolver: &'a dyn UrlResolver,
}

/// A page-footer extension point.
///
/// The host rendering pipeline invokes every registered hook once per
/// page render, appends any returned fragment to the output buffer, and
/// continues the chain regardless of the result.
pub trait FooterHook {
    /// Produce an HTML fragment for the page footer, or `None` to add nothing.
    fn on_page_footer(&self, ctx: &PageContext<'_>) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[test]
    fn test_route_display_round_trip() {
        let route: Route = "article/view".parse().unwrap();
        assert_eq!(route.page(), "article");
        assert_eq!(route.operation(), "view");
        assert_eq!(route.to_string(), "article/view");
    }

    #[rstest]
    #[case("article")]
    #[case("")]
    fn test_route_missing_separator(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Route>(),
            Err(RouteParseError::MissingSeparator(_))
        ));
    }

    #[rstest]
    #[case("/view")]
    #[case("article/")]
    #[case("/")]
    fn test_route_empty_segment(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Route>(),
            Err(RouteParseError::EmptySegment(_))
        ));
    }

    #[test]
    fn test_route_extra_separator() {
        assert!(matches!(
            "article/view/extra".parse::<Route>(),
            Err(RouteParseError::ExtraSeparator(_))
        ));
    }

    #[test]
    fn test_route_serde_as_string() {
        let route: Route = serde_json::from_str("\"article/view\"").unwrap();
        assert_eq!(route, Route::new("article", "view"));
        assert_eq!(serde_json::to_string(&route).unwrap(), "\"article/view\"");
        assert!(serde_json::from_str::<Route>("\"article\"").is_err());
    }

    #[test]
    fn test_localized_lookup_and_fallback() {
        let name = Localized::single("en", "Test Journal").with("de", "Testzeitschrift");
        assert_eq!(name.get("en"), Some("Test Journal"));
        assert_eq!(name.get("fr"), None);
        // Fallback picks a stored value deterministically.
        assert_eq!(name.get_or_any("fr"), Some("Testzeitschrift"));
        assert_eq!(name.get_or_any("en"), Some("Test Journal"));
        assert!(Localized::new().get_or_any("en").is_none());
    }

    #[rstest]
    #[case(Date::ymd(2021, 1, 15), "2021-01-15")]
    #[case(Date { year: 2021, month: Some(6), day: None }, "2021-06")]
    #[case(Date::year_only(2021), "2021")]
    #[case(Date { year: 2021, month: None, day: Some(9) }, "2021")]
    #[case(Date::ymd(800, 12, 25), "0800-12-25")]
    fn test_date_iso8601(#[case] date: Date, #[case] expected: &str) {
        assert_eq!(date.to_iso8601(), expected);
    }

    #[test]
    fn test_article_from_json() {
        let article: Article = serde_json::from_str(
            r#"{
                "id": "42",
                "public_id": "einstein-1905",
                "locale": "en",
                "title": {"en": "Test Article"},
                "date_published": {"year": 2021, "month": 1, "day": 15},
                "pages": "1-10",
                "doi": null,
                "publication": {"authors": []}
            }"#,
        )
        .unwrap();
        assert_eq!(article.public_id, "einstein-1905");
        assert_eq!(article.title.get("en"), Some("Test Article"));
        assert_eq!(article.date_published, Some(Date::ymd(2021, 1, 15)));
        assert!(article.doi.is_none());
    }

    #[test]
    fn test_url_resolver_closure() {
        let resolver = |page: &str, operation: &str, id: &str| {
            format!("https://j.example/{}/{}/{}", page, operation, id)
        };
        let resolver: &dyn UrlResolver = &resolver;
        assert_eq!(
            resolver.url("article", "view", "7"),
            "https://j.example/article/view/7"
        );
    }
}

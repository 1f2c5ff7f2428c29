//! COinS tag generation for article pages.
//!
//! A COinS tag is an empty `<span class="Z3988">` whose `title`
//! attribute carries an OpenURL ContextObject describing the article on
//! the page. This module houses the footer hook that decides whether the
//! current render should carry one and produces the fragment.
//!
//! # Example
//!
//! ```
//! use coinspan::{
//!     Article, CoinsConfig, CoinsFooter, FooterHook, Issue, Journal, Localized, PageContext,
//!     Route,
//! };
//!
//! let article = Article {
//!     id: "42".into(),
//!     public_id: "42".into(),
//!     locale: "en".into(),
//!     title: Localized::single("en", "Test Article"),
//!     ..Default::default()
//! };
//! let journal = Journal::default();
//! let issue = Issue::default();
//! let resolver = |_: &str, _: &str, id: &str| format!("https://j.example/a/{}", id);
//!
//! let footer = CoinsFooter::new(CoinsConfig::default());
//! let fragment = footer.on_page_footer(&PageContext {
//!     route: Route::new("article", "view"),
//!     article: Some(&article),
//!     journal: Some(&journal),
//!     issue: Some(&issue),
//!     resolver: &resolver,
//! });
//! assert!(fragment.is_some());
//! ```

mod fields;

use tracing::debug;

use crate::config::CoinsConfig;
use crate::utils::html_escape;
use crate::{FooterHook, PageContext};

/// Page-footer hook that embeds a COinS tag on article pages.
///
/// Holds its configuration and nothing else; one instance serves every
/// request. The emitted fragment is
/// `<span class="Z3988" title="..."></span>` followed by a newline, with
/// the ContextObject form-urlencoded and then entity-escaped for the
/// attribute.
#[derive(Debug, Clone, Default)]
pub struct CoinsFooter {
    config: CoinsConfig,
}

impl CoinsFooter {
    /// Creates a footer hook with the given configuration.
    #[must_use]
    pub fn new(config: CoinsConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &CoinsConfig {
        &self.config
    }
}

impl FooterHook for CoinsFooter {
    /// Produce the COinS fragment for this render, or `None` when the
    /// route is not tagged, the hook is disabled, or the page's article
    /// context never got resolved. All three are silent no-ops.
    fn on_page_footer(&self, ctx: &PageContext<'_>) -> Option<String> {
        if !self.config.matches(&ctx.route) {
            debug!("no COinS tag for route {}", ctx.route);
            return None;
        }

        let (Some(article), Some(journal), Some(issue)) = (ctx.article, ctx.journal, ctx.issue)
        else {
            debug!("article context unresolved on {}, skipping COinS tag", ctx.route);
            return None;
        };

        let kev = fields::context_object(article, journal, issue, ctx.resolver);
        Some(format!(
            "<span class=\"Z3988\" title=\"{}\"></span>\n",
            html_escape(&kev.encode())
        ))
    }
}

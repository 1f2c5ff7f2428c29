//! ContextObject field assembly.
//!
//! Builds the ordered field list for one article page. Twelve fields are
//! always present, with empty values standing in for anything the host
//! never filled in; the rest are appended only when their source value
//! exists. Order is fixed and observable on the wire, so reference
//! managers can rely on it.

use crate::kev::KevPairs;
use crate::{Article, Issue, Journal, UrlResolver};

/// Assemble the OpenURL ContextObject for an article page.
///
/// Identifier split: the canonical URL is built from the article's
/// internal id, while `rft.artnum` carries the reader-facing public id.
pub(crate) fn context_object(
    article: &Article,
    journal: &Journal,
    issue: &Issue,
    resolver: &dyn UrlResolver,
) -> KevPairs {
    let locale = article.locale.as_str();
    let mut kev = KevPairs::new();

    kev.push("ctx_ver", "Z39.88-2004");
    kev.push("rft_id", resolver.url("article", "view", &article.id));
    kev.push("rft_val_fmt", "info:ofi/fmt:kev:mtx:journal");
    kev.push("rft.language", locale);
    kev.push("rft.genre", "article");
    let journal_name = journal.name.get_or_any(locale).unwrap_or_default();
    kev.push("rft.title", journal_name);
    kev.push("rft.jtitle", journal_name);
    kev.push("rft.atitle", article.title.get(locale).unwrap_or_default());
    kev.push("rft.artnum", article.public_id.as_str());
    kev.push(
        "rft.stitle",
        journal.abbreviation.get_or_any(locale).unwrap_or_default(),
    );
    kev.push("rft.volume", issue.volume.as_deref().unwrap_or_default());
    kev.push("rft.issue", issue.number.as_deref().unwrap_or_default());

    if let Some(first) = article.publication.authors.first() {
        kev.push("rft.aulast", first.family_name.get(locale).unwrap_or_default());
        kev.push("rft.aufirst", first.given_name.get(locale).unwrap_or_default());
    }

    // An article without its own date borrows the issue's.
    if let Some(date) = article
        .date_published
        .as_ref()
        .or(issue.date_published.as_ref())
    {
        kev.push("rft.date", date.to_iso8601());
    }

    // Every author, first author included a second time.
    for author in &article.publication.authors {
        kev.push("rft.au", author.full_name.as_str());
    }

    if let Some(doi) = article.doi.as_deref()
        && !doi.is_empty()
    {
        kev.push("rft_id", format!("info:doi/{}", doi));
    }
    kev.push_nonempty("rft.pages", article.pages.as_deref());
    kev.push_nonempty("rft.issn", journal.print_issn.as_deref());
    kev.push_nonempty("rft.eissn", journal.online_issn.as_deref());

    kev
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Localized;
    use pretty_assertions::assert_eq;

    fn resolver(page: &str, operation: &str, id: &str) -> String {
        format!("https://journal.example/{}/{}/{}", page, operation, id)
    }

    #[test]
    fn test_mandatory_fields_keep_order_with_empty_sources() {
        // Nothing optional is set anywhere.
        let article = Article {
            id: "7".into(),
            public_id: "7".into(),
            locale: "en".into(),
            ..Default::default()
        };
        let kev = context_object(
            &article,
            &Journal::default(),
            &Issue::default(),
            &resolver,
        );

        let names: Vec<&str> = kev.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "ctx_ver",
                "rft_id",
                "rft_val_fmt",
                "rft.language",
                "rft.genre",
                "rft.title",
                "rft.jtitle",
                "rft.atitle",
                "rft.artnum",
                "rft.stitle",
                "rft.volume",
                "rft.issue",
            ]
        );
        let volume: Vec<&str> = kev
            .iter()
            .filter(|(name, _)| *name == "rft.volume")
            .map(|(_, value)| value)
            .collect();
        assert_eq!(volume, vec![""]);
    }

    #[test]
    fn test_journal_name_fills_title_and_jtitle() {
        let article = Article {
            id: "7".into(),
            public_id: "7".into(),
            locale: "fr".into(),
            ..Default::default()
        };
        let journal = Journal {
            // Only named in its primary locale; the lookup falls back.
            name: Localized::single("en", "Test Journal"),
            ..Default::default()
        };
        let kev = context_object(&article, &journal, &Issue::default(), &resolver);

        let titles: Vec<&str> = kev
            .iter()
            .filter(|(name, _)| *name == "rft.title" || *name == "rft.jtitle")
            .map(|(_, value)| value)
            .collect();
        assert_eq!(titles, vec!["Test Journal", "Test Journal"]);

        // The article title has no such fallback; a missing locale is empty.
        let atitle: Vec<&str> = kev
            .iter()
            .filter(|(name, _)| *name == "rft.atitle")
            .map(|(_, value)| value)
            .collect();
        assert_eq!(atitle, vec![""]);
    }
}

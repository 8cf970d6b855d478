use crate::ContentSource;
use press_kit_core::Resolved;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct ResolveOptions {
    /// Also look the slug up as a tag
    pub include_tags: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self { include_tags: true }
    }
}

/// Decide which entity a root-level slug names.
///
/// Every lookup runs concurrently. When several match, the first in the
/// order post, page, category, tag, author wins and the rest are logged as
/// shadowed. Blank slugs are `NotFound` without touching the source.
pub async fn resolve<S>(source: &S, slug: &str, options: ResolveOptions) -> Resolved
where
    S: ContentSource + ?Sized,
{
    let slug = slug.trim();
    if slug.is_empty() {
        return Resolved::NotFound;
    }

    let tag_lookup = async {
        if options.include_tags {
            source.tag_by_slug(slug).await
        } else {
            None
        }
    };

    let (post, page, category, tag, author) = tokio::join!(
        source.post_by_slug(slug),
        source.page_by_slug(slug),
        source.category_by_slug(slug),
        tag_lookup,
        source.author_by_slug(slug),
    );

    let mut candidates = Vec::new();
    if let Some(post) = post {
        candidates.push(Resolved::Post(Box::new(post)));
    }
    if let Some(page) = page {
        candidates.push(Resolved::Page(Box::new(page)));
    }
    if let Some(category) = category {
        candidates.push(Resolved::Category(category));
    }
    if let Some(tag) = tag {
        candidates.push(Resolved::Tag(tag));
    }
    if let Some(author) = author {
        candidates.push(Resolved::Author(author));
    }

    let mut candidates = candidates.into_iter();
    let Some(winner) = candidates.next() else {
        debug!(slug, "slug matched nothing");
        return Resolved::NotFound;
    };

    let shadowed: Vec<&str> = candidates.map(|c| c.kind()).collect();
    if !shadowed.is_empty() {
        warn!(
            slug,
            winner = winner.kind(),
            shadowed = %shadowed.join(","),
            "slug matches more than one entity"
        );
    }
    winner
}

//! Everything a page needs beyond the resolved entity itself.

use crate::{ContentSource, PostQuery};
use press_kit_core::{Author, Category, Comment, FeaturedMedia, Page, Post, Resolved};
use std::future::Future;
use std::pin::Pin;

/// Replies are followed at most this many levels below the top
pub const MAX_REPLY_DEPTH: usize = 10;

/// Related posts shown under an article
pub const RELATED_POSTS: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PostView {
    pub post: Post,
    pub author: Option<Author>,
    pub category: Option<Category>,
    pub media: Option<FeaturedMedia>,
    pub comments: Vec<Comment>,
    pub related: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    pub page: Page,
    pub media: Option<FeaturedMedia>,
}

/// A category or tag with its posts
#[derive(Debug, Clone, PartialEq)]
pub struct TermView {
    pub term: Category,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthorView {
    pub author: Author,
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Post(Box<PostView>),
    Page(Box<PageView>),
    Category(TermView),
    Tag(TermView),
    Author(AuthorView),
    NotFound,
}

impl View {
    pub fn is_found(&self) -> bool {
        !matches!(self, View::NotFound)
    }
}

pub async fn load_view<S>(source: &S, resolved: Resolved) -> View
where
    S: ContentSource + ?Sized,
{
    match resolved {
        Resolved::Post(post) => View::Post(Box::new(load_post_view(source, *post).await)),
        Resolved::Page(page) => {
            let media = media_for(source, page.embedded_media(), page.featured_media).await;
            View::Page(Box::new(PageView { page: *page, media }))
        }
        Resolved::Category(term) => {
            let posts = source.posts(&PostQuery::in_category(term.id)).await;
            View::Category(TermView { term, posts })
        }
        Resolved::Tag(term) => {
            let posts = source.posts(&PostQuery::tagged(term.id)).await;
            View::Tag(TermView { term, posts })
        }
        Resolved::Author(author) => {
            let posts = source.posts(&PostQuery::by_author(author.id)).await;
            View::Author(AuthorView { author, posts })
        }
        Resolved::NotFound => View::NotFound,
    }
}

/// Author, first category, media, comments and related posts, fetched together
pub async fn load_post_view<S>(source: &S, post: Post) -> PostView
where
    S: ContentSource + ?Sized,
{
    let first_category = post.categories.first().copied();

    let author = source.author_by_id(post.author);
    let category = async {
        match first_category {
            Some(id) => source.category_by_id(id).await,
            None => None,
        }
    };
    let media = media_for(source, post.embedded_media(), post.featured_media);
    let comments = fetch_comment_tree(source, post.id);
    let related = async {
        let Some(id) = first_category else {
            return Vec::new();
        };
        source
            .posts(&PostQuery::in_category(id).per_page(RELATED_POSTS as u32 + 1))
            .await
            .into_iter()
            .filter(|p| p.id != post.id)
            .take(RELATED_POSTS)
            .collect()
    };

    let (author, category, media, comments, related) =
        tokio::join!(author, category, media, comments, related);

    PostView {
        post,
        author,
        category,
        media,
        comments,
        related,
    }
}

/// Embedded media when the API inlined it, otherwise a lookup by id
async fn media_for<S>(
    source: &S,
    embedded: Option<&FeaturedMedia>,
    id: u64,
) -> Option<FeaturedMedia>
where
    S: ContentSource + ?Sized,
{
    if let Some(media) = embedded {
        return Some(media.clone());
    }
    if id == 0 {
        return None;
    }
    source.media_by_id(id).await
}

/// Full comment thread for a post, one request per level per comment
pub async fn fetch_comment_tree<S>(source: &S, post_id: u64) -> Vec<Comment>
where
    S: ContentSource + ?Sized,
{
    fetch_level(source, post_id, 0, 0).await
}

fn fetch_level<'a, S>(
    source: &'a S,
    post_id: u64,
    parent: u64,
    depth: usize,
) -> Pin<Box<dyn Future<Output = Vec<Comment>> + Send + 'a>>
where
    S: ContentSource + ?Sized,
{
    Box::pin(async move {
        let mut comments = source.comments(post_id, parent).await;
        if depth >= MAX_REPLY_DEPTH {
            return comments;
        }
        for comment in &mut comments {
            comment.replies = fetch_level(source, post_id, comment.id, depth + 1).await;
        }
        comments
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Fixture, InMemorySource, ResolveOptions, resolve};
    use press_kit_core::comments::count_comments;
    use serde_json::json;

    fn source() -> InMemorySource {
        let fixture: Fixture = serde_json::from_value(json!({
            "posts": [
                { "id": 1, "slug": "my-post", "author": 5, "categories": [3], "featured_media": 8 },
                { "id": 2, "slug": "second", "author": 5, "categories": [3] },
                { "id": 3, "slug": "third", "author": 6, "categories": [3] },
                { "id": 4, "slug": "fourth", "author": 6, "categories": [3], "tags": [7] },
                { "id": 5, "slug": "fifth", "author": 6, "categories": [3] }
            ],
            "pages": [{ "id": 20, "slug": "about" }],
            "categories": [{ "id": 3, "slug": "guides", "name": "Guides" }],
            "tags": [{ "id": 7, "slug": "electric", "name": "Electric" }],
            "authors": [
                { "id": 5, "slug": "jim", "name": "Jim" },
                { "id": 6, "slug": "ana", "name": "Ana" }
            ],
            "media": [{ "id": 8, "source_url": "https://cdn.example.com/m.jpg" }],
            "comments": [
                { "id": 10, "post": 1, "parent": 0 },
                { "id": 11, "post": 1, "parent": 10 },
                { "id": 12, "post": 1, "parent": 11 },
                { "id": 13, "post": 1, "parent": 0 }
            ]
        }))
        .unwrap();
        InMemorySource::new(fixture)
    }

    #[tokio::test]
    async fn test_post_view_gathers_everything() {
        let source = source();
        let resolved = resolve(&source, "my-post", ResolveOptions::default()).await;
        let View::Post(view) = load_view(&source, resolved).await else {
            panic!("expected a post view");
        };

        assert_eq!(view.author.as_ref().unwrap().name, "Jim");
        assert_eq!(view.category.as_ref().unwrap().slug, "guides");
        assert_eq!(view.media.as_ref().unwrap().id, 8);
        assert_eq!(count_comments(&view.comments), 4);
        assert_eq!(view.comments[0].replies[0].replies[0].id, 12);

        assert_eq!(view.related.len(), RELATED_POSTS);
        assert!(view.related.iter().all(|p| p.id != 1));
    }

    #[tokio::test]
    async fn test_term_and_author_views() {
        let source = source();

        let resolved = resolve(&source, "guides", ResolveOptions::default()).await;
        let View::Category(view) = load_view(&source, resolved).await else {
            panic!("expected a category view");
        };
        assert_eq!(view.posts.len(), 5);

        let resolved = resolve(&source, "electric", ResolveOptions::default()).await;
        let View::Tag(view) = load_view(&source, resolved).await else {
            panic!("expected a tag view");
        };
        assert_eq!(view.posts[0].id, 4);

        let resolved = resolve(&source, "ana", ResolveOptions::default()).await;
        let View::Author(view) = load_view(&source, resolved).await else {
            panic!("expected an author view");
        };
        assert_eq!(view.posts.len(), 3);
    }

    #[tokio::test]
    async fn test_page_without_media() {
        let source = source();
        let resolved = resolve(&source, "about", ResolveOptions::default()).await;
        let View::Page(view) = load_view(&source, resolved).await else {
            panic!("expected a page view");
        };
        assert!(view.media.is_none());
        assert!(!load_view(&source, Resolved::NotFound).await.is_found());
    }

    #[tokio::test]
    async fn test_comment_depth_is_bounded() {
        let comments: Vec<serde_json::Value> = (1..=15u64)
            .map(|id| json!({ "id": id, "post": 1, "parent": id - 1 }))
            .collect();
        let fixture: Fixture = serde_json::from_value(json!({
            "posts": [{ "id": 1, "slug": "deep" }],
            "comments": comments
        }))
        .unwrap();
        let source = InMemorySource::new(fixture);

        let tree = fetch_comment_tree(&source, 1).await;
        // top level plus MAX_REPLY_DEPTH levels of replies
        assert_eq!(count_comments(&tree), MAX_REPLY_DEPTH + 1);
    }
}

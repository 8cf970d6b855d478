// Clients for the services the site talks to: the CMS REST API and SMTP.

pub mod mail;
pub mod memory;
pub mod menu;
pub mod resolve;
pub mod view;
pub mod wordpress;

pub use mail::{MailSender, OutgoingMail, SmtpMailer};
pub use memory::{Fixture, InMemorySource};
pub use resolve::{ResolveOptions, resolve};
pub use view::{
    AuthorView, PageView, PostView, TermView, View, fetch_comment_tree, load_post_view, load_view,
};
pub use wordpress::WordPressClient;

use async_trait::async_trait;
use press_kit_core::{
    Author, Category, Comment, FeaturedMedia, Menu, NewComment, Page, Post, RatingSubmission,
    Result, Tag,
};

/// Default page size for post listings
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Read and write access to the content backend.
///
/// Reads never fail: lists come back empty and single lookups come back
/// `None` when the backend errors, so a broken section degrades to "empty"
/// or "not found". Writes return `Result` so the reader can be told.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn posts(&self, query: &PostQuery) -> Vec<Post>;
    async fn post_by_slug(&self, slug: &str) -> Option<Post>;
    async fn pages(&self) -> Vec<Page>;
    async fn page_by_slug(&self, slug: &str) -> Option<Page>;

    async fn categories(&self) -> Vec<Category>;
    async fn category_by_id(&self, id: u64) -> Option<Category>;
    async fn category_by_slug(&self, slug: &str) -> Option<Category>;

    async fn tags(&self) -> Vec<Tag>;
    async fn tag_by_slug(&self, slug: &str) -> Option<Tag>;

    async fn authors(&self) -> Vec<Author>;
    async fn author_by_id(&self, id: u64) -> Option<Author>;
    async fn author_by_slug(&self, slug: &str) -> Option<Author>;

    async fn media_by_id(&self, id: u64) -> Option<FeaturedMedia>;

    /// Direct children of `parent` (0 for top level) on a post
    async fn comments(&self, post_id: u64, parent: u64) -> Vec<Comment>;

    async fn menu(&self, location: &str) -> Option<Menu>;

    /// Remote maintenance switch; `false` when it cannot be read
    async fn maintenance_mode(&self) -> bool;

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment>;
    async fn save_rating(&self, rating: &RatingSubmission) -> Result<()>;
}

/// Filters for a post listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub search: Option<String>,
    pub category: Option<u64>,
    pub tag: Option<u64>,
    pub author: Option<u64>,
    pub per_page: u32,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            tag: None,
            author: None,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PostQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            ..Self::default()
        }
    }

    pub fn in_category(id: u64) -> Self {
        Self {
            category: Some(id),
            ..Self::default()
        }
    }

    pub fn tagged(id: u64) -> Self {
        Self {
            tag: Some(id),
            ..Self::default()
        }
    }

    pub fn by_author(id: u64) -> Self {
        Self {
            author: Some(id),
            ..Self::default()
        }
    }

    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    /// Query string pairs for the posts collection endpoint
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("_embed", "true".to_string()),
            ("per_page", self.per_page.to_string()),
        ];
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        if let Some(id) = self.category {
            params.push(("categories", id.to_string()));
        }
        if let Some(id) = self.tag {
            params.push(("tags", id.to_string()));
        }
        if let Some(id) = self.author {
            params.push(("author", id.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_query_params() {
        let params = PostQuery::search("mower").per_page(5).to_params();
        assert_eq!(
            params,
            vec![
                ("_embed", "true".to_string()),
                ("per_page", "5".to_string()),
                ("search", "mower".to_string()),
            ]
        );
    }

    #[test]
    fn test_post_query_filters() {
        let params = PostQuery::in_category(3).to_params();
        assert!(params.contains(&("categories", "3".to_string())));
        assert!(params.contains(&("per_page", "100".to_string())));

        let params = PostQuery::by_author(2).to_params();
        assert!(params.contains(&("author", "2".to_string())));

        let params = PostQuery::tagged(9).to_params();
        assert!(params.contains(&("tags", "9".to_string())));
    }
}

use crate::menu::clean_menu;
use crate::{ContentSource, PostQuery};
use async_trait::async_trait;
use chrono::Utc;
use press_kit_core::comments::{build_thread, find_comment, insert_comment};
use press_kit_core::text::{html_escape, plain_text};
use press_kit_core::{
    Author, Category, Comment, Error, FeaturedMedia, Menu, NewComment, Page, Post,
    RatingSubmission, RawMenuItem, Rendered, Result, Tag,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};
use tracing::info;

/// Content dump in the API's own record shapes, used for local preview
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Fixture {
    pub posts: Vec<Post>,
    pub pages: Vec<Page>,
    pub categories: Vec<Category>,
    pub tags: Vec<Tag>,
    pub authors: Vec<Author>,
    pub media: Vec<FeaturedMedia>,
    /// Flat list; threads are rebuilt from `parent`
    pub comments: Vec<Comment>,
    /// Raw menu items keyed by location
    pub menus: BTreeMap<String, Vec<RawMenuItem>>,
    pub maintenance_mode: bool,
}

impl Fixture {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// `ContentSource` backed by a fixture held in memory.
///
/// Comments posted against it are kept in its thread for the lifetime of
/// the process; ratings are recorded and can be inspected.
pub struct InMemorySource {
    fixture: Fixture,
    threads: RwLock<HashMap<u64, Vec<Comment>>>,
    ratings: Mutex<Vec<RatingSubmission>>,
    next_comment_id: AtomicU64,
    requests: AtomicUsize,
}

impl InMemorySource {
    pub fn new(fixture: Fixture) -> Self {
        let mut by_post: HashMap<u64, Vec<Comment>> = HashMap::new();
        for comment in &fixture.comments {
            by_post.entry(comment.post).or_default().push(comment.clone());
        }
        let threads = by_post
            .into_iter()
            .map(|(post, flat)| (post, build_thread(&flat)))
            .collect();
        let next_id = fixture.comments.iter().map(|c| c.id).max().unwrap_or(0) + 1;

        info!(
            posts = fixture.posts.len(),
            pages = fixture.pages.len(),
            categories = fixture.categories.len(),
            authors = fixture.authors.len(),
            "Loaded content fixture"
        );

        Self {
            fixture,
            threads: RwLock::new(threads),
            ratings: Mutex::new(Vec::new()),
            next_comment_id: AtomicU64::new(next_id),
            requests: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn ratings(&self) -> Vec<RatingSubmission> {
        self.ratings
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn hit(&self) {
        self.requests.fetch_add(1, Ordering::SeqCst);
    }

    fn matches(post: &Post, query: &PostQuery) -> bool {
        if let Some(id) = query.category
            && !post.categories.contains(&id)
        {
            return false;
        }
        if let Some(id) = query.tag
            && !post.tags.contains(&id)
        {
            return false;
        }
        if let Some(id) = query.author
            && post.author != id
        {
            return false;
        }
        if let Some(term) = &query.search {
            let term = term.to_lowercase();
            let haystack = format!(
                "{} {}",
                plain_text(&post.title.rendered),
                plain_text(&post.content.rendered)
            )
            .to_lowercase();
            if !haystack.contains(&term) {
                return false;
            }
        }
        true
    }
}

#[async_trait]
impl ContentSource for InMemorySource {
    async fn posts(&self, query: &PostQuery) -> Vec<Post> {
        self.hit();
        self.fixture
            .posts
            .iter()
            .filter(|p| Self::matches(p, query))
            .take(query.per_page as usize)
            .cloned()
            .collect()
    }

    async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        self.hit();
        self.fixture.posts.iter().find(|p| p.slug == slug).cloned()
    }

    async fn pages(&self) -> Vec<Page> {
        self.hit();
        self.fixture.pages.clone()
    }

    async fn page_by_slug(&self, slug: &str) -> Option<Page> {
        self.hit();
        self.fixture.pages.iter().find(|p| p.slug == slug).cloned()
    }

    async fn categories(&self) -> Vec<Category> {
        self.hit();
        self.fixture.categories.clone()
    }

    async fn category_by_id(&self, id: u64) -> Option<Category> {
        self.hit();
        self.fixture.categories.iter().find(|c| c.id == id).cloned()
    }

    async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.hit();
        self.fixture
            .categories
            .iter()
            .find(|c| c.slug == slug)
            .cloned()
    }

    async fn tags(&self) -> Vec<Tag> {
        self.hit();
        self.fixture.tags.clone()
    }

    async fn tag_by_slug(&self, slug: &str) -> Option<Tag> {
        self.hit();
        self.fixture.tags.iter().find(|t| t.slug == slug).cloned()
    }

    async fn authors(&self) -> Vec<Author> {
        self.hit();
        self.fixture.authors.clone()
    }

    async fn author_by_id(&self, id: u64) -> Option<Author> {
        self.hit();
        self.fixture.authors.iter().find(|a| a.id == id).cloned()
    }

    async fn author_by_slug(&self, slug: &str) -> Option<Author> {
        self.hit();
        self.fixture.authors.iter().find(|a| a.slug == slug).cloned()
    }

    async fn media_by_id(&self, id: u64) -> Option<FeaturedMedia> {
        self.hit();
        self.fixture.media.iter().find(|m| m.id == id).cloned()
    }

    async fn comments(&self, post_id: u64, parent: u64) -> Vec<Comment> {
        self.hit();
        let Ok(threads) = self.threads.read() else {
            return Vec::new();
        };
        let Some(thread) = threads.get(&post_id) else {
            return Vec::new();
        };
        let children = if parent == 0 {
            thread.clone()
        } else {
            find_comment(thread, parent)
                .map(|c| c.replies.clone())
                .unwrap_or_default()
        };
        // the API returns one level at a time
        children
            .into_iter()
            .map(|mut c| {
                c.replies.clear();
                c
            })
            .collect()
    }

    async fn menu(&self, location: &str) -> Option<Menu> {
        self.hit();
        self.fixture
            .menus
            .get(location)
            .map(|items| clean_menu(items.clone(), ""))
    }

    async fn maintenance_mode(&self) -> bool {
        self.fixture.maintenance_mode
    }

    async fn create_comment(&self, new_comment: &NewComment) -> Result<Comment> {
        self.hit();
        if !self.fixture.posts.iter().any(|p| p.id == new_comment.post) {
            return Err(Error::Rejected(format!(
                "No post with id {} to comment on",
                new_comment.post
            )));
        }

        let comment = Comment {
            id: self.next_comment_id.fetch_add(1, Ordering::SeqCst),
            post: new_comment.post,
            parent: new_comment.parent,
            author_name: new_comment.author_name.clone(),
            author_email: None,
            // the live CMS filters comment markup; here it is escaped outright
            content: Rendered::new(format!("<p>{}</p>", html_escape(&new_comment.content))),
            date: Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string(),
            ..Default::default()
        };

        let mut threads = self
            .threads
            .write()
            .map_err(|_| Error::Rejected("Comment store unavailable".to_string()))?;
        let thread = threads.entry(new_comment.post).or_default();
        let updated = insert_comment(thread, comment.clone())
            .ok_or_else(|| Error::Rejected("Invalid parent comment ID.".to_string()))?;
        *thread = updated;
        Ok(comment)
    }

    async fn save_rating(&self, rating: &RatingSubmission) -> Result<()> {
        self.hit();
        self.ratings
            .lock()
            .map_err(|_| Error::Rejected("Rating store unavailable".to_string()))?
            .push(rating.clone());
        Ok(())
    }
}

use crate::menu::clean_menu;
use crate::{ContentSource, PostQuery};
use async_trait::async_trait;
use moka::future::Cache;
use press_kit_core::config::WordPressSettings;
use press_kit_core::{
    Author, Category, Comment, Error, FeaturedMedia, MaintenanceStatus, Menu, NewComment, Page,
    Post, RatingSubmission, RawMenuItem, Result, Tag,
};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const MAX_CACHE_ENTRIES: u64 = 2_000;

/// WordPress REST API client.
///
/// Successful GET responses are cached per URL for the configured window;
/// comments, menus and the maintenance flag are always fetched live.
pub struct WordPressClient {
    client: reqwest::Client,
    origin: String,
    rest_base: String,
    rating_endpoint: String,
    maintenance_endpoint: String,
    cache: Cache<String, Arc<Value>>,
}

/// Error body the API sends with 4xx responses
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl WordPressClient {
    pub fn new(settings: &WordPressSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("press-kit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        let cache = Cache::builder()
            .max_capacity(MAX_CACHE_ENTRIES)
            .time_to_live(settings.cache_ttl)
            .build();

        info!(
            rest_base = %settings.rest_base(),
            cache_ttl = ?settings.cache_ttl,
            "Initialized WordPress client"
        );

        Ok(Self {
            client,
            origin: settings.url.clone(),
            rest_base: settings.rest_base(),
            rating_endpoint: settings.rating_endpoint(),
            maintenance_endpoint: settings.maintenance_endpoint(),
            cache,
        })
    }

    /// Full URL for a REST route with query parameters
    fn url(&self, path: &str, params: &[(&str, String)]) -> Result<Url> {
        let base = format!("{}/{}", self.rest_base, path.trim_start_matches('/'));
        Url::parse_with_params(&base, params)
            .map_err(|e| Error::Http(format!("Invalid URL {}: {}", base, e)))
    }

    async fn get_json(&self, url: Url, cached: bool) -> Result<Arc<Value>> {
        let key = url.to_string();
        if cached && let Some(hit) = self.cache.get(&key).await {
            debug!(url = %key, "cache hit");
            return Ok(hit);
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Upstream {
                status: status.as_u16(),
                endpoint: key,
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;
        let value = Arc::new(value);
        if cached {
            self.cache.insert(key, Arc::clone(&value)).await;
        }
        Ok(value)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        cached: bool,
    ) -> Result<T> {
        let url = self.url(path, params)?;
        let value = self.get_json(url, cached).await?;
        Ok(T::deserialize(&*value)?)
    }

    /// Collection endpoint; empty on any failure
    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Vec<T> {
        self.fetch_list_with(path, params, true).await
    }

    async fn fetch_list_with<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        cached: bool,
    ) -> Vec<T> {
        match self.fetch::<Vec<T>>(path, params, cached).await {
            Ok(items) => items,
            Err(e) => {
                error!(path, error = %e, "Failed to fetch from WordPress API");
                Vec::new()
            }
        }
    }

    /// Single-entity endpoint; `None` on any failure
    async fn fetch_one<T: DeserializeOwned>(&self, path: &str) -> Option<T> {
        match self.fetch::<T>(path, &[], true).await {
            Ok(item) => Some(item),
            Err(e) => {
                error!(path, error = %e, "Failed to fetch from WordPress API");
                None
            }
        }
    }

    /// Slug lookup on a collection; first match or `None`
    async fn fetch_by_slug<T: DeserializeOwned>(
        &self,
        path: &str,
        slug: &str,
        extra: &[(&str, String)],
    ) -> Option<T> {
        let mut params = vec![("slug", slug.to_string())];
        params.extend(extra.iter().cloned());
        self.fetch_list::<T>(path, &params).await.into_iter().next()
    }

    async fn post_json<B: serde::Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // surface the API's own message when it sends one
        let message = response
            .json::<ApiErrorBody>()
            .await
            .map(|b| b.message)
            .unwrap_or_default();
        if status.is_client_error() && !message.is_empty() {
            return Err(Error::Rejected(message));
        }
        Err(Error::Upstream {
            status: status.as_u16(),
            endpoint: url.to_string(),
        })
    }
}

#[async_trait]
impl ContentSource for WordPressClient {
    async fn posts(&self, query: &PostQuery) -> Vec<Post> {
        self.fetch_list("posts", &query.to_params()).await
    }

    async fn post_by_slug(&self, slug: &str) -> Option<Post> {
        self.fetch_by_slug("posts", slug, &[("_embed", "true".to_string())]).await
    }

    async fn pages(&self) -> Vec<Page> {
        self.fetch_list("pages", &[("per_page", "100".to_string())]).await
    }

    async fn page_by_slug(&self, slug: &str) -> Option<Page> {
        self.fetch_by_slug("pages", slug, &[("_embed", "true".to_string())]).await
    }

    async fn categories(&self) -> Vec<Category> {
        self.fetch_list("categories", &[("per_page", "100".to_string())]).await
    }

    async fn category_by_id(&self, id: u64) -> Option<Category> {
        self.fetch_one(&format!("categories/{}", id)).await
    }

    async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.fetch_by_slug("categories", slug, &[]).await
    }

    async fn tags(&self) -> Vec<Tag> {
        self.fetch_list("tags", &[("per_page", "100".to_string())]).await
    }

    async fn tag_by_slug(&self, slug: &str) -> Option<Tag> {
        self.fetch_by_slug("tags", slug, &[]).await
    }

    async fn authors(&self) -> Vec<Author> {
        self.fetch_list("users", &[("per_page", "100".to_string())]).await
    }

    async fn author_by_id(&self, id: u64) -> Option<Author> {
        self.fetch_one(&format!("users/{}", id)).await
    }

    async fn author_by_slug(&self, slug: &str) -> Option<Author> {
        self.fetch_by_slug("users", slug, &[]).await
    }

    async fn media_by_id(&self, id: u64) -> Option<FeaturedMedia> {
        if id == 0 {
            return None;
        }
        self.fetch_one(&format!("media/{}", id)).await
    }

    async fn comments(&self, post_id: u64, parent: u64) -> Vec<Comment> {
        // newest first at the top level, conversation order in replies
        let order = if parent == 0 { "desc" } else { "asc" };
        let params = [
            ("post", post_id.to_string()),
            ("parent", parent.to_string()),
            ("orderby", "date".to_string()),
            ("order", order.to_string()),
        ];
        self.fetch_list_with("comments", &params, false).await
    }

    async fn menu(&self, location: &str) -> Option<Menu> {
        let location = location.trim_matches('/');
        match self.fetch::<Vec<RawMenuItem>>(location, &[], false).await {
            Ok(items) => Some(clean_menu(items, &self.origin)),
            Err(e) => {
                error!(location, error = %e, "Error fetching menu");
                None
            }
        }
    }

    async fn maintenance_mode(&self) -> bool {
        let result = async {
            let response = self
                .client
                .get(&self.maintenance_endpoint)
                .send()
                .await
                .map_err(|e| Error::Http(e.to_string()))?;
            if !response.status().is_success() {
                return Err(Error::Upstream {
                    status: response.status().as_u16(),
                    endpoint: self.maintenance_endpoint.clone(),
                });
            }
            response
                .json::<MaintenanceStatus>()
                .await
                .map_err(|e| Error::Decode(e.to_string()))
        }
        .await;

        match result {
            Ok(status) => status.maintenance_mode,
            Err(e) => {
                warn!(error = %e, "Maintenance check failed");
                false
            }
        }
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<Comment> {
        let url = format!("{}/comments", self.rest_base);
        let response = self.post_json(&url, comment).await?;
        let created: Comment = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;
        info!(post = comment.post, parent = comment.parent, id = created.id, "comment created");
        Ok(created)
    }

    async fn save_rating(&self, rating: &RatingSubmission) -> Result<()> {
        self.post_json(&self.rating_endpoint, rating).await?;
        info!(post = rating.post_id, rating = rating.rating, "rating saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> WordPressSettings {
        WordPressSettings {
            url: "https://cms.example.com".to_string(),
            cache_ttl: Duration::from_secs(60),
            menu_location: "main-menu".to_string(),
            resolve_tags: true,
        }
    }

    #[test]
    fn test_url_building() {
        let client = WordPressClient::new(&settings()).unwrap();
        let url = client
            .url("posts", &PostQuery::search("robot mower").per_page(10).to_params())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://cms.example.com/wp-json/wp/v2/posts?_embed=true&per_page=10&search=robot+mower"
        );

        let url = client.url("/users/2", &[]).unwrap();
        assert_eq!(url.as_str(), "https://cms.example.com/wp-json/wp/v2/users/2");
    }

    #[test]
    fn test_endpoints_follow_origin() {
        let client = WordPressClient::new(&settings()).unwrap();
        assert_eq!(
            client.rating_endpoint,
            "https://cms.example.com/wp-json/custom/v1/save-rating"
        );
        assert_eq!(
            client.maintenance_endpoint,
            "https://cms.example.com/wp-json/myplugin/v1/maintenance-mode"
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_degrades() {
        // nothing listens on port 9 of localhost
        let client = WordPressClient::new(&WordPressSettings {
            url: "http://127.0.0.1:9".to_string(),
            ..settings()
        })
        .unwrap();

        assert!(client.post_by_slug("anything").await.is_none());
        assert!(client.posts(&PostQuery::default()).await.is_empty());
        assert!(client.media_by_id(4).await.is_none());
        assert!(client.menu("main-menu").await.is_none());
        assert!(!client.maintenance_mode().await);
        assert!(
            client
                .save_rating(&RatingSubmission {
                    post_id: 1,
                    rating: 5,
                    review_text: "great".to_string(),
                })
                .await
                .is_err()
        );
    }
}

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A `{ "rendered": "..." }` markup field as returned by the content API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

impl Rendered {
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
        }
    }
}

/// SEO overrides attached by the CMS SEO plugin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoHead {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Blog post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub author: u64,
    #[serde(default)]
    pub categories: Vec<u64>,
    #[serde(default)]
    pub tags: Vec<u64>,
    /// 0 means no featured media
    #[serde(default)]
    pub featured_media: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoast_head_json: Option<SeoHead>,
    /// Free-form post meta. The API sends `[]` when empty, so it stays untyped.
    #[serde(default)]
    pub meta: Value,
    #[serde(default, rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
}

impl Post {
    /// Average rating stored in post meta, if any
    pub fn rating(&self) -> Option<Rating> {
        let average = lenient_number(self.meta.get("_article_rating")?)?;
        if average <= 0.0 {
            return None;
        }
        let count = self
            .meta
            .get("_article_rating_count")
            .and_then(lenient_number)
            .map(|c| c as u64)
            .unwrap_or(0);
        Some(Rating { average, count })
    }

    pub fn embedded_author(&self) -> Option<&EmbeddedAuthor> {
        self.embedded.as_ref()?.author.first()
    }

    pub fn embedded_media(&self) -> Option<&FeaturedMedia> {
        self.embedded.as_ref()?.featured_media.first()
    }

    /// Embedded terms of every taxonomy, flattened
    pub fn embedded_terms(&self) -> impl Iterator<Item = &Term> {
        self.embedded
            .iter()
            .flat_map(|e| e.terms.iter())
            .flat_map(|group| group.iter())
    }
}

/// Aggregate rating read from post meta
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub average: f64,
    pub count: u64,
}

/// Related records inlined by `_embed=true`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Embedded {
    #[serde(default, deserialize_with = "skip_invalid")]
    pub author: Vec<EmbeddedAuthor>,
    /// Deleted or private media embeds as an error object; those are dropped
    #[serde(default, rename = "wp:featuredmedia", deserialize_with = "skip_invalid")]
    pub featured_media: Vec<FeaturedMedia>,
    #[serde(default, rename = "wp:term", deserialize_with = "skip_invalid_groups")]
    pub terms: Vec<Vec<Term>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedAuthor {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

/// Static page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub featured_media: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoast_head_json: Option<SeoHead>,
    #[serde(default, rename = "_embedded", skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Embedded>,
}

impl Page {
    pub fn embedded_media(&self) -> Option<&FeaturedMedia> {
        self.embedded.as_ref()?.featured_media.first()
    }
}

/// Taxonomy term (category or tag)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub taxonomy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yoast_head_json: Option<SeoHead>,
}

pub type Category = Term;
pub type Tag = Term;

/// Post author (a CMS user)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub id: u64,
    pub slug: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    /// Avatar URLs keyed by pixel size ("24", "48", "96")
    #[serde(default)]
    pub avatar_urls: BTreeMap<String, String>,
    #[serde(default)]
    pub social_links: Vec<String>,
}

impl Author {
    /// Avatar at `size` pixels, or the last one listed when that size is missing
    pub fn avatar(&self, size: u32) -> Option<&str> {
        let key = size.to_string();
        self.avatar_urls
            .get(&key)
            .or_else(|| self.avatar_urls.values().next_back())
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturedMedia {
    pub id: u64,
    #[serde(default)]
    pub source_url: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub media_details: MediaDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaDetails {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

/// Reader comment; `replies` is assembled locally, never sent by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub post: u64,
    /// 0 for top-level comments
    #[serde(default)]
    pub parent: u64,
    #[serde(default)]
    pub author_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_email: Option<String>,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub author_avatar_urls: BTreeMap<String, String>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

/// Comment body sent to the API when a reader posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub post: u64,
    pub parent: u64,
    pub author_name: String,
    pub author_email: String,
    pub content: String,
}

/// Rating body forwarded to the rating endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSubmission {
    pub post_id: u64,
    pub rating: u8,
    pub review_text: String,
}

/// Navigation menu
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    pub uri: String,
    pub parent_id: Option<String>,
    pub icon: Option<String>,
    pub icon_image: Option<String>,
    pub children: Vec<MenuItem>,
}

/// Menu item exactly as the menu endpoint sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMenuItem {
    #[serde(default, alias = "ID")]
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub menu_item_parent: Value,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_image: Option<String>,
    #[serde(default)]
    pub children: Vec<RawMenuItem>,
}

/// Maintenance flag endpoint body
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MaintenanceStatus {
    #[serde(default, deserialize_with = "lenient_bool")]
    pub maintenance_mode: bool,
}

/// Outcome of looking a slug up across entity types
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Post(Box<Post>),
    Page(Box<Page>),
    Category(Category),
    Tag(Tag),
    Author(Author),
    NotFound,
}

impl Resolved {
    pub fn kind(&self) -> &'static str {
        match self {
            Resolved::Post(_) => "post",
            Resolved::Page(_) => "page",
            Resolved::Category(_) => "category",
            Resolved::Tag(_) => "tag",
            Resolved::Author(_) => "author",
            Resolved::NotFound => "not-found",
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Resolved::NotFound)
    }
}

/// Numbers in post meta arrive as JSON numbers or numeric strings
pub fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Keep the elements of a list that decode as `T`, drop the rest
fn skip_invalid<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(values
        .into_iter()
        .filter_map(|value| T::deserialize(value).ok())
        .collect())
}

fn skip_invalid_groups<'de, D, T>(deserializer: D) -> Result<Vec<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let groups = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(groups
        .into_iter()
        .map(|group| match group {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|value| T::deserialize(value).ok())
                .collect(),
            _ => Vec::new(),
        })
        .collect())
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_i64().is_some_and(|n| n != 0),
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "on" | "yes"),
        _ => false,
    })
}

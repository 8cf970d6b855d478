//! Title, description and social preview fields for every page.

use press_kit_client::View;
use press_kit_core::config::SiteSettings;
use press_kit_core::text::{decode_html_entities, plain_text, truncate_words};
use press_kit_core::{Post, SeoHead};
use serde::Serialize;

/// Descriptions longer than this are cut at a word boundary
const DESCRIPTION_WORDS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OgType {
    Website,
    Article,
    Profile,
}

impl OgType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OgType::Website => "website",
            OgType::Article => "article",
            OgType::Profile => "profile",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TwitterCard {
    Summary,
    SummaryLargeImage,
}

impl TwitterCard {
    pub fn as_str(&self) -> &'static str {
        match self {
            TwitterCard::Summary => "summary",
            TwitterCard::SummaryLargeImage => "summary_large_image",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub canonical: String,
    pub og_type: OgType,
    pub site_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    pub twitter_card: TwitterCard,
    /// `false` renders `noindex, nofollow`
    pub index: bool,
}

impl PageMeta {
    /// Website-type meta for a site path; an empty description takes the
    /// site default
    fn new(site: &SiteSettings, title: String, description: String, path: &str) -> Self {
        let description = if description.trim().is_empty() {
            site.description.clone()
        } else {
            description
        };
        Self {
            title,
            description,
            canonical: site.canonical(path.trim_start_matches('/')),
            og_type: OgType::Website,
            site_name: site.name.clone(),
            image: None,
            published_time: None,
            modified_time: None,
            authors: Vec::new(),
            twitter_card: TwitterCard::Summary,
            index: true,
        }
    }

    pub fn home(site: &SiteSettings) -> Self {
        let mut meta = Self::new(site, site.name.clone(), site.description.clone(), "");
        meta.twitter_card = TwitterCard::SummaryLargeImage;
        meta
    }

    /// Index pages such as `/posts/categories`
    pub fn listing(site: &SiteSettings, title: &str, description: &str, path: &str) -> Self {
        Self::new(site, title.to_string(), description.to_string(), path)
    }

    pub fn search(site: &SiteSettings, query: &str) -> Self {
        let query = query.trim();
        let (title, description) = if query.is_empty() {
            ("Search".to_string(), format!("Search {}", site.name))
        } else {
            (
                format!("Search results for \u{201c}{}\u{201d}", query),
                format!("Articles matching \u{201c}{}\u{201d} on {}", query, site.name),
            )
        };
        let mut meta = Self::new(site, title, description, "search");
        // result pages are thin, keep them out of the index
        meta.index = query.is_empty();
        meta
    }

    pub fn contact(site: &SiteSettings) -> Self {
        Self::new(
            site,
            "Contact".to_string(),
            format!("Get in touch with the {} team", site.name),
            "contact",
        )
    }

    pub fn not_found(site: &SiteSettings) -> Self {
        let mut meta = Self::new(
            site,
            "Not Found".to_string(),
            "The page you are looking for does not exist.".to_string(),
            "",
        );
        meta.index = false;
        meta
    }

    pub fn maintenance(site: &SiteSettings) -> Self {
        let mut meta = Self::new(
            site,
            "Down for maintenance".to_string(),
            format!("{} is undergoing scheduled maintenance.", site.name),
            "",
        );
        meta.index = false;
        meta
    }

    /// Text for the `<title>` element
    pub fn document_title(&self) -> String {
        if self.title == self.site_name {
            self.title.clone()
        } else {
            format!("{} | {}", self.title, self.site_name)
        }
    }
}

/// Meta for a resolved slug page
pub fn build_meta(site: &SiteSettings, view: &View) -> PageMeta {
    match view {
        View::Post(v) => {
            let post = &v.post;
            let mut meta = PageMeta::new(
                site,
                seo_title(post.yoast_head_json.as_ref(), &post.title.rendered),
                seo_description(post.yoast_head_json.as_ref(), &post.excerpt.rendered),
                &post.slug,
            );
            meta.og_type = OgType::Article;
            meta.twitter_card = TwitterCard::SummaryLargeImage;
            meta.image = v.media.as_ref().map(|m| m.source_url.clone());
            meta.published_time = non_empty(&post.date);
            meta.modified_time = non_empty(&post.modified);
            meta.authors = author_names(v.author.as_ref().map(|a| a.name.as_str()), post);
            meta
        }
        View::Page(v) => {
            let page = &v.page;
            let mut meta = PageMeta::new(
                site,
                seo_title(page.yoast_head_json.as_ref(), &page.title.rendered),
                seo_description(page.yoast_head_json.as_ref(), &page.excerpt.rendered),
                &page.slug,
            );
            meta.image = v.media.as_ref().map(|m| m.source_url.clone());
            meta
        }
        View::Category(v) => {
            let name = decode_html_entities(&v.term.name);
            let description = format!("Posts in category {}", name);
            PageMeta::new(site, name, description, &v.term.slug)
        }
        View::Tag(v) => {
            let name = decode_html_entities(&v.term.name);
            let description = format!("Posts tagged {}", name);
            PageMeta::new(site, name, description, &v.term.slug)
        }
        View::Author(v) => {
            let name = decode_html_entities(&v.author.name);
            let description = format!("Posts by {}", name);
            let mut meta = PageMeta::new(site, name, description, &v.author.slug);
            meta.og_type = OgType::Profile;
            meta.image = v.author.avatar(96).map(str::to_string);
            meta
        }
        View::NotFound => PageMeta::not_found(site),
    }
}

fn seo_title(seo: Option<&SeoHead>, rendered: &str) -> String {
    seo.and_then(|s| s.title.as_deref())
        .map(plain_text)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| plain_text(rendered))
}

fn seo_description(seo: Option<&SeoHead>, excerpt: &str) -> String {
    let description = seo
        .and_then(|s| s.description.as_deref())
        .map(plain_text)
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| plain_text(excerpt));
    truncate_words(&description, DESCRIPTION_WORDS)
}

fn author_names(fetched: Option<&str>, post: &Post) -> Vec<String> {
    fetched
        .or_else(|| post.embedded_author().map(|a| a.name.as_str()))
        .filter(|n| !n.is_empty())
        .map(|n| vec![decode_html_entities(n)])
        .unwrap_or_default()
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

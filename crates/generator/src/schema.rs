//! schema.org JSON-LD for each kind of page.

use press_kit_client::View;
use press_kit_core::config::SiteSettings;
use press_kit_core::text::{decode_html_entities, plain_text, word_count};
use press_kit_core::{Author, FeaturedMedia, Page, Post, Term};
use serde_json::{Value, json};
use url::Url;

const FALLBACK_URL: &str = "https://example.com";

/// Normalise a site origin: no trailing slash, `https://` when no scheme
/// is given, `https://example.com` when it still does not parse.
pub fn ensure_valid_url(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return FALLBACK_URL.to_string();
    }
    // compare on the scheme alone; trimming can leave a bare "http:"
    let candidate = if trimmed.starts_with("http:") || trimmed.starts_with("https:") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };
    match Url::parse(&candidate) {
        Ok(parsed) if parsed.host_str().is_some() => candidate,
        _ => FALLBACK_URL.to_string(),
    }
}

/// SEO plugin text as plain text, `None` when absent or blank
fn seo_text(field: Option<&str>) -> Option<String> {
    field.map(plain_text).filter(|t| !t.is_empty())
}

/// JSON-LD blocks for a resolved slug page
pub fn schema_for(site: &SiteSettings, view: &View) -> Vec<Value> {
    match view {
        View::Post(v) => {
            let author = v.author.as_ref().map(|a| a.name.as_str());
            let mut trail = vec![("Home".to_string(), "/".to_string())];
            if let Some(category) = &v.category {
                trail.push((decode_html_entities(&category.name), format!("/{}", category.slug)));
            }
            trail.push((plain_text(&v.post.title.rendered), format!("/{}", v.post.slug)));
            vec![
                article(site, &v.post, v.media.as_ref(), author),
                breadcrumbs(site, &trail),
            ]
        }
        View::Page(v) => vec![web_page(site, &v.page)],
        View::Category(v) | View::Tag(v) => vec![collection_page(site, &v.term, &v.posts)],
        View::Author(v) => vec![person(site, &v.author)],
        View::NotFound => Vec::new(),
    }
}

pub fn article(
    site: &SiteSettings,
    post: &Post,
    media: Option<&FeaturedMedia>,
    author_name: Option<&str>,
) -> Value {
    let site_url = ensure_valid_url(&site.url);
    let seo = post.yoast_head_json.as_ref();

    let headline = seo
        .and_then(|s| seo_text(s.title.as_deref()))
        .unwrap_or_else(|| plain_text(&post.title.rendered));
    let description = seo
        .and_then(|s| seo_text(s.description.as_deref()))
        .unwrap_or_else(|| plain_text(&post.excerpt.rendered));
    let image = media
        .or_else(|| post.embedded_media())
        .map(|m| m.source_url.clone())
        .unwrap_or_default();
    let author = author_name
        .or_else(|| post.embedded_author().map(|a| a.name.as_str()))
        .filter(|n| !n.is_empty())
        .unwrap_or("Unknown Author");
    let modified = if post.modified.is_empty() {
        &post.date
    } else {
        &post.modified
    };

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "Article",
        "headline": headline,
        "description": description,
        "image": image,
        "datePublished": post.date,
        "dateModified": modified,
        "author": {
            "@type": "Person",
            "name": author,
        },
        "publisher": publisher(site, &site_url),
        "mainEntityOfPage": {
            "@type": "WebPage",
            "@id": format!("{}/{}", site_url, post.slug),
        },
        "wordCount": word_count(&post.content.rendered),
        "inLanguage": site.language,
    });

    if let Some(rating) = post.rating() {
        schema["review"] = json!({
            "@type": "AggregateRating",
            "ratingValue": rating.average,
            "bestRating": "5",
            "ratingCount": rating.count,
        });
    }
    schema
}

/// Category and tag archives
pub fn collection_page(site: &SiteSettings, term: &Term, posts: &[Post]) -> Value {
    let site_url = ensure_valid_url(&site.url);
    let seo = term.yoast_head_json.as_ref();
    let name = seo
        .and_then(|s| seo_text(s.title.as_deref()))
        .unwrap_or_else(|| decode_html_entities(&term.name));
    let description = seo
        .and_then(|s| seo_text(s.description.as_deref()))
        .unwrap_or_else(|| plain_text(&term.description));

    let items: Vec<Value> = posts
        .iter()
        .enumerate()
        .map(|(i, post)| {
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "url": format!("{}/{}", site_url, post.slug),
                "name": plain_text(&post.title.rendered),
            })
        })
        .collect();
    let count = if term.count > 0 {
        term.count
    } else {
        posts.len() as u64
    };

    json!({
        "@context": "https://schema.org",
        "@type": "CollectionPage",
        "name": name,
        "description": description,
        "url": format!("{}/{}", site_url, term.slug),
        "mainEntity": {
            "@type": "ItemList",
            "itemListElement": items,
            "numberOfItems": count,
        },
        "publisher": publisher(site, &site_url),
        "inLanguage": site.language,
    })
}

pub fn person(site: &SiteSettings, author: &Author) -> Value {
    let site_url = ensure_valid_url(&site.url);
    json!({
        "@context": "https://schema.org",
        "@type": "Person",
        "name": decode_html_entities(&author.name),
        "description": plain_text(&author.description),
        "url": format!("{}/{}", site_url, author.slug),
        "image": author.avatar(96),
        "sameAs": author.social_links,
        "worksFor": {
            "@type": "Organization",
            "name": site.name,
        },
    })
}

/// Home and search pages
pub fn website(site: &SiteSettings) -> Value {
    let site_url = ensure_valid_url(&site.url);
    json!({
        "@context": "https://schema.org",
        "@type": "WebSite",
        "name": site.name,
        "description": site.description,
        "url": site_url,
        "potentialAction": {
            "@type": "SearchAction",
            "target": format!("{}/search?q={{search_term_string}}", site_url),
            "query-input": "required name=search_term_string",
        },
    })
}

pub fn web_page(site: &SiteSettings, page: &Page) -> Value {
    let site_url = ensure_valid_url(&site.url);
    let seo = page.yoast_head_json.as_ref();
    json!({
        "@context": "https://schema.org",
        "@type": "WebPage",
        "name": seo
            .and_then(|s| seo_text(s.title.as_deref()))
            .unwrap_or_else(|| plain_text(&page.title.rendered)),
        "description": seo
            .and_then(|s| seo_text(s.description.as_deref()))
            .unwrap_or_else(|| plain_text(&page.excerpt.rendered)),
        "url": format!("{}/{}", site_url, page.slug),
        "publisher": {
            "@type": "Organization",
            "name": site.name,
        },
    })
}

/// `items` are `(name, url)`; site-relative urls are made absolute
pub fn breadcrumbs(site: &SiteSettings, items: &[(String, String)]) -> Value {
    let site_url = ensure_valid_url(&site.url);
    let elements: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(i, (name, url))| {
            let item = if url.starts_with("http") {
                ensure_valid_url(url)
            } else {
                format!("{}{}", site_url, url)
            };
            json!({
                "@type": "ListItem",
                "position": i + 1,
                "name": name,
                "item": item,
            })
        })
        .collect();

    json!({
        "@context": "https://schema.org",
        "@type": "BreadcrumbList",
        "itemListElement": elements,
    })
}

fn publisher(site: &SiteSettings, site_url: &str) -> Value {
    let logo = if site.logo.starts_with("http") {
        site.logo.clone()
    } else {
        format!("{}/{}", site_url, site.logo.trim_start_matches('/'))
    };
    json!({
        "@type": "Organization",
        "name": site.name,
        "logo": {
            "@type": "ImageObject",
            "url": logo,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::{Config, Rendered, SeoHead};
    use serde_json::json;

    fn site() -> SiteSettings {
        SiteSettings {
            url: "https://mowers.example".to_string(),
            ..Config::default().site
        }
    }

    #[test]
    fn test_ensure_valid_url() {
        assert_eq!(ensure_valid_url("https://mowers.example///"), "https://mowers.example");
        assert_eq!(ensure_valid_url("mowers.example"), "https://mowers.example");
        assert_eq!(ensure_valid_url(""), "https://example.com");
        assert_eq!(ensure_valid_url("http://"), "https://example.com");
        assert_eq!(ensure_valid_url("https:///"), "https://example.com");
        assert_eq!(ensure_valid_url("httpbin.org"), "https://httpbin.org");
        assert_eq!(ensure_valid_url("not a url"), "https://example.com");
    }

    #[test]
    fn test_article_headline_and_date() {
        let post = Post {
            slug: "my-post".to_string(),
            title: Rendered::new("My Post"),
            date: "2024-05-01T10:00:00".to_string(),
            content: Rendered::new("<p>one two three</p>"),
            ..Default::default()
        };
        let schema = article(&site(), &post, None, Some("Jim"));

        assert_eq!(schema["@type"], "Article");
        assert_eq!(schema["headline"], "My Post");
        assert_eq!(schema["datePublished"], "2024-05-01T10:00:00");
        assert_eq!(schema["dateModified"], "2024-05-01T10:00:00");
        assert_eq!(schema["author"]["name"], "Jim");
        assert_eq!(schema["mainEntityOfPage"]["@id"], "https://mowers.example/my-post");
        assert_eq!(schema["publisher"]["logo"]["url"], "https://mowers.example/static/logo.svg");
        assert_eq!(schema["wordCount"], 3);
        assert!(schema.get("review").is_none());
    }

    #[test]
    fn test_seo_fields_are_plain_text() {
        let post = Post {
            slug: "my-post".to_string(),
            title: Rendered::new("My Post"),
            yoast_head_json: Some(SeoHead {
                title: Some("Mowers &amp; Trimmers".to_string()),
                description: Some("<p>Best &#8217;24 picks</p>".to_string()),
            }),
            ..Default::default()
        };
        let schema = article(&site(), &post, None, None);
        assert_eq!(schema["headline"], "Mowers & Trimmers");
        assert_eq!(schema["description"], "Best \u{2019}24 picks");

        let blank = Post {
            yoast_head_json: Some(SeoHead {
                title: Some("  ".to_string()),
                description: None,
            }),
            ..post
        };
        assert_eq!(article(&site(), &blank, None, None)["headline"], "My Post");
    }

    #[test]
    fn test_article_includes_rating() {
        let post = Post {
            slug: "rated".to_string(),
            meta: json!({ "_article_rating": "4.5", "_article_rating_count": "8" }),
            ..Default::default()
        };
        let schema = article(&site(), &post, None, None);
        assert_eq!(schema["review"]["@type"], "AggregateRating");
        assert_eq!(schema["review"]["ratingValue"], 4.5);
        assert_eq!(schema["review"]["ratingCount"], 8);
        assert_eq!(schema["author"]["name"], "Unknown Author");
    }

    #[test]
    fn test_collection_page_lists_posts() {
        let term = Term {
            slug: "guides".to_string(),
            name: "Guides".to_string(),
            ..Default::default()
        };
        let posts = vec![Post {
            slug: "a".to_string(),
            ..Default::default()
        }];
        let schema = collection_page(&site(), &term, &posts);
        assert_eq!(schema["@type"], "CollectionPage");
        assert_eq!(schema["url"], "https://mowers.example/guides");
        assert_eq!(schema["mainEntity"]["numberOfItems"], 1);
        assert_eq!(
            schema["mainEntity"]["itemListElement"][0]["url"],
            "https://mowers.example/a"
        );
    }

    #[test]
    fn test_person_and_website() {
        let mut author = Author {
            slug: "jim".to_string(),
            name: "Jim".to_string(),
            social_links: vec!["https://x.com/jim".to_string()],
            ..Default::default()
        };
        author
            .avatar_urls
            .insert("96".to_string(), "https://a/96.png".to_string());
        let schema = person(&site(), &author);
        assert_eq!(schema["image"], "https://a/96.png");
        assert_eq!(schema["sameAs"][0], "https://x.com/jim");

        let schema = website(&site());
        assert_eq!(
            schema["potentialAction"]["target"],
            "https://mowers.example/search?q={search_term_string}"
        );
    }

    #[test]
    fn test_breadcrumbs_absolute_urls() {
        let schema = breadcrumbs(
            &site(),
            &[
                ("Home".to_string(), "/".to_string()),
                ("Docs".to_string(), "https://docs.example/".to_string()),
            ],
        );
        let items = &schema["itemListElement"];
        assert_eq!(items[0]["item"], "https://mowers.example/");
        assert_eq!(items[0]["position"], 1);
        assert_eq!(items[1]["item"], "https://docs.example");
    }
}

//! HTML for every page, built with `format!` templates.
//!
//! Plain-text fields go through `html_escape`; CMS-rendered markup
//! (`content.rendered`) is inserted as is.

mod assets;
pub mod comments;
pub mod listing;
pub mod pages;
pub mod post;

pub use comments::{comment_html, comment_thread};
pub use listing::{author_index, author_profile, category_index, tag_index, term_listing};
pub use pages::{
    contact_page, home_page, maintenance_page, not_found_page, page_article, search_results,
};
pub use post::{post_article, post_card};

use crate::html::{html_escape, json_ld_script};
use crate::meta::PageMeta;
use chrono::{Datelike, Utc};
use press_kit_core::config::SiteSettings;
use press_kit_core::{Menu, MenuItem};
use serde_json::Value;

/// Complete HTML document around a page body
pub fn document(
    site: &SiteSettings,
    meta: &PageMeta,
    menu: Option<&Menu>,
    schema: &[Value],
    body: &str,
) -> String {
    let scripts: String = schema.iter().map(json_ld_script).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
{head}
    <link rel="icon" href="/static/favicon.ico">
    <style>{css}</style>
    {scripts}
</head>
<body>
{header}
    <main class="container">
{body}
    </main>
{footer}
    <script>{js}</script>
</body>
</html>"#,
        lang = html_escape(&site.language),
        head = head_tags(meta),
        css = assets::SITE_CSS,
        scripts = scripts,
        header = site_header(site, menu),
        body = body,
        footer = site_footer(site),
        js = assets::SITE_JS,
    )
}

/// `<title>`, description, canonical, robots, Open Graph and Twitter tags
pub fn head_tags(meta: &PageMeta) -> String {
    let title = html_escape(&meta.document_title());
    let description = html_escape(&meta.description);
    let canonical = html_escape(&meta.canonical);
    let robots = if meta.index {
        "index, follow"
    } else {
        "noindex, nofollow"
    };

    let mut tags = vec![
        format!("    <title>{}</title>", title),
        format!(r#"    <meta name="description" content="{}">"#, description),
        format!(r#"    <link rel="canonical" href="{}">"#, canonical),
        format!(r#"    <meta name="robots" content="{}">"#, robots),
        format!(r#"    <meta property="og:title" content="{}">"#, html_escape(&meta.title)),
        format!(r#"    <meta property="og:description" content="{}">"#, description),
        format!(r#"    <meta property="og:type" content="{}">"#, meta.og_type.as_str()),
        format!(r#"    <meta property="og:url" content="{}">"#, canonical),
        format!(r#"    <meta property="og:site_name" content="{}">"#, html_escape(&meta.site_name)),
        format!(r#"    <meta name="twitter:card" content="{}">"#, meta.twitter_card.as_str()),
        format!(r#"    <meta name="twitter:title" content="{}">"#, html_escape(&meta.title)),
        format!(r#"    <meta name="twitter:description" content="{}">"#, description),
    ];
    if let Some(image) = &meta.image {
        let image = html_escape(image);
        tags.push(format!(r#"    <meta property="og:image" content="{}">"#, image));
        tags.push(format!(r#"    <meta name="twitter:image" content="{}">"#, image));
    }
    if let Some(published) = &meta.published_time {
        tags.push(format!(
            r#"    <meta property="article:published_time" content="{}">"#,
            html_escape(published)
        ));
    }
    if let Some(modified) = &meta.modified_time {
        tags.push(format!(
            r#"    <meta property="article:modified_time" content="{}">"#,
            html_escape(modified)
        ));
    }
    for author in &meta.authors {
        tags.push(format!(
            r#"    <meta property="article:author" content="{}">"#,
            html_escape(author)
        ));
    }
    tags.join("\n")
}

fn site_header(site: &SiteSettings, menu: Option<&Menu>) -> String {
    let items: String = menu
        .map(|m| m.items.iter().map(nav_item).collect())
        .unwrap_or_default();

    format!(
        r#"    <header class="site-header">
        <a class="brand" href="/"><img src="{logo}" alt="" class="logo"> {name}</a>
        <nav class="main-nav"><ul>{items}<li><a href="/contact">Contact</a></li></ul></nav>
        <div class="search-box">
            <input type="search" id="search-input" placeholder="Search articles..." autocomplete="off" aria-label="Search">
            <div id="search-results" class="search-results" hidden></div>
        </div>
    </header>"#,
        logo = html_escape(&site.logo),
        name = html_escape(&site.name),
        items = items,
    )
}

fn nav_item(item: &MenuItem) -> String {
    let icon = match (&item.icon_image, &item.icon) {
        (Some(src), _) => format!(r#"<img src="{}" alt="" class="nav-icon"> "#, html_escape(src)),
        (None, Some(icon)) => format!(r#"<span class="nav-icon {}"></span> "#, html_escape(icon)),
        (None, None) => String::new(),
    };
    let link = format!(
        r#"<a href="{}">{}{}</a>"#,
        html_escape(&item.uri),
        icon,
        html_escape(&item.label)
    );
    if item.children.is_empty() {
        return format!("<li>{}</li>", link);
    }
    let children: String = item.children.iter().map(nav_item).collect();
    format!(r#"<li class="has-children">{}<ul class="dropdown">{}</ul></li>"#, link, children)
}

fn site_footer(site: &SiteSettings) -> String {
    format!(
        r#"    <footer class="site-footer">
        <section class="newsletter">
            <h2>Subscribe to our newsletter</h2>
            <p>Tips and reviews, straight to your inbox.</p>
            <form data-endpoint="/api/newsletter" class="js-form">
                <input type="email" name="email" placeholder="you@gmail.com" required>
                <button type="submit">Subscribe</button>
                <p class="form-message" role="status"></p>
            </form>
        </section>
        <p class="copyright">&copy; {year} {name}. All rights reserved.</p>
    </footer>"#,
        year = Utc::now().year(),
        name = html_escape(&site.name),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::Config;
    use serde_json::json;

    #[test]
    fn test_document_has_meta_and_schema() {
        let site = Config::default().site;
        let meta = PageMeta::contact(&site);
        let html = document(&site, &meta, None, &[json!({ "@type": "WebSite" })], "<p>body</p>");

        assert!(html.contains("<title>Contact | Jimowers</title>"));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:3000/contact">"#));
        assert!(html.contains(r#"<meta name="robots" content="index, follow">"#));
        assert!(
            html.contains(r#"<script type="application/ld+json">{"@type":"WebSite"}</script>"#)
        );
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains(r#"data-endpoint="/api/newsletter""#));
    }

    #[test]
    fn test_head_tags_escape_and_noindex() {
        let site = Config::default().site;
        let mut meta = PageMeta::not_found(&site);
        meta.title = "<b>Gone</b>".to_string();
        let head = head_tags(&meta);
        assert!(head.contains("&lt;b&gt;Gone&lt;/b&gt;"));
        assert!(head.contains("noindex, nofollow"));
        assert!(!head.contains("og:image"));
    }

    #[test]
    fn test_nav_renders_children() {
        let site = Config::default().site;
        let menu = Menu {
            items: vec![MenuItem {
                id: "1".to_string(),
                label: "Guides".to_string(),
                uri: "/guides".to_string(),
                children: vec![MenuItem {
                    id: "2".to_string(),
                    label: "Robot & Reel".to_string(),
                    uri: "/robot".to_string(),
                    ..Default::default()
                }],
                ..Default::default()
            }],
        };
        let header = site_header(&site, Some(&menu));
        assert!(header.contains(r#"<li class="has-children"><a href="/guides">Guides</a>"#));
        assert!(header.contains("Robot &amp; Reel"));
    }
}

use super::listing::post_grid;
use crate::html::html_escape;
use press_kit_client::PageView;
use press_kit_core::config::SiteSettings;
use press_kit_core::text::{decode_html_entities, plain_text};
use press_kit_core::{Category, Post};

pub fn page_article(view: &PageView) -> String {
    let page = &view.page;
    let image = view
        .media
        .as_ref()
        .filter(|m| !m.source_url.is_empty())
        .map(|m| {
            format!(
                r#"<img class="featured" src="{}" alt="{}">"#,
                html_escape(&m.source_url),
                html_escape(&m.alt_text)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<article class="page" id="page-{id}">
    <h1>{title}</h1>
    {image}
    <div class="content">{content}</div>
</article>"#,
        id = page.id,
        title = html_escape(&plain_text(&page.title.rendered)),
        image = image,
        content = page.content.rendered,
    )
}

/// Latest posts and a category strip
pub fn home_page(site: &SiteSettings, posts: &[Post], categories: &[Category]) -> String {
    let chips: String = categories
        .iter()
        .filter(|c| c.count > 0)
        .map(|c| {
            format!(
                r#"<a class="badge" href="/{}">{}</a> "#,
                html_escape(&c.slug),
                html_escape(&decode_html_entities(&c.name))
            )
        })
        .collect();

    format!(
        r#"<section class="hero">
    <h1>{name}</h1>
    <p class="lead">{description}</p>
    <nav class="categories">{chips}</nav>
</section>
<section class="latest">
    <h2>Latest posts</h2>
    {posts}
</section>"#,
        name = html_escape(&site.name),
        description = html_escape(&site.description),
        chips = chips,
        posts = post_grid(posts),
    )
}

pub fn search_results(query: &str, posts: &[Post]) -> String {
    let query = query.trim();
    let results = if posts.is_empty() {
        r#"<p class="empty">No articles found.</p>"#.to_string()
    } else {
        post_grid(posts)
    };
    let heading = if query.is_empty() {
        "Search".to_string()
    } else {
        format!("Results for \u{201c}{}\u{201d}", html_escape(query))
    };

    format!(
        r#"<section class="search">
    <h1>{heading}</h1>
    <form action="/search" method="get" class="search-form">
        <input type="search" name="q" value="{query}" placeholder="Search articles...">
        <button type="submit">Search</button>
    </form>
    {results}
</section>"#,
        heading = heading,
        query = html_escape(query),
        results = results,
    )
}

pub fn contact_page() -> String {
    r#"<section class="contact">
    <h1>Contact us</h1>
    <p class="lead">Questions, suggestions or review requests? Send us a message.</p>
    <form data-endpoint="/api/contact" class="js-form">
        <input type="text" name="firstName" placeholder="First name" required minlength="2">
        <input type="text" name="lastName" placeholder="Last name" required minlength="2">
        <input type="email" name="email" placeholder="Email" required>
        <textarea name="message" rows="6" placeholder="Your message" required minlength="10"></textarea>
        <button type="submit">Send message</button>
        <p class="form-message" role="status"></p>
    </form>
</section>"#
        .to_string()
}

pub fn not_found_page() -> String {
    r#"<section class="not-found">
    <h1>Page not found</h1>
    <p>The page you are looking for does not exist or has moved.</p>
    <p><a href="/">Back to the home page</a> or try a search above.</p>
</section>"#
        .to_string()
}

pub fn maintenance_page(site: &SiteSettings) -> String {
    format!(
        r#"<section class="maintenance">
    <h1>We&#x27;ll be back soon</h1>
    <p>{} is down for scheduled maintenance. Please check back shortly.</p>
</section>"#,
        html_escape(&site.name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::{Config, Page, Rendered};

    #[test]
    fn test_search_results_empty() {
        let html = search_results("mower", &[]);
        assert!(html.contains("No articles found."));
        assert!(html.contains("Results for \u{201c}mower\u{201d}"));
        assert!(html.contains(r#"value="mower""#));
    }

    #[test]
    fn test_search_results_escape_query() {
        let html = search_results("<script>", &[]);
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_page_article() {
        let view = PageView {
            page: Page {
                id: 4,
                slug: "about".to_string(),
                title: Rendered::new("About &amp; Us"),
                content: Rendered::new("<p>Hello</p>"),
                ..Default::default()
            },
            media: None,
        };
        let html = page_article(&view);
        assert!(html.contains("<h1>About &amp; Us</h1>"));
        assert!(html.contains("<p>Hello</p>"));
        assert!(!html.contains("featured"));
    }

    #[test]
    fn test_home_hides_empty_categories() {
        let site = Config::default().site;
        let categories = vec![
            Category {
                slug: "guides".to_string(),
                name: "Guides".to_string(),
                count: 3,
                ..Default::default()
            },
            Category {
                slug: "uncategorized".to_string(),
                name: "Uncategorized".to_string(),
                ..Default::default()
            },
        ];
        let html = home_page(&site, &[], &categories);
        assert!(html.contains(r#"href="/guides""#));
        assert!(!html.contains("uncategorized"));
        assert!(html.contains("No posts found."));
    }

    #[test]
    fn test_static_pages() {
        assert!(contact_page().contains(r#"data-endpoint="/api/contact""#));
        assert!(not_found_page().contains("Page not found"));
        assert!(maintenance_page(&Config::default().site).contains("Jimowers is down"));
    }
}

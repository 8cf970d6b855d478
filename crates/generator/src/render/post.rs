use super::comments::comment_thread;
use crate::html::html_escape;
use press_kit_client::PostView;
use press_kit_core::text::{decode_html_entities, format_date, plain_text, truncate_words};
use press_kit_core::{Post, Rating};

const CARD_EXCERPT_WORDS: usize = 25;

/// Full article: byline, category badge, image, content, rating, comments
/// and related posts
pub fn post_article(view: &PostView) -> String {
    let post = &view.post;

    let author_name = view
        .author
        .as_ref()
        .map(|a| (a.name.as_str(), a.slug.as_str()))
        .or_else(|| post.embedded_author().map(|a| (a.name.as_str(), a.slug.as_str())));
    let byline = match author_name {
        Some((name, slug)) => format!(
            r#"By <a href="/{}">{}</a> &middot; "#,
            html_escape(slug),
            html_escape(&decode_html_entities(name))
        ),
        None => String::new(),
    };

    let badge = view
        .category
        .as_ref()
        .map(|c| {
            format!(
                r#"<a class="badge" href="/{}">{}</a>"#,
                html_escape(&c.slug),
                html_escape(&decode_html_entities(&c.name))
            )
        })
        .unwrap_or_default();

    let image = view
        .media
        .as_ref()
        .filter(|m| !m.source_url.is_empty())
        .map(|m| {
            let alt = if m.alt_text.is_empty() {
                plain_text(&post.title.rendered)
            } else {
                m.alt_text.clone()
            };
            format!(
                r#"<img class="featured" src="{}" alt="{}"{}>"#,
                html_escape(&m.source_url),
                html_escape(&alt),
                dimensions(m.media_details.width, m.media_details.height)
            )
        })
        .unwrap_or_default();

    let related = if view.related.is_empty() {
        String::new()
    } else {
        let cards: String = view.related.iter().map(post_card).collect();
        format!(
            r#"<section class="related"><h2>Related posts</h2><div class="post-grid">{}</div></section>"#,
            cards
        )
    };

    format!(
        r#"<article class="post" id="post-{id}">
    <header>
        {badge}
        <h1>{title}</h1>
        <p class="byline">{byline}<time datetime="{datetime}">{date}</time></p>
    </header>
    {image}
    <div class="content">{content}</div>
    {rating}
</article>
{comments}
{related}"#,
        id = post.id,
        badge = badge,
        title = html_escape(&plain_text(&post.title.rendered)),
        byline = byline,
        datetime = html_escape(&post.date),
        date = html_escape(&format_date(&post.date)),
        image = image,
        content = post.content.rendered,
        rating = rating_section(post.id, post.rating()),
        comments = comment_thread(post.id, &view.comments),
        related = related,
    )
}

/// Summary card used by listings, search results and related posts
pub fn post_card(post: &Post) -> String {
    let image = post
        .embedded_media()
        .filter(|m| !m.source_url.is_empty())
        .map(|m| {
            format!(
                r#"<img src="{}" alt="{}" loading="lazy">"#,
                html_escape(&m.source_url),
                html_escape(&m.alt_text)
            )
        })
        .unwrap_or_default();
    let category = post
        .embedded_terms()
        .find(|t| t.taxonomy == "category")
        .map(|t| {
            format!(
                r#"<span class="badge">{}</span> "#,
                html_escape(&decode_html_entities(&t.name))
            )
        })
        .unwrap_or_default();
    let excerpt = truncate_words(&plain_text(&post.excerpt.rendered), CARD_EXCERPT_WORDS);

    format!(
        r#"<div class="post-card">
    <a href="/{slug}">{image}</a>
    <div class="card-body">
        {category}<span class="meta">{date}</span>
        <h3><a href="/{slug}">{title}</a></h3>
        <p>{excerpt}</p>
    </div>
</div>"#,
        slug = html_escape(&post.slug),
        image = image,
        category = category,
        date = html_escape(&format_date(&post.date)),
        title = html_escape(&plain_text(&post.title.rendered)),
        excerpt = html_escape(&excerpt),
    )
}

fn rating_section(post_id: u64, rating: Option<Rating>) -> String {
    let summary = match rating {
        Some(r) => {
            let full = r.average.round().clamp(0.0, 5.0) as usize;
            format!(
                r#"<p class="rating-summary"><span class="stars">{}{}</span> {:.1} / 5 ({} ratings)</p>"#,
                "\u{2605}".repeat(full),
                "\u{2606}".repeat(5 - full),
                r.average,
                r.count
            )
        }
        None => r#"<p class="rating-summary empty">Not rated yet</p>"#.to_string(),
    };

    let stars: String = (1..=5)
        .map(|n| {
            format!(
                r#"<label><input type="radio" name="rating" value="{n}" data-number{checked}> {n}</label>"#,
                n = n,
                checked = if n == 5 { " checked" } else { "" },
            )
        })
        .collect();

    format!(
        r#"<section class="rating">
        <h2>Rate this article</h2>
        {summary}
        <form data-endpoint="/api/submit-rating" class="js-form">
            <input type="hidden" name="postId" value="{post_id}" data-number>
            <div class="stars">{stars}</div>
            <textarea name="reviewText" rows="3" placeholder="Tell us what you think" required></textarea>
            <button type="submit">Submit rating</button>
            <p class="form-message" role="status"></p>
        </form>
    </section>"#,
        summary = summary,
        post_id = post_id,
        stars = stars,
    )
}

fn dimensions(width: u32, height: u32) -> String {
    if width > 0 && height > 0 {
        format!(r#" width="{}" height="{}""#, width, height)
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::{Author, Category, FeaturedMedia, MediaDetails, Rendered};
    use serde_json::json;

    fn view() -> PostView {
        PostView {
            post: Post {
                id: 7,
                slug: "my-post".to_string(),
                title: Rendered::new("Mowers &amp; More"),
                content: Rendered::new("<p>Body <em>text</em></p>"),
                date: "2024-05-01T10:00:00".to_string(),
                meta: json!({ "_article_rating": 4, "_article_rating_count": 3 }),
                ..Default::default()
            },
            author: Some(Author {
                slug: "jim".to_string(),
                name: "Jim".to_string(),
                ..Default::default()
            }),
            category: Some(Category {
                slug: "guides".to_string(),
                name: "Guides".to_string(),
                ..Default::default()
            }),
            media: Some(FeaturedMedia {
                id: 1,
                source_url: "https://cdn.example.com/m.jpg".to_string(),
                alt_text: String::new(),
                media_details: MediaDetails {
                    width: 800,
                    height: 600,
                },
            }),
            comments: Vec::new(),
            related: vec![Post {
                slug: "other".to_string(),
                title: Rendered::new("Other"),
                ..Default::default()
            }],
        }
    }

    #[test]
    fn test_post_article_sections() {
        let html = post_article(&view());
        assert!(html.contains("<h1>Mowers &amp; More</h1>"));
        assert!(html.contains(r#"By <a href="/jim">Jim</a>"#));
        assert!(html.contains(r#"<a class="badge" href="/guides">Guides</a>"#));
        assert!(html.contains(r#"alt="Mowers &amp; More" width="800" height="600""#));
        assert!(html.contains("<p>Body <em>text</em></p>"));
        assert!(html.contains("4.0 / 5 (3 ratings)"));
        assert!(html.contains(r#"name="postId" value="7""#));
        assert!(html.contains("Related posts"));
        assert!(html.contains(r#"href="/other""#));
        assert!(html.contains("May 1, 2024"));
    }

    #[test]
    fn test_post_without_extras() {
        let mut view = view();
        view.author = None;
        view.category = None;
        view.media = None;
        view.related.clear();
        view.post.meta = json!([]);
        let html = post_article(&view);
        assert!(!html.contains("By <a"));
        assert!(!html.contains("Related posts"));
        assert!(html.contains("Not rated yet"));
    }

    #[test]
    fn test_post_card_escapes_excerpt() {
        let post = Post {
            slug: "a".to_string(),
            excerpt: Rendered::new("<p>Use &lt;b&gt; wisely</p>"),
            ..Default::default()
        };
        let card = post_card(&post);
        assert!(card.contains("<p>Use wisely</p>"));
    }
}

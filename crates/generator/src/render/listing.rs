use super::post::post_card;
use crate::html::html_escape;
use press_kit_client::{AuthorView, TermView};
use press_kit_core::text::{decode_html_entities, plain_text};
use press_kit_core::{Author, Category, Post, Tag};

/// Category or tag archive. `heading` is e.g. "Category" or "Tag".
pub fn term_listing(heading: &str, view: &TermView) -> String {
    let description = plain_text(&view.term.description);
    let description = if description.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="lead">{}</p>"#, html_escape(&description))
    };

    format!(
        r#"<section class="archive">
    <p class="meta">{heading}</p>
    <h1>{name}</h1>
    {description}
    {posts}
</section>"#,
        heading = html_escape(heading),
        name = html_escape(&decode_html_entities(&view.term.name)),
        description = description,
        posts = post_grid(&view.posts),
    )
}

pub fn author_profile(view: &AuthorView) -> String {
    let author = &view.author;
    let avatar = author
        .avatar(96)
        .map(|src| {
            format!(
                r#"<img class="avatar" src="{}" alt="" width="96" height="96">"#,
                html_escape(src)
            )
        })
        .unwrap_or_default();
    let links: String = author
        .social_links
        .iter()
        .map(|link| {
            format!(
                r#"<li><a href="{0}" rel="me noopener" target="_blank">{0}</a></li>"#,
                html_escape(link)
            )
        })
        .collect();
    let links = if links.is_empty() {
        links
    } else {
        format!(r#"<ul class="social-links">{}</ul>"#, links)
    };

    format!(
        r#"<section class="author">
    <header class="author-header">
        {avatar}
        <div>
            <h1>{name}</h1>
            <p>{bio}</p>
            {links}
        </div>
    </header>
    <h2>Posts by {name}</h2>
    {posts}
</section>"#,
        avatar = avatar,
        name = html_escape(&decode_html_entities(&author.name)),
        bio = html_escape(&plain_text(&author.description)),
        links = links,
        posts = post_grid(&view.posts),
    )
}

pub fn category_index(categories: &[Category]) -> String {
    term_index("Categories", categories)
}

pub fn tag_index(tags: &[Tag]) -> String {
    term_index("Tags", tags)
}

pub fn author_index(authors: &[Author]) -> String {
    let items: String = authors
        .iter()
        .map(|a| {
            let avatar = a
                .avatar(48)
                .map(|src| {
                    format!(
                        r#"<img class="avatar" src="{}" alt="" width="48" height="48"> "#,
                        html_escape(src)
                    )
                })
                .unwrap_or_default();
            format!(
                r#"<li><a href="/{}">{}{}</a></li>"#,
                html_escape(&a.slug),
                avatar,
                html_escape(&decode_html_entities(&a.name))
            )
        })
        .collect();
    index_section("Authors", &items)
}

fn term_index(title: &str, terms: &[Category]) -> String {
    let items: String = terms
        .iter()
        .map(|t| {
            format!(
                r#"<li><a href="/{}">{}</a> <span class="meta">({})</span></li>"#,
                html_escape(&t.slug),
                html_escape(&decode_html_entities(&t.name)),
                t.count
            )
        })
        .collect();
    index_section(title, &items)
}

fn index_section(title: &str, items: &str) -> String {
    let list = if items.is_empty() {
        format!(r#"<p class="empty">No {} found.</p>"#, title.to_lowercase())
    } else {
        format!(r#"<ul class="index-list">{}</ul>"#, items)
    };
    format!(
        r#"<section class="index">
    <h1>{}</h1>
    {}
</section>"#,
        title, list
    )
}

/// Grid of post cards, or a note when there are none
pub(crate) fn post_grid(posts: &[Post]) -> String {
    if posts.is_empty() {
        return r#"<p class="empty">No posts found.</p>"#.to_string();
    }
    let cards: String = posts.iter().map(post_card).collect();
    format!(r#"<div class="post-grid">{}</div>"#, cards)
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::{Rendered, Term};

    fn term() -> Term {
        Term {
            id: 3,
            slug: "guides".to_string(),
            name: "Guides &amp; Tips".to_string(),
            description: "<p>How-to articles</p>".to_string(),
            count: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_term_listing() {
        let view = TermView {
            term: term(),
            posts: vec![Post {
                slug: "p1".to_string(),
                title: Rendered::new("First"),
                ..Default::default()
            }],
        };
        let html = term_listing("Category", &view);
        assert!(html.contains("<h1>Guides &amp; Tips</h1>"));
        assert!(html.contains(r#"<p class="lead">How-to articles</p>"#));
        assert!(html.contains(r#"href="/p1""#));

        let empty = term_listing("Tag", &TermView { term: term(), posts: Vec::new() });
        assert!(empty.contains("No posts found."));
    }

    #[test]
    fn test_indexes() {
        let html = category_index(&[term()]);
        assert!(html.contains(
            r#"<a href="/guides">Guides &amp; Tips</a> <span class="meta">(2)</span>"#
        ));
        assert!(tag_index(&[]).contains("No tags found."));

        let authors = vec![Author {
            slug: "jim".to_string(),
            name: "Jim".to_string(),
            ..Default::default()
        }];
        assert!(author_index(&authors).contains(r#"<a href="/jim">Jim</a>"#));
    }

    #[test]
    fn test_author_profile() {
        let view = AuthorView {
            author: Author {
                slug: "jim".to_string(),
                name: "Jim".to_string(),
                description: "Mows <b>lawns</b>".to_string(),
                social_links: vec!["https://x.com/jim".to_string()],
                ..Default::default()
            },
            posts: Vec::new(),
        };
        let html = author_profile(&view);
        assert!(html.contains("<p>Mows lawns</p>"));
        assert!(html.contains("Posts by Jim"));
        assert!(html.contains(r#"href="https://x.com/jim""#));
    }
}

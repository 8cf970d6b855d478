use crate::html::html_escape;
use press_kit_core::Comment;
use press_kit_core::comments::count_comments;
use press_kit_core::text::format_date;

/// One comment with its replies and a reply form.
///
/// Also returned by the comment endpoint so the page can insert a new
/// comment in place.
pub fn comment_html(comment: &Comment) -> String {
    let avatar = comment
        .author_avatar_urls
        .get("48")
        .or_else(|| comment.author_avatar_urls.values().next_back())
        .map(|src| {
            format!(
                r#"<img src="{}" alt="" class="avatar" width="48" height="48">"#,
                html_escape(src)
            )
        })
        .unwrap_or_default();
    let replies: String = comment.replies.iter().map(comment_html).collect();

    format!(
        r#"<article class="comment" id="comment-{id}">
    <header class="meta">{avatar}<strong>{author}</strong> <time datetime="{datetime}">{date}</time></header>
    <div class="comment-body">{content}</div>
    <details class="reply">
        <summary>Reply</summary>
        {form}
    </details>
    <div class="replies">{replies}</div>
</article>"#,
        id = comment.id,
        avatar = avatar,
        author = html_escape(&comment.author_name),
        datetime = html_escape(&comment.date),
        date = html_escape(&format_date(&comment.date)),
        content = comment.content.rendered,
        form = comment_form(comment.post, comment.id),
        replies = replies,
    )
}

/// Comment section for a post: count, top-level form and the thread
pub fn comment_thread(post_id: u64, thread: &[Comment]) -> String {
    let count = count_comments(thread);
    let heading = match count {
        0 => "No comments yet".to_string(),
        1 => "1 comment".to_string(),
        n => format!("{} comments", n),
    };
    let comments: String = thread.iter().map(comment_html).collect();

    format!(
        r#"<section class="comments" id="comments">
    <h2>{heading}</h2>
    {form}
    <div id="comment-list">{comments}</div>
</section>"#,
        heading = heading,
        form = comment_form(post_id, 0),
        comments = comments,
    )
}

fn comment_form(post_id: u64, parent: u64) -> String {
    let (placeholder, button) = if parent == 0 {
        ("Join the discussion...", "Post comment")
    } else {
        ("Write a reply...", "Post reply")
    };
    format!(
        r#"<form data-endpoint="/api/comments" class="js-form comment-form">
            <input type="hidden" name="post" value="{post}" data-number>
            <input type="hidden" name="parent" value="{parent}" data-number>
            <input type="text" name="author_name" placeholder="Name" required>
            <input type="email" name="author_email" placeholder="Email" required>
            <textarea name="content" rows="4" placeholder="{placeholder}" required></textarea>
            <button type="submit">{button}</button>
            <p class="form-message" role="status"></p>
        </form>"#,
        post = post_id,
        parent = parent,
        placeholder = placeholder,
        button = button,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use press_kit_core::Rendered;

    fn comment(id: u64, parent: u64) -> Comment {
        Comment {
            id,
            post: 7,
            parent,
            author_name: "<Ann>".to_string(),
            content: Rendered::new("<p>Nice mower</p>"),
            date: "2024-05-01T10:00:00".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_comment_html_nests_replies() {
        let mut top = comment(1, 0);
        top.replies.push(comment(2, 1));
        let html = comment_html(&top);

        assert!(html.starts_with(r#"<article class="comment" id="comment-1">"#));
        assert!(html.contains(r#"id="comment-2""#));
        assert!(html.contains("&lt;Ann&gt;"));
        assert!(html.contains("<p>Nice mower</p>"));
        assert!(html.contains("May 1, 2024"));
        assert!(html.contains(r#"name="parent" value="1""#));
    }

    #[test]
    fn test_thread_heading_counts_replies() {
        let mut top = comment(1, 0);
        top.replies.push(comment(2, 1));
        let html = comment_thread(7, &[top]);
        assert!(html.contains("<h2>2 comments</h2>"));
        assert!(html.contains(r#"name="post" value="7""#));
        assert!(comment_thread(7, &[]).contains("No comments yet"));
    }
}

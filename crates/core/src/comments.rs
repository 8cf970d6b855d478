//! Comment thread assembly.
//!
//! Threads are immutable values: every operation returns a new tree and
//! leaves branches it does not touch equal to the input.

use crate::types::Comment;

/// Place a freshly created comment into a displayed thread.
///
/// Top-level comments (parent 0) go first, matching the newest-first order
/// of the top-level listing. Replies go to the end of their parent's
/// `replies`. Returns `None` when the parent is not in the thread.
pub fn insert_comment(thread: &[Comment], comment: Comment) -> Option<Vec<Comment>> {
    if comment.parent == 0 {
        let mut out = Vec::with_capacity(thread.len() + 1);
        out.push(comment);
        out.extend_from_slice(thread);
        return Some(out);
    }
    let parent = comment.parent;
    attach_reply(thread, parent, comment)
}

/// Append `reply` under the comment with id `parent_id`, at any depth
pub fn attach_reply(thread: &[Comment], parent_id: u64, reply: Comment) -> Option<Vec<Comment>> {
    let mut reply = Some(reply);
    let updated = attach_inner(thread, parent_id, &mut reply);
    // still Some means no parent matched
    match reply {
        Some(_) => None,
        None => Some(updated),
    }
}

fn attach_inner(thread: &[Comment], parent_id: u64, reply: &mut Option<Comment>) -> Vec<Comment> {
    thread
        .iter()
        .map(|comment| {
            if reply.is_none() {
                return comment.clone();
            }
            if comment.id == parent_id {
                let mut updated = comment.clone();
                if let Some(r) = reply.take() {
                    updated.replies.push(r);
                }
                return updated;
            }
            if comment.replies.is_empty() {
                return comment.clone();
            }
            let mut updated = comment.clone();
            updated.replies = attach_inner(&comment.replies, parent_id, reply);
            updated
        })
        .collect()
}

/// Build a thread from a flat comment list by grouping on parent id.
///
/// Top-level comments keep the order given; replies keep theirs under each
/// parent. Comments whose parent is missing are dropped.
pub fn build_thread(flat: &[Comment]) -> Vec<Comment> {
    fn children_of(flat: &[Comment], parent: u64) -> Vec<Comment> {
        flat.iter()
            .filter(|c| c.parent == parent && c.id != parent)
            .map(|c| {
                let mut node = c.clone();
                node.replies = children_of(flat, c.id);
                node
            })
            .collect()
    }
    children_of(flat, 0)
}

/// Find a comment anywhere in the thread
pub fn find_comment(thread: &[Comment], id: u64) -> Option<&Comment> {
    thread.iter().find_map(|c| {
        if c.id == id {
            Some(c)
        } else {
            find_comment(&c.replies, id)
        }
    })
}

/// Total comments in the thread, replies included
pub fn count_comments(thread: &[Comment]) -> usize {
    thread
        .iter()
        .map(|c| 1 + count_comments(&c.replies))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: u64, parent: u64) -> Comment {
        Comment {
            id,
            parent,
            post: 1,
            author_name: format!("reader-{id}"),
            ..Default::default()
        }
    }

    fn sample_thread() -> Vec<Comment> {
        let mut a = comment(1, 0);
        let mut a1 = comment(11, 1);
        a1.replies.push(comment(111, 11));
        a.replies.push(a1);
        let mut b = comment(2, 0);
        b.replies.push(comment(21, 2));
        vec![a, b]
    }

    #[test]
    fn test_attach_reply_to_nested_comment() {
        let thread = sample_thread();
        let updated = attach_reply(&thread, 11, comment(112, 11)).unwrap();

        let parent = find_comment(&updated, 11).unwrap();
        let ids: Vec<u64> = parent.replies.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![111, 112]);
        assert_eq!(count_comments(&updated), count_comments(&thread) + 1);
    }

    #[test]
    fn test_attach_reply_leaves_siblings_untouched() {
        let thread = sample_thread();
        let updated = attach_reply(&thread, 11, comment(112, 11)).unwrap();

        // the other top-level branch is identical
        assert_eq!(updated[1], thread[1]);
        // the sibling subtree under the parent is identical
        assert_eq!(
            find_comment(&updated, 111).unwrap(),
            find_comment(&thread, 111).unwrap()
        );
        // input was not mutated
        assert_eq!(thread, sample_thread());
    }

    #[test]
    fn test_attach_reply_unknown_parent() {
        let thread = sample_thread();
        assert!(attach_reply(&thread, 999, comment(5, 999)).is_none());
    }

    #[test]
    fn test_attach_reply_first_match_only() {
        // duplicate ids should not receive two copies
        let thread = vec![comment(1, 0), comment(1, 0)];
        let updated = attach_reply(&thread, 1, comment(7, 1)).unwrap();
        assert_eq!(updated[0].replies.len(), 1);
        assert!(updated[1].replies.is_empty());
    }

    #[test]
    fn test_insert_top_level_goes_first() {
        let thread = sample_thread();
        let updated = insert_comment(&thread, comment(3, 0)).unwrap();
        let ids: Vec<u64> = updated.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_insert_reply_delegates_to_attach() {
        let thread = sample_thread();
        let updated = insert_comment(&thread, comment(22, 2)).unwrap();
        assert_eq!(updated[1].replies.len(), 2);
        assert!(insert_comment(&thread, comment(9, 404)).is_none());
    }

    #[test]
    fn test_build_thread_groups_by_parent() {
        let flat = vec![
            comment(1, 0),
            comment(2, 0),
            comment(11, 1),
            comment(111, 11),
            comment(21, 2),
        ];
        let thread = build_thread(&flat);
        assert_eq!(thread, sample_thread());
    }

    #[test]
    fn test_build_thread_drops_orphans() {
        let flat = vec![comment(1, 0), comment(50, 49)];
        let thread = build_thread(&flat);
        assert_eq!(count_comments(&thread), 1);
    }

    #[test]
    fn test_count_empty() {
        assert_eq!(count_comments(&[]), 0);
    }
}

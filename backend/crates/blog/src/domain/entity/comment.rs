use std::collections::HashMap;

use chrono::{DateTime, Utc};
use kernel::id::{CommentId, PostId};
use platform::escape::escape_html;
use serde::Serialize;

/// Replaces the content of a deleted comment that still has replies
pub const DELETED_COMMENT_CONTENT: &str = "Содержимое этого комментария было удалено";

/// Stored comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub id: CommentId,
    #[serde(rename = "postID")]
    pub post_id: PostId,
    #[serde(rename = "parentID")]
    pub parent_id: Option<CommentId>,
    pub author: String,
    pub date: DateTime<Utc>,
    pub content: String,
    pub deleted: bool,
}

/// Comment ready to insert
///
/// Only constructible through [`NewComment::escaped`], so author and
/// content always reach the store HTML-escaped.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
    post_id: PostId,
    parent_id: Option<CommentId>,
    author: String,
    content: String,
}

impl NewComment {
    pub fn escaped(
        post_id: PostId,
        parent_id: Option<CommentId>,
        author: &str,
        content: &str,
    ) -> Self {
        Self {
            post_id,
            parent_id,
            author: escape_html(author),
            content: escape_html(content),
        }
    }

    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub fn parent_id(&self) -> Option<CommentId> {
        self.parent_id
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// A comment with its replies
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    fn leaf(comment: Comment) -> Self {
        Self {
            comment,
            children: Vec::new(),
        }
    }
}

/// Assemble the reply forest from a list ascending by id
///
/// Children keep ascending order under their parent. A comment whose
/// parent is absent from the list (or does not precede it) becomes a root.
pub fn build_forest(comments: Vec<Comment>) -> Vec<CommentNode> {
    let index: HashMap<CommentId, usize> = comments
        .iter()
        .enumerate()
        .map(|(pos, comment)| (comment.id, pos))
        .collect();

    let parent_pos: Vec<Option<usize>> = comments
        .iter()
        .enumerate()
        .map(|(pos, comment)| {
            comment
                .parent_id
                .and_then(|parent| index.get(&parent).copied())
                .filter(|parent| *parent < pos)
        })
        .collect();

    let mut slots: Vec<Option<CommentNode>> =
        comments.into_iter().map(|c| Some(CommentNode::leaf(c))).collect();

    // Children always sit after their parent, so walking backwards moves
    // every subtree into place before its parent is itself moved.
    for pos in (0..slots.len()).rev() {
        if let Some(node) = slots[pos].as_mut() {
            node.children.reverse();
        }
        if let Some(parent) = parent_pos[pos] {
            if let Some(node) = slots[pos].take() {
                if let Some(parent_node) = slots[parent].as_mut() {
                    parent_node.children.push(node);
                }
            }
        }
    }

    slots.into_iter().flatten().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id: CommentId::new(id),
            post_id: PostId::new(1),
            parent_id: parent.map(CommentId::new),
            author: "author".to_string(),
            date: Utc::now(),
            content: format!("comment {id}"),
            deleted: false,
        }
    }

    fn ids(nodes: &[CommentNode]) -> Vec<i64> {
        nodes.iter().map(|n| n.comment.id.get()).collect()
    }

    #[test]
    fn empty_list_gives_empty_forest() {
        assert!(build_forest(Vec::new()).is_empty());
    }

    #[test]
    fn nested_replies_keep_ascending_order() {
        let forest = build_forest(vec![
            comment(1, None),
            comment(2, Some(1)),
            comment(3, None),
            comment(4, Some(1)),
            comment(5, Some(2)),
            comment(6, Some(4)),
            comment(7, Some(2)),
        ]);

        assert_eq!(ids(&forest), vec![1, 3]);
        assert_eq!(ids(&forest[0].children), vec![2, 4]);
        assert_eq!(ids(&forest[0].children[0].children), vec![5, 7]);
        assert_eq!(ids(&forest[0].children[1].children), vec![6]);
        assert!(forest[1].children.is_empty());
    }

    #[test]
    fn orphans_become_roots() {
        let forest = build_forest(vec![comment(2, Some(1)), comment(3, Some(2))]);

        assert_eq!(ids(&forest), vec![2]);
        assert_eq!(ids(&forest[0].children), vec![3]);
    }

    #[test]
    fn long_reply_chain() {
        let comments: Vec<Comment> = (1..=1_000)
            .map(|id| comment(id, if id == 1 { None } else { Some(id - 1) }))
            .collect();

        let forest = build_forest(comments);
        assert_eq!(forest.len(), 1);

        let mut depth = 1;
        let mut node = &forest[0];
        while let Some(child) = node.children.first() {
            depth += 1;
            node = child;
        }
        assert_eq!(depth, 1_000);
    }

    #[test]
    fn new_comment_escapes_free_text() {
        let new = NewComment::escaped(
            PostId::new(1),
            None,
            "<b>bold</b>",
            "a & b <script>",
        );
        assert_eq!(new.author(), "&lt;b&gt;bold&lt;/b&gt;");
        assert_eq!(new.content(), "a &amp; b &lt;script&gt;");
    }

    #[test]
    fn node_serializes_flat_with_children() {
        let node = CommentNode {
            comment: comment(1, None),
            children: vec![CommentNode::leaf(comment(2, Some(1)))],
        };
        let json = serde_json::to_value(&node).unwrap();

        assert_eq!(json["id"], "1");
        assert_eq!(json["postID"], "1");
        assert!(json["parentID"].is_null());
        assert_eq!(json["children"][0]["parentID"], "1");
        assert_eq!(json["children"][0]["children"], serde_json::json!([]));
    }
}

//! Content entities.
//!
//! A [`Post`] carries two body strings: `raw_content`, the author's
//! extended-markdown source and the only durable source of truth, and
//! `content`, the compiled HTML cache. The cache is derived state; it is
//! written only by the save path and served verbatim to readers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// URL slug, unique per post.
    pub slug: String,
    pub title: String,
    /// Title font size in pixels for the header overlay.
    pub title_size: u32,
    /// CSS background value behind the title text.
    pub title_background: String,
    /// Header image URL, if the post has one.
    pub header_image: Option<String>,
    pub pub_date: DateTime<Utc>,
    /// Unpublished posts are visible to authors only.
    pub published: bool,
    /// Render without the content column width cap.
    pub fullwidth: bool,
    pub tags: Vec<String>,
    /// Author-authored extended-markdown source.
    pub raw_content: String,
    /// Compiled HTML, always derived from `raw_content`.
    pub content: String,
}

/// Author-editable fields of a post.
///
/// Deliberately has no `content` field: the compiled cache can only be
/// produced by the save path, never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDraft {
    pub slug: String,
    pub title: String,
    pub title_size: u32,
    pub title_background: String,
    pub header_image: Option<String>,
    pub pub_date: DateTime<Utc>,
    pub published: bool,
    pub fullwidth: bool,
    pub tags: Vec<String>,
    pub raw_content: String,
}

impl PostDraft {
    /// Create a draft with defaults: unpublished, normal width, dated
    /// now.
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            title_size: 42,
            title_background: "rgba(0, 0, 0, 0.5)".to_owned(),
            header_image: None,
            pub_date: Utc::now(),
            published: false,
            fullwidth: false,
            tags: Vec::new(),
            raw_content: String::new(),
        }
    }

    #[must_use]
    pub fn with_raw_content(mut self, raw: impl Into<String>) -> Self {
        self.raw_content = raw.into();
        self
    }

    #[must_use]
    pub fn with_pub_date(mut self, pub_date: DateTime<Utc>) -> Self {
        self.pub_date = pub_date;
        self
    }

    #[must_use]
    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    #[must_use]
    pub fn with_fullwidth(mut self, fullwidth: bool) -> Self {
        self.fullwidth = fullwidth;
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_header_image(mut self, url: impl Into<String>) -> Self {
        self.header_image = Some(url.into());
        self
    }

    /// Attach the compiled HTML, producing the persistable post.
    pub(crate) fn into_post(self, content: String) -> Post {
        Post {
            slug: self.slug,
            title: self.title,
            title_size: self.title_size,
            title_background: self.title_background,
            header_image: self.header_image,
            pub_date: self.pub_date,
            published: self.published,
            fullwidth: self.fullwidth,
            tags: self.tags,
            raw_content: self.raw_content,
            content,
        }
    }
}

/// A static page (about, contact), ordered for navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub slug: String,
    pub title: String,
    /// Navigation position, ascending.
    pub order: u32,
    pub raw_content: String,
    /// Compiled HTML, always derived from `raw_content`.
    pub content: String,
}

/// Author-editable fields of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDraft {
    pub slug: String,
    pub title: String,
    pub order: u32,
    pub raw_content: String,
}

impl PageDraft {
    #[must_use]
    pub fn new(slug: impl Into<String>, title: impl Into<String>, order: u32) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            order,
            raw_content: String::new(),
        }
    }

    #[must_use]
    pub fn with_raw_content(mut self, raw: impl Into<String>) -> Self {
        self.raw_content = raw.into();
        self
    }

    pub(crate) fn into_page(self, content: String) -> Page {
        Page {
            slug: self.slug,
            title: self.title,
            order: self.order,
            raw_content: self.raw_content,
            content,
        }
    }
}

/// A social profile link shown in the site chrome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub name: String,
    pub url: String,
    /// Display position, ascending.
    pub order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let draft = PostDraft::new("hello", "Hello");
        assert_eq!(draft.slug, "hello");
        assert!(!draft.published);
        assert!(!draft.fullwidth);
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_draft_into_post_carries_fields() {
        let draft = PostDraft::new("s", "T")
            .with_raw_content("body")
            .with_published(true)
            .with_tags(["rust", "blog"]);
        let post = draft.into_post("<p>body</p>\n".to_owned());
        assert_eq!(post.slug, "s");
        assert!(post.published);
        assert_eq!(post.tags, vec!["rust", "blog"]);
        assert_eq!(post.raw_content, "body");
        assert_eq!(post.content, "<p>body</p>\n");
    }

    #[test]
    fn test_post_serde_roundtrip() {
        let post = PostDraft::new("s", "T")
            .with_raw_content("x")
            .into_post("<p>x</p>\n".to_owned());
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(post, back);
    }
}

//! Read-side queries: publish gating, ordering, pagination, tags.
//!
//! Pure functions over a slice of posts. The serving layer fetches
//! posts from the store once per request and composes these; nothing
//! here touches storage or mutates anything.

use std::collections::HashMap;

use crate::model::Post;

/// Who is looking.
///
/// Readers see published posts only; authors (an authenticated admin
/// session, at this boundary) see everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Reader,
    Author,
}

/// One page of a post listing.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow<'a> {
    /// Posts on this page, newest first.
    pub items: Vec<&'a Post>,
    /// 1-based page number, clamped to the last page.
    pub page: usize,
    /// Total number of pages; at least 1.
    pub total_pages: usize,
}

impl PageWindow<'_> {
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Posts visible to `viewer`, newest first.
#[must_use]
pub fn visible(posts: &[Post], viewer: Viewer) -> Vec<&Post> {
    let mut visible: Vec<&Post> = posts
        .iter()
        .filter(|post| post.published || viewer == Viewer::Author)
        .collect();
    visible.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
    visible
}

/// The `limit` newest visible posts.
#[must_use]
pub fn latest(posts: &[Post], viewer: Viewer, limit: usize) -> Vec<&Post> {
    let mut posts = visible(posts, viewer);
    posts.truncate(limit);
    posts
}

/// One listing page of visible posts.
///
/// `page` is 1-based; out-of-range values clamp to the nearest valid
/// page. `per_page` of zero is treated as one.
#[must_use]
pub fn paginate(posts: &[Post], viewer: Viewer, page: usize, per_page: usize) -> PageWindow<'_> {
    let per_page = per_page.max(1);
    let visible = visible(posts, viewer);
    let total_pages = visible.len().div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * per_page;
    let items = visible
        .into_iter()
        .skip(start)
        .take(per_page)
        .collect();

    PageWindow {
        items,
        page,
        total_pages,
    }
}

/// Visible posts carrying `tag`, newest first.
#[must_use]
pub fn with_tag<'a>(posts: &'a [Post], viewer: Viewer, tag: &str) -> Vec<&'a Post> {
    visible(posts, viewer)
        .into_iter()
        .filter(|post| post.tags.iter().any(|t| t == tag))
        .collect()
}

/// One post by slug, gated by viewer.
///
/// An unpublished post is `None` for readers, exactly as if it did not
/// exist.
#[must_use]
pub fn find<'a>(posts: &'a [Post], viewer: Viewer, slug: &str) -> Option<&'a Post> {
    posts
        .iter()
        .find(|post| post.slug == slug && (post.published || viewer == Viewer::Author))
}

/// The `limit` most-used tags as `(tag, count)` pairs.
///
/// Counted across all posts; ties break alphabetically so the ranking
/// is deterministic.
#[must_use]
pub fn popular_tags(posts: &[Post], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag).or_insert(0) += 1;
        }
    }

    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(tag, count)| (tag.to_owned(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

//! Content persistence boundary.
//!
//! [`ContentStore`] abstracts the persistence layer behind a trait so
//! the save path and the query layer never touch a concrete backend.
//! [`MemoryStore`] is the in-process reference implementation; a
//! database-backed store is an external collaborator implementing the
//! same trait.
//!
//! Writes are whole-entity: `put_post` replaces the stored post (raw and
//! compiled body together), so a reader can never observe one half of an
//! update.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::model::{Page, Post, SocialLink};

/// Error returned by store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// No entry under the given slug.
    #[error("no such entry: {0}")]
    NotFound(String),
    /// Backend-specific failure (I/O, connection, constraint).
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Persistence operations for posts, pages and social links.
pub trait ContentStore: Send + Sync {
    /// Insert or replace a post under its slug.
    fn put_post(&self, post: Post) -> Result<(), StoreError>;

    /// Fetch one post by slug.
    fn post(&self, slug: &str) -> Result<Post, StoreError>;

    /// Every stored post, in unspecified order.
    fn posts(&self) -> Result<Vec<Post>, StoreError>;

    /// Delete a post. Raw and compiled content go together.
    fn remove_post(&self, slug: &str) -> Result<(), StoreError>;

    /// Insert or replace a page under its slug.
    fn put_page(&self, page: Page) -> Result<(), StoreError>;

    /// Fetch one page by slug.
    fn page(&self, slug: &str) -> Result<Page, StoreError>;

    /// Every stored page, sorted by navigation order.
    fn pages(&self) -> Result<Vec<Page>, StoreError>;

    /// Delete a page.
    fn remove_page(&self, slug: &str) -> Result<(), StoreError>;

    /// Insert or replace a social link under its name.
    fn put_social_link(&self, link: SocialLink) -> Result<(), StoreError>;

    /// Every social link, sorted by display order.
    fn social_links(&self) -> Result<Vec<SocialLink>, StoreError>;
}

/// In-memory store.
///
/// `RwLock`-guarded maps keyed by slug. Suitable as a test double and
/// for single-process deployments.
///
/// # Panics
///
/// Methods panic if an internal lock is poisoned.
#[derive(Debug, Default)]
pub struct MemoryStore {
    posts: RwLock<HashMap<String, Post>>,
    pages: RwLock<HashMap<String, Page>>,
    links: RwLock<HashMap<String, SocialLink>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ContentStore for MemoryStore {
    fn put_post(&self, post: Post) -> Result<(), StoreError> {
        self.posts.write().unwrap().insert(post.slug.clone(), post);
        Ok(())
    }

    fn post(&self, slug: &str) -> Result<Post, StoreError> {
        self.posts
            .read()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(slug.to_owned()))
    }

    fn posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(self.posts.read().unwrap().values().cloned().collect())
    }

    fn remove_post(&self, slug: &str) -> Result<(), StoreError> {
        self.posts
            .write()
            .unwrap()
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(slug.to_owned()))
    }

    fn put_page(&self, page: Page) -> Result<(), StoreError> {
        self.pages.write().unwrap().insert(page.slug.clone(), page);
        Ok(())
    }

    fn page(&self, slug: &str) -> Result<Page, StoreError> {
        self.pages
            .read()
            .unwrap()
            .get(slug)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(slug.to_owned()))
    }

    fn pages(&self) -> Result<Vec<Page>, StoreError> {
        let mut pages: Vec<Page> = self.pages.read().unwrap().values().cloned().collect();
        pages.sort_by_key(|p| p.order);
        Ok(pages)
    }

    fn remove_page(&self, slug: &str) -> Result<(), StoreError> {
        self.pages
            .write()
            .unwrap()
            .remove(slug)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(slug.to_owned()))
    }

    fn put_social_link(&self, link: SocialLink) -> Result<(), StoreError> {
        self.links.write().unwrap().insert(link.name.clone(), link);
        Ok(())
    }

    fn social_links(&self) -> Result<Vec<SocialLink>, StoreError> {
        let mut links: Vec<SocialLink> = self.links.read().unwrap().values().cloned().collect();
        links.sort_by_key(|l| l.order);
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PageDraft, PostDraft};

    fn sample_post(slug: &str) -> Post {
        PostDraft::new(slug, slug.to_uppercase())
            .with_raw_content("body")
            .into_post("<p>body</p>\n".to_owned())
    }

    #[test]
    fn test_put_and_get_post() {
        let store = MemoryStore::new();
        store.put_post(sample_post("a")).unwrap();
        let post = store.post("a").unwrap();
        assert_eq!(post.title, "A");
    }

    #[test]
    fn test_get_missing_post() {
        let store = MemoryStore::new();
        assert_eq!(
            store.post("missing"),
            Err(StoreError::NotFound("missing".to_owned()))
        );
    }

    #[test]
    fn test_put_replaces_whole_post() {
        let store = MemoryStore::new();
        store.put_post(sample_post("a")).unwrap();

        let mut updated = sample_post("a");
        updated.raw_content = "new".to_owned();
        updated.content = "<p>new</p>\n".to_owned();
        store.put_post(updated).unwrap();

        let post = store.post("a").unwrap();
        assert_eq!(post.raw_content, "new");
        assert_eq!(post.content, "<p>new</p>\n");
    }

    #[test]
    fn test_remove_post_deletes_both_bodies() {
        let store = MemoryStore::new();
        store.put_post(sample_post("a")).unwrap();
        store.remove_post("a").unwrap();
        assert!(matches!(store.post("a"), Err(StoreError::NotFound(_))));
        assert_eq!(
            store.remove_post("a"),
            Err(StoreError::NotFound("a".to_owned()))
        );
    }

    #[test]
    fn test_pages_sorted_by_order() {
        let store = MemoryStore::new();
        store
            .put_page(PageDraft::new("b", "B", 2).into_page(String::new()))
            .unwrap();
        store
            .put_page(PageDraft::new("a", "A", 1).into_page(String::new()))
            .unwrap();
        let slugs: Vec<_> = store.pages().unwrap().into_iter().map(|p| p.slug).collect();
        assert_eq!(slugs, vec!["a", "b"]);
    }

    #[test]
    fn test_social_links_sorted_by_order() {
        let store = MemoryStore::new();
        store
            .put_social_link(SocialLink {
                name: "mastodon".to_owned(),
                url: "https://m".to_owned(),
                order: 2,
            })
            .unwrap();
        store
            .put_social_link(SocialLink {
                name: "github".to_owned(),
                url: "https://g".to_owned(),
                order: 1,
            })
            .unwrap();
        let names: Vec<_> = store
            .social_links()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["github", "mastodon"]);
    }
}

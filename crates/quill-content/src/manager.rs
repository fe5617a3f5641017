//! Compile-on-save trigger.
//!
//! [`ContentManager`] is the only write path for post and page bodies.
//! Saving compiles `raw_content` and persists raw and compiled strings
//! together, synchronously, before the call returns; a reader can never
//! observe a post whose compiled cache lags its source. There is no
//! background recompilation path, and none is needed: compilation is
//! cheap and paid once per edit.

use std::sync::Arc;

use tracing::{debug, info};

use quill_markup::Compiler;

use crate::model::{Page, PageDraft, Post, PostDraft};
use crate::store::{ContentStore, StoreError};

/// Content-management entry point: owns the compiler and a store handle.
pub struct ContentManager {
    store: Arc<dyn ContentStore>,
    compiler: Compiler,
}

impl ContentManager {
    /// Create a manager over a store with a configured compiler.
    ///
    /// The compiler's rule set is fixed here; every save goes through
    /// the same set, so stored documents stay mutually consistent.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, compiler: Compiler) -> Self {
        Self { store, compiler }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn ContentStore> {
        &self.store
    }

    /// Compile and persist a post draft.
    ///
    /// Upsert semantics: an existing post under the same slug is
    /// replaced wholesale, so editing `raw_content` always recompiles.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend rejects the write. The
    /// compile step itself cannot fail.
    pub fn save_post(&self, draft: PostDraft) -> Result<Post, StoreError> {
        let content = self.compiler.compile(&draft.raw_content);
        let post = draft.into_post(content);
        debug!(
            slug = %post.slug,
            raw_bytes = post.raw_content.len(),
            html_bytes = post.content.len(),
            "compiled post"
        );
        self.store.put_post(post.clone())?;
        info!(slug = %post.slug, published = post.published, "saved post");
        Ok(post)
    }

    /// Delete a post; source and compiled cache go together.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no post has the slug.
    pub fn delete_post(&self, slug: &str) -> Result<(), StoreError> {
        self.store.remove_post(slug)?;
        info!(slug, "deleted post");
        Ok(())
    }

    /// Compile and persist a page draft.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backend rejects the write.
    pub fn save_page(&self, draft: PageDraft) -> Result<Page, StoreError> {
        let content = self.compiler.compile(&draft.raw_content);
        let page = draft.into_page(content);
        debug!(slug = %page.slug, html_bytes = page.content.len(), "compiled page");
        self.store.put_page(page.clone())?;
        Ok(page)
    }

    /// Delete a page.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] when no page has the slug.
    pub fn delete_page(&self, slug: &str) -> Result<(), StoreError> {
        self.store.remove_page(slug)?;
        info!(slug, "deleted page");
        Ok(())
    }
}

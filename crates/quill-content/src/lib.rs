//! Content model and compile-on-save boundary for the quill platform.
//!
//! Posts carry their author-written extended-markdown source and a
//! compiled HTML cache side by side; [`ContentManager`] is the only
//! write path and keeps the two in lockstep by recompiling on every
//! save. Reading goes through [`ContentStore`] plus the pure query
//! functions in [`query`].
//!
//! # Architecture
//!
//! - [`model`]: entities ([`Post`], [`Page`], [`SocialLink`]) and their
//!   draft types.
//! - [`store`]: the persistence trait and the in-memory backend.
//! - [`manager`]: the compile-on-save trigger.
//! - [`query`]: publish gating, ordering, pagination and tag queries.
//!
//! The HTTP layer, admin UI, feeds and authentication are external
//! collaborators: they drive this crate's API and never reach around it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use quill_content::{ContentManager, MemoryStore, PostDraft, Viewer, query};
//! use quill_markup::{Compiler, CompilerConfig};
//!
//! let compiler = Compiler::new(CompilerConfig::new().with_all_constructs());
//! let manager = ContentManager::new(Arc::new(MemoryStore::new()), compiler);
//!
//! manager.save_post(
//!     PostDraft::new("hello", "Hello")
//!         .with_published(true)
//!         .with_raw_content("This !-- is endash"),
//! )?;
//!
//! let posts = manager.store().posts()?;
//! let front_page = query::latest(&posts, Viewer::Reader, 5);
//! assert_eq!(front_page.len(), 1);
//! # Ok::<(), quill_content::StoreError>(())
//! ```

mod manager;
pub mod model;
pub mod query;
mod store;

pub use manager::ContentManager;
pub use model::{Page, PageDraft, Post, PostDraft, SocialLink};
pub use query::{PageWindow, Viewer};
pub use store::{ContentStore, MemoryStore, StoreError};

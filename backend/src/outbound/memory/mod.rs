//! In-process store used when no database is configured and in tests.

mod in_memory_forum_store;

pub use in_memory_forum_store::InMemoryForumStore;

//! Core types for the newsheat aggregator
//!
//! This crate defines the shared data structures used across the workspace:
//! extracted news records, their ranked form, file-share link records and
//! the source configuration consumed by the fetch layer.

pub mod error;
pub mod links;
pub mod news;
pub mod source;

pub use error::{NewsheatError, NewsheatResult};
pub use links::{LinkRecord, MediaKind, PageRef, PanKind};
pub use news::{Article, RankedArticle, SearchResult, Sourced, OFFICIAL_BLOG_CATEGORY};
pub use source::{Region, SourceConfig, SourceKind, SourceList};

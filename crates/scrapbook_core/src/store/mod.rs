//! Scrapbook store use-case layer.
//!
//! # Responsibility
//! - Orchestrate collection mutations over an injected repository.
//! - Keep UI layers decoupled from storage details.
//!
//! # Invariants
//! - All state mutations go through [`scrapbook::ScrapbookStore`]; no
//!   external component mutates the collections directly.

pub mod scrapbook;

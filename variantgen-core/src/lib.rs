//! # variantgen-core
//!
//! Core types for the variantgen content generation pipeline.
//!
//! This crate defines the canonical content document model shared by the
//! extraction, validation and generation crates:
//!
//! - **[`SeoContent`]**: the typed SEO section tree produced by a backend
//! - **[`VariantDocument`]**: the assembled variant page document
//! - **[`SectionKey`]** and page-structure generation with the fixed
//!   FAQ/CTA tail
//! - **[`Topic`]**: keyword parsing (`"primary|alt1|alt2"`) and slugs
//! - **[`SourceCache`]**: an explicit read-through cache of source
//!   documents, keyed by tool type
//!
//! Sections are deserialized *leniently*: a section that is present but
//! malformed degrades to `None` instead of failing the whole document, so
//! a partially usable document always survives parsing.

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod cache;
pub mod document;
pub mod structure;
pub mod topic;
pub mod variant;

pub use cache::{SourceCache, SourceDocument};
pub use document::{
    BenefitsSection, CtaSection, ExamplesSection, FaqSection, Feature, HeroSection,
    HowToUseSection, MetaSection, SeoContent, Step, WhatIsSection,
};
pub use structure::{
    deterministic_structure, random_structure, validate_structure, SectionKey,
};
pub use topic::Topic;
pub use variant::{default_style, tool_category, VariantConfig, VariantDocument};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        random_structure, SectionKey, SeoContent, SourceCache, SourceDocument, Topic,
        VariantConfig, VariantDocument,
    };
}

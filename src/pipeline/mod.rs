//! Component extraction: raw YAML defaults -> ordered inputs -> component records.

pub mod collator;
pub mod collector;
pub mod document;
pub mod extractor;
pub mod normalizer;

pub use collator::{collate, Input};
pub use collector::Collector;
pub use extractor::{
    component_name, extract, extract_file, Component, DescriptionLookup, NoDescriptions,
    SiblingDescriptions,
};
pub use normalizer::{normalize, DefaultValue};

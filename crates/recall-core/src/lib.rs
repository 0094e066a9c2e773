//! recall-core: content generation, recall correction and scoring for
//! memory-sport training.
//!
//! A memo's content is generated or parsed once. Each recall attempt is
//! classified cell by cell, scored on its attempted prefix and normalized
//! into points with a time-class coefficient.

pub mod corrector;
pub mod engine;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;
pub mod points;
pub mod pools;
pub mod registry;
pub mod scoring;
pub mod service;
pub mod store;

//! `cubetools` is a small toolkit for CP2K cube files
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use cubetools_cube as cube;

#[doc(inline)]
pub use cubetools_utils as utils;

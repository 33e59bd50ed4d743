//! Festival lineup genre sorter - shared modules for all binaries.

pub mod genre;
pub mod index;
pub mod input;
pub mod matcher;
pub mod models;
pub mod normalize;
pub mod parse;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod safety;

//! Element primitives - the declarative input of a render.
//!
//! This module provides:
//! - [`Element`] - immutable `{type, props}` descriptor with ordered children
//! - [`create_element`] / [`element!`](crate::element) - the factory
//! - JSON interchange with shape validation ([`Element::from_json`])
//!
//! Elements are consumed by the fiber builder and never mutated. Every render
//! call takes a fresh element tree; nothing is retained between cycles.

mod types;
mod element;
mod json;

pub use types::*;
pub use element::{attrs, create_element, create_text_element};
pub(crate) use json::shape_error;

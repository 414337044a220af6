//! Chronolane Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Chronolane layout
//! engine and its renderers:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Colors**: CSS color parsing ([`color::Color`])
//! - **Geometry**: Points, sizes and bounding boxes ([`geometry`] module)
//! - **Draw**: Rectangles, labels and layered SVG output ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;

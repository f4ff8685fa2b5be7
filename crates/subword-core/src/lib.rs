//! # subword-core: sub-word caret navigation
//!
//! Moves, extends and deletes by the pieces of an identifier (`camel|Case`,
//! `SOME|_CONSTANT`, `with|12345|words`) rather than by whole words.
//!
//! The navigation core is pure and works over any [`document::Document`]:
//!
//! - **[`class`]**: five character classes, the basis of every boundary
//! - **[`scan`]**: the text ahead of a caret, one line at a time, lazily
//! - **[`boundary`]**: where a single motion from one position lands
//! - **[`command`]**: the six commands applied to a list of selections
//!
//! Around it sit the editor pieces the core only talks to through values:
//!
//! - **[`position`]**: `Position` (line, col) and `Range`, 0-indexed
//! - **[`selection`]**: anchor/active pairs
//! - **[`buffer`]**: a rope-backed `Buffer` that implements `Document`
//! - **[`history`]**: undo/redo, one transaction per delete command
//! - **[`editor`]**: ties buffer, selections and history together
//! - **[`markup`]**: `this^Is[Camel}Case` text notation for tests and the CLI

pub mod boundary;
pub mod buffer;
pub mod class;
pub mod command;
pub mod document;
pub mod editor;
pub mod history;
pub mod markup;
pub mod position;
pub mod scan;
pub mod selection;

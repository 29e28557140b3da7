//! Declarative table rendering engine
//!
//! Derives a complete, view-agnostic render model from a table
//! configuration and a collection of items: header cells, body rows with
//! resolved cell content, detail rows, selection state and the preamble
//! layout for the search and action bars.
//!
//! Layers, leaf first:
//! - `filter`: named and functional value transforms
//! - `cell`: content of one (item, column) pair
//! - `columns`: config validation and header structure
//! - `rows`: primary and detail rows
//! - `layout`: preamble grid spans
//! - `controller`: owns selection/expansion state and composes the rest

pub mod action;
pub mod cell;
pub mod columns;
pub mod config;
pub mod error;
pub mod filter;
pub mod layout;
pub mod model;
pub mod rows;
pub mod selection;
pub mod template;
pub mod view;

mod controller;

pub use controller::*;
pub use error::Error;

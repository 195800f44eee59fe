//! Server-rendered project profile pages.
//!
//! A page is driven by a [`core::lifecycle::PageController`]: it reads one
//! [`types::ProjectRecord`] from the project service and settles on `Ready`
//! or `Failed`. [`render::project`] maps that state to a view, and
//! [`server`] serves the result over HTTP.

pub mod cli;
pub mod core;
pub mod logging;
pub mod render;
pub mod server;
pub mod types;

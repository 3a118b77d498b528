//! Headless editor engine for the lead-magnet funnel builder.
//!
//! The crate owns every piece of editor state that the UI layer reads from:
//! which editing surface is active, which funnel page is previewed, which
//! preview element is selected for inline styling, the chat conversations that
//! drive edits, and the active theme palette. A host (browser bridge, terminal
//! driver, or the bundled binary) forwards user events into [`shell::EditorShell`]
//! and reacts to the [`shell::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`shell`] | Top-level editor state composing all models |
//! | [`session`] | Async driver that runs assistant replies on tokio tasks |
//! | [`navigator`] | Editor mode / preview page state machine |
//! | [`selection`] | Selected preview element and its style snapshot |
//! | [`conversation`] | Chat channels, messages, and reply generations |
//! | [`theme`] | Palette catalog and active theme colors |
//! | [`doc`] | Arena of mounted preview nodes addressed by stable id |
//! | [`templates`] | Marketing copy and layout for each funnel page |
//! | [`render`] | Pure preview rendering over the models above |
//! | [`style`] | Text style normalization (weights, font families) |
//! | [`responder`] | Completion collaborator behind the assistant replies |
//! | [`asset`] | Image / icon asset collaborator |
//! | [`config`] | Environment-driven editor configuration |
//! | [`consts`] | Shared constants (latencies, weight buckets, prompts) |

pub mod asset;
pub mod config;
pub mod consts;
pub mod conversation;
pub mod doc;
pub mod navigator;
pub mod render;
pub mod responder;
pub mod selection;
pub mod session;
pub mod shell;
pub mod style;
pub mod templates;
pub mod theme;

//! # Twisted Core Library
//!
//! State and network logic behind the TwistedStacks design architect: which
//! page elements are selected, whether the architect overlay is open, and the
//! requests sent to the hosted generative endpoints. Nothing here depends on a
//! particular rendering surface.
//!
//! ## Modules
//!
//! - `selection`: overlay toggling, selection set, keystroke trigger
//! - `orchestrator`: text and image requests, transcript, generated asset
//! - `cloud`: `generateContent` client and the `GenerativeBackend` seam
//! - `settings`: configuration loading and validation
//! - `catalog`: the selectable landing page elements
//! - `theme`: palette for rendering surfaces

pub mod asset;
pub mod catalog;
pub mod cloud;
pub mod error;
pub mod keystrokes;
pub mod orchestrator;
pub mod prompts;
pub mod selection;
pub mod settings;
pub mod theme;
pub mod transcript;

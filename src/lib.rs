//! ImagenFlow - AI image generation sidecar for content editors
//!
//! Exposes a small HTTP API that summarizes article content into a visual
//! prompt, generates images through Google's Gemini/Imagen API, and ingests
//! the results into a local media library with SEO metadata attached.

pub mod ai;
pub mod app;
pub mod config;
pub mod error;
pub mod image;
pub mod media;
pub mod models;
pub mod prompts;
pub mod server;

pub use error::{Error, Result};

//! Source renderers for generated modules.
//!
//! A [`Renderer`] turns the language-neutral [`Module`] and [`TestSkeleton`]
//! into source text for one target language.

pub mod javascript;
pub mod rust;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ir::{Module, TestSkeleton};

pub use javascript::JavaScriptRenderer;
pub use rust::RustRenderer;

/// Formats generated modules for one target language.
pub trait Renderer {
    /// The language this renderer targets.
    fn language(&self) -> Language;

    /// Render a mocks or assertions module.
    fn render_module(&self, module: &Module) -> String;

    /// Render a test skeleton.
    fn render_test(&self, skeleton: &TestSkeleton) -> String;

    /// File extension without the dot.
    fn extension(&self) -> &'static str {
        self.language().extension()
    }
}

/// Target language of generated files.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Rust,

    #[serde(alias = "js")]
    #[value(name = "javascript", alias = "js")]
    JavaScript,
}

impl Language {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Language::Rust => "rs",
            Language::JavaScript => "js",
        }
    }

    /// The renderer for this language.
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            Language::Rust => Box::new(RustRenderer),
            Language::JavaScript => Box::new(JavaScriptRenderer),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Rust => write!(f, "rust"),
            Language::JavaScript => write!(f, "javascript"),
        }
    }
}

#![forbid(unsafe_code)]

//! # frost - reflection metadata generator
//!
//! Scans C++ headers for annotated declarations and generates the
//! `frost::Meta<T>` specializations consumed by the frost runtime reflection
//! library (editor property panels, enum name dictionaries, refresh hooks).
//!
//! ## Annotations
//!
//! - `WCLASS()` before `class Name { ... }`
//! - `WENUM()` before `enum Name { ... }`
//! - `WPROPERTY(edit, min, max, step, format)` on the line before a member
//! - `WREFRESH()` on the line before the refresh method
//!
//! ## Example
//!
//! ```rust,no_run
//! use frost::{Config, Generator};
//!
//! fn main() -> anyhow::Result<()> {
//!     let generator = Generator::new(&Config::default())?;
//!     let header = generator.generate_file("wsp_camera.hpp")?;
//!     print!("{}", header);
//!     Ok(())
//! }
//! ```

pub mod commands;
pub mod config;
pub mod emit;
pub mod error;
pub mod extract;
pub mod generate;
pub mod model;
pub mod naming;
pub mod resolve;
pub mod scan;

// Re-exports
pub use config::{ArgumentSplit, Config, Markers, OutputConfig, PropertyDefaults};
pub use emit::Emitter;
pub use error::{FrostError, Result};
pub use extract::{extract_enumerators, infer_declaration_from_next_line, split_arguments, Extractor};
pub use generate::Generator;
pub use model::{Declaration, DeclarationKind, Enumerator, Property, SourceSpan, SCOPE_SEPARATOR};
pub use naming::{prettify, prettify_member};
pub use resolve::{resolve_type_references, TypeIndex};
pub use scan::{extract_block, Scanner};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! # Bunkai
//!
//! Bunkai decompiles a restricted imperative source language into visual
//! program block graphs. A single pass over the parsed syntax tree builds
//! typed, connected blocks in a [`workspace::Workspace`], which can then be
//! serialized to editor-compatible XML or turned back into canonical source.
//!
//! Unsupported constructs never abort a run: they are logged through
//! [`tracing`] and skipped, so one unknown statement costs one gap in the
//! block graph instead of the whole file.
//!
//! ## Example
//!
//! ```rust
//! use bunkai::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut workspace = Workspace::new();
//!     decompile(&mut workspace, "var count = 0;\ncount += 1;\n")?;
//!
//!     println!("{}", workspace_to_xml(&workspace));
//!     println!("{}", workspace_to_code(&workspace));
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod codegen;
pub mod decompiler;
pub mod error;
pub mod parser;
pub mod prelude;
pub mod serializer;
pub mod workspace;

pub use decompiler::{decompile, decompile_source};

//! Document walking and filter passes.
//!
//! # Module Structure
//!
//! - `Filter` - Trait implemented by every filter (`prepare`, `inline`, `block`, `finalize`)
//! - `Action` - Keep or replace the visited node
//! - `Context` / `Scope` - Target format, converter and enclosing elements of a node
//! - `Walker` - One depth-first pass of one filter
//! - `Pipeline` - Several passes over one document
//!
//! # Example
//!
//! ```ignore
//! use texweave::transform::{Pipeline, Walker};
//!
//! let doc = Walker::new(&converter).run(doc, &mut filter)?;
//!
//! let doc = Pipeline::new(doc, &converter)
//!     .pipe(&mut glossary)?
//!     .pipe(&mut tables)?
//!     .into_inner();
//! ```

mod core;
mod pipeline;
mod walk;

pub use self::core::{Action, Context, Filter, Scope};
pub use self::pipeline::Pipeline;
pub use self::walk::Walker;

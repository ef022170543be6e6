//! Detach/attach engine for lazymodel entity graphs.
//!
//! The engine turns a live entity graph into a form safe to serialize across
//! a request boundary, and back:
//!
//! - **Detach** walks the graph and replaces every uninitialized lazy
//!   reference (scalar proxy or persistent collection handle) with a compact
//!   [`DetachedProperty`] record on the model's [`ModelCallback`], severing
//!   all session-bound state.
//! - **Attach** takes each record plus a fresh session and materializes a
//!   proxy or an uninitialized collection handle, registered in the session's
//!   persistence context so lazy loading resumes normally.
//!
//! # Example
//!
//! ```ignore
//! let mut callback = ModelCallback::new();
//! Detacher::new(&mut callback).detach(&root)?;
//! // ... serialize, next request ...
//! let attacher = Attacher::new(&finder);
//! for owner in callback.owners() {
//!     for record in callback.properties_of(&owner).to_vec() {
//!         let value = attacher.attach(&owner, &record)?;
//!         helper::write(&owner, record.property(), value)?;
//!     }
//!     callback.clear(&owner);
//! }
//! ```

pub mod attach;
pub mod callback;
pub mod detach;
pub mod helper;
pub mod property;
pub mod seen;
#[cfg(test)]
mod testutil;

pub use attach::Attacher;
pub use callback::ModelCallback;
pub use detach::Detacher;
pub use property::{CollectionProperty, DetachedProperty, ScalarProperty};
pub use seen::Seen;

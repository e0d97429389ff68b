//! Page objects for browser-driven UI tests.
//!
//! A page object knows how to reach a page, how to tell that the page has loaded, and which
//! accessibility rules apply to it. Visiting a page drives navigation, waits for readiness
//! and, when the run-wide policy asks for it, audits the loaded DOM before handing control
//! back to the test.

pub mod errors;
mod page;
mod readiness;

pub use errors::*;
pub use page::*;
pub use readiness::*;

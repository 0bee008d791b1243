//! Command handlers.
//!
//! | Module | Commands | Target |
//! |--------|----------|--------|
//! | `tree` | 5 | the shared [`Tree`](firetest_core::Tree) |

pub mod tree;

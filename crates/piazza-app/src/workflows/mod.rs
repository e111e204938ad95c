//! # Workflows
//!
//! Asynchronous fetch operations. Each follows the three-phase contract
//! against its domain store (the optimistic like toggle is the documented
//! exception - it skips the loading phase):
//!
//! 1. start: `is_loading = true`, `error = None`
//! 2. success: commit the payload, `is_loading = false`
//! 3. failure: `is_loading = false`, `error` set to the collaborator's
//!    message text, falling back to the operation's fixed default
//!
//! Failures also queue an error toast. Collaborator errors never cross
//! into the view layer unhandled: the terminal state transition always
//! commits before the workflow returns, and the returned `Result` exists
//! only for callers that want to chain on completion.
//!
//! There is no cancellation token. A stale in-flight fetch whose response
//! arrives after a newer one still commits - last dispatch wins, an
//! accepted tradeoff for client-only consistency.

pub mod auth;
pub mod messaging;
pub mod notifications;
pub mod posts;
pub mod session;

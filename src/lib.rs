// Library root
// -----------
// This crate pushes locally written article drafts into a WordPress site
// as draft posts. The binary (`main.rs`) wires these modules together.
//
// Module responsibilities:
// - `config`: Loads the site URL and Basic auth credentials from the
//   environment (optionally seeded from `.env`).
// - `drafts`: Finds `drafts/*.json` and parses each into a `Draft`.
// - `api`: Encapsulates HTTP interactions with WordPress (create draft
//   post, set article description).
// - `push_log`: Appends one JSON line per pushed draft.
// - `push`: Runs the per-draft flow and reports progress.
pub mod api;
pub mod config;
pub mod drafts;
pub mod push;
pub mod push_log;

//! Core launcher for TubeMagic Hub.
//!
//! One launcher run reads the `API_KEY` secret, checks that `index.html`
//! exists in the content root, and produces an [`embed::Embed`] describing
//! how the dashboard is framed: either the page text with a script tag
//! spliced after `<head>`, or a static component invoked with an `api_key`
//! argument. [`host::HostPage`] turns the outcome of a run, success or
//! failure, into the hosting page the user sees.
//!
//! Runs are stateless. Nothing is cached between them.

pub mod embed;
pub mod error;
pub mod host;
pub mod inject;
pub mod launcher;
pub mod page;

pub use tubemagic_secrets as secrets;

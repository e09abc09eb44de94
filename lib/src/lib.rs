#![doc = svgbobdoc::transform!(
//! Turns a directory of markdown posts into the blog of a static site.
//!
//! # Overview
//!
//! A build reads every post in the content directory, renders it, and writes
//! a list page plus one detail page per post into the output directory,
//! next to a verbatim copy of the rest of the site:
//!
//! ```svgbob
//!  +--------------+     +--------------+     +----------+
//!  | content/*.md +---->| front matter +---->| markdown |
//!  +--------------+     +--------------+     +----+-----+
//!                                                 |
//!                                                 v
//!  +------------+       +--------+           +----------+
//!  | index.html +------>| layout |           |  posts   |
//!  +------------+       +---+----+           +----+-----+
//!                           |                     |
//!                           +----------+----------+
//!                                      |
//!                                      v
//!                      +---------------+--------+
//!                      | blog/index.html        |
//!                      | blog/<slug>/index.html |
//!                      +---------------+--------+
//!                                      |
//!                                      v
//!                             +--------+--------+
//!                             | output: public/ |
//!                             +-----------------+
//! ```
//!
//! The pieces, leaf first:
//!
//!   * [`frontmatter`] splits a post into its YAML (`---`) or TOML (`+++`)
//!     metadata block and markdown body.
//!   * [`markdown`] renders the body: GitHub-flavored markdown, newlines as
//!     line breaks, bare URLs as links.
//!   * [`post`] reads the content directory into sorted [`post::Post`]s.
//!   * [`layout`] extracts the shared header and footer from the site's
//!     reference page and assembles full documents around page bodies.
//!   * [`page`] renders the list page and each post's detail page.
//!   * [`site`] ties it together: [`site::Site::build`] wipes the output,
//!     copies the static site into it, and writes the generated pages.
//!
//! Everything between reading the sources and writing the output is a pure
//! function of the inputs and [`config::Settings`], so two builds of the
//! same tree produce the same bytes.
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod url;
pub mod format;
pub mod config;
pub mod date;
pub mod frontmatter;
pub mod markdown;
pub mod post;
pub mod layout;
pub mod page;
pub mod site;

pub use config::Settings;
pub use site::{BuildReport, Site};

#[doc(hidden)]
pub use log;

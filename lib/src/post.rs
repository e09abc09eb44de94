use std::path::{Path, PathBuf};
use std::fs;

use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::config::Settings;
use crate::date::{format_timestamp, parse_timestamp};
use crate::error::{Chainable, Result};
use crate::frontmatter::FrontMatter;
use crate::markdown::Markdown;

/// File extensions read as posts.
pub const POST_EXTS: &[&str] = &["md", "markdown", "mdown"];

/// A single blog post, fully rendered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Publish time in epoch milliseconds; `0` when missing or invalid.
    pub published: i64,
    /// `published` in the site's locale; empty when `published` is `0`.
    pub formatted_date: String,
    pub tags: Vec<String>,
    pub featured_image: Option<String>,
    pub html: String,
    #[serde(skip)]
    pub source: PathBuf,
}

impl Post {
    /// Builds a post from the contents of the file at `source`. Nothing is
    /// read from disk: `source` only names the slug and diagnostics.
    ///
    /// The slug is the file name without its extension, as is.
    pub fn parse(source: &Path, text: &str, settings: &Settings, markdown: &Markdown) -> Result<Post> {
        let slug = source.file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
            return err! {
                "post file name is not a usable slug",
                "path" => source.display(),
            };
        }

        let (front_matter, body) = FrontMatter::split(text).chain_with(|| error! {
            "invalid post front matter",
            "path" => source.display(),
        })?;

        let published = front_matter.date.as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(0);

        Ok(Post {
            title: front_matter.title.unwrap_or_else(|| slug.clone()),
            description: front_matter.description.unwrap_or_default(),
            formatted_date: format_timestamp(published, &settings.lang),
            published,
            tags: front_matter.tags,
            featured_image: front_matter.featured_image,
            html: markdown.render(body),
            source: source.to_path_buf(),
            slug,
        })
    }

    /// Posts without a date sort after every dated post.
    fn sort_key(&self) -> (bool, i64) {
        (self.published != 0, self.published)
    }

    /// The formatted date and the tags joined by ` · `, empty parts omitted.
    pub fn meta_line(&self) -> String {
        std::iter::once(self.formatted_date.as_str())
            .chain(self.tags.iter().map(|t| t.as_str()))
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }
}

/// Sorts `posts` newest first. Undated posts go last; equal dates keep their
/// relative order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.sort_key().cmp(&a.sort_key()));
}

/// Reads every post file directly inside `dir`, newest first. A missing
/// directory yields no posts. Any unreadable or malformed file, or two files
/// with the same slug, fails the whole batch.
pub fn collect_posts(dir: &Path, settings: &Settings, markdown: &Markdown) -> Result<Vec<Post>> {
    if !dir.exists() {
        log::warn!("content directory {} does not exist; no posts", dir.display());
        return Ok(vec![]);
    }

    let mut sources = vec![];
    let entries = fs::read_dir(dir).chain_with(|| error! {
        "failed to list content directory",
        "path" => dir.display(),
    })?;

    for entry in entries {
        let path = entry?.path();
        let is_post = path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| POST_EXTS.contains(&ext));

        if is_post && path.is_file() {
            sources.push(path);
        }
    }

    sources.sort();
    let mut posts: Vec<Post> = sources.par_iter()
        .map(|path| {
            let text = fs::read_to_string(path).chain_with(|| error! {
                "failed to read post",
                "path" => path.display(),
            })?;

            Post::parse(path, &text, settings, markdown)
        })
        .collect::<Result<_>>()?;

    let mut seen: FxHashMap<&str, &Path> = FxHashMap::default();
    for post in &posts {
        if let Some(first) = seen.insert(post.slug.as_str(), post.source.as_path()) {
            return err! {
                "two posts share a slug",
                "slug" => post.slug,
                "first" => first.display(),
                "second" => post.source.display(),
            };
        }
    }

    sort_posts(&mut posts);
    for post in &posts {
        log::debug!("post {} ({})", post.slug, post.source.display());
    }

    Ok(posts)
}

use std::fs;
use std::path::{Path, PathBuf};

use derive_more::Debug;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use crate::config::Settings;
use crate::error::{Chainable, Result};
use crate::layout::Layout;
use crate::markdown::Markdown;
use crate::page::{render_list, render_post};
use crate::post::{collect_posts, Post};
use crate::util::time;

/// Where a build writes its pages.
///
/// Paths handed to an `Output` are relative to the output root.
pub trait Output {
    /// Removes everything previously written and leaves an empty root.
    fn clear(&mut self) -> Result<()>;

    /// Copies the tree at `root` into the output, leaving out top-level
    /// entries that `denylist` names or that start with `.git`. Returns the
    /// number of files copied.
    fn copy_tree(&mut self, root: &Path, denylist: &FxHashSet<String>) -> Result<usize>;

    /// Writes `contents` to `path`, creating parent directories as needed.
    fn write(&mut self, path: &Path, contents: &str) -> Result<()>;
}

/// An `Output` backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DiskOutput {
    dir: PathBuf,
}

/// Counts of what a build produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub pages: usize,
    pub copied: usize,
}

/// A project: the root of the static site plus the settings it builds with.
#[derive(Debug)]
pub struct Site {
    pub root: PathBuf,
    pub settings: Settings,
    #[debug(ignore)]
    pub markdown: Markdown,
}

fn is_denied(name: &str, denylist: &FxHashSet<String>) -> bool {
    name.starts_with(".git") || denylist.contains(name)
}

impl DiskOutput {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        DiskOutput { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Output for DiskOutput {
    fn clear(&mut self) -> Result<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).chain_with(|| error! {
                "failed to remove output directory",
                "path" => self.dir.display(),
            })?;
        }

        fs::create_dir_all(&self.dir).chain_with(|| error! {
            "failed to create output directory",
            "path" => self.dir.display(),
        })
    }

    fn copy_tree(&mut self, root: &Path, denylist: &FxHashSet<String>) -> Result<usize> {
        let (denylist, output) = (denylist.clone(), self.dir.clone());
        let walker = jwalk::WalkDir::new(root)
            .sort(true)
            .skip_hidden(false)
            .follow_links(true)
            .process_read_dir(move |_, _, _, children| {
                children.retain(|entry| match entry {
                    Ok(e) if e.depth == 1 && is_denied(&e.file_name.to_string_lossy(), &denylist) => false,
                    Ok(e) => e.path() != output,
                    Err(_) => true,
                });
            });

        let mut copied = 0;
        for entry in walker {
            let entry = entry?;
            if entry.depth == 0 {
                continue;
            }

            let path = entry.path();
            let target = self.dir.join(path.strip_prefix(root)?);
            if entry.file_type.is_dir() {
                fs::create_dir_all(&target).chain_with(|| error! {
                    "failed to create output directory",
                    "path" => target.display(),
                })?;
            } else {
                fs::copy(&path, &target).chain_with(|| error! {
                    "failed to copy static file",
                    "from" => path.display(),
                    "to" => target.display(),
                })?;

                copied += 1;
            }
        }

        Ok(copied)
    }

    fn write(&mut self, path: &Path, contents: &str) -> Result<()> {
        let target = self.dir.join(path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).chain_with(|| error! {
                "failed to create output directory",
                "path" => parent.display(),
            })?;
        }

        fs::write(&target, contents).chain_with(|| error! {
            "failed to write page",
            "path" => target.display(),
        })
    }
}

impl Site {
    pub fn new<P: Into<PathBuf>>(root: P, settings: Settings) -> Site {
        Site { root: root.into(), settings, markdown: Markdown::default() }
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.settings.output)
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.settings.content)
    }

    /// Every generated page as `(path, html)`, with paths relative to the
    /// output root: the list page first, then one page per post in order.
    pub fn pages(&self, posts: &[Post], layout: &Layout) -> Vec<(PathBuf, String)> {
        let list = (PathBuf::from("blog/index.html"), render_list(posts, layout, &self.settings));
        let details: Vec<_> = posts.par_iter()
            .map(|post| {
                let path = Path::new("blog").join(&post.slug).join("index.html");
                (path, render_post(post, layout, &self.settings))
            })
            .collect();

        std::iter::once(list).chain(details).collect()
    }

    /// Builds the site into its output directory, replacing whatever was
    /// there.
    pub fn build(&self) -> Result<BuildReport> {
        let output = self.output_dir();
        if let (Ok(output), Ok(root)) = (output.canonicalize(), self.root.canonicalize()) {
            if root.starts_with(&output) {
                return err! {
                    "output directory contains the project root",
                    "output" => output.display(),
                    "root" => root.display(),
                };
            }
        }

        self.build_into(&mut DiskOutput::new(output))
    }

    /// Builds the site into `output`. Nothing is cleared or written unless
    /// the layout and every post load successfully.
    pub fn build_into<O: Output>(&self, output: &mut O) -> Result<BuildReport> {
        let layout = Layout::load(&self.root, &self.settings)?;
        let posts = time!("collecting posts", {
            collect_posts(&self.content_dir(), &self.settings, &self.markdown)
        })?;

        output.clear()?;
        let copied = time!("copying static files", {
            output.copy_tree(&self.root, &self.settings.copy_denylist())
        })?;

        log::debug!("copied {} static files", copied);
        let pages = time!("rendering pages", self.pages(&posts, &layout));
        for (path, html) in &pages {
            output.write(path, html)?;
        }

        Ok(BuildReport { posts: posts.len(), pages: pages.len(), copied })
    }
}

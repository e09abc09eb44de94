use std::path::{Path, PathBuf, Component};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::{Format, Toml};
use crate::url::UrlBuf;

/// Name of the optional settings file at the project root.
pub const CONFIG_FILE: &str = "quill.toml";

/// Site-wide settings. Every field has a default, so an absent or partial
/// `quill.toml` is fine.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Absolute base URL of the site; canonical URLs are rooted here.
    pub url: UrlBuf,
    pub name: String,
    /// Social-share image used when a page has none of its own.
    pub default_image: String,
    pub lang: String,
    pub og_locale: String,
    pub theme_color: String,
    pub stylesheet: String,
    pub script: String,
    /// Directory of markdown posts, relative to the project root.
    pub content: PathBuf,
    /// Output directory, relative to the project root.
    pub output: PathBuf,
    /// Page the header and footer are extracted from.
    pub reference: PathBuf,
    /// Dedicated layout file. Takes precedence over `reference`.
    pub layout: Option<PathBuf>,
    /// Extra top-level names left out of the static copy.
    pub exclude: Vec<String>,
    pub blog: BlogText,
}

/// The fixed copy used on generated pages.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlogText {
    pub title: String,
    pub description: String,
    pub kicker: String,
    pub heading: String,
    pub intro: String,
    pub empty: String,
    pub post_title_suffix: String,
    pub post_description: String,
    pub back: String,
    pub skip_link: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            url: UrlBuf::from("https://gibicomunica.com.br"),
            name: "Gibi Comunica".into(),
            default_image: "/assets/social-share.jpg".into(),
            lang: "pt-BR".into(),
            og_locale: "pt_BR".into(),
            theme_color: "#f97316".into(),
            stylesheet: "/css/style.css".into(),
            script: "/js/main.js".into(),
            content: PathBuf::from("content/blog"),
            output: PathBuf::from("public"),
            reference: PathBuf::from("index.html"),
            layout: None,
            exclude: vec![],
            blog: BlogText::default(),
        }
    }
}

impl Default for BlogText {
    fn default() -> Self {
        BlogText {
            title: "Blog | Gibi Comunica".into(),
            description: "Artigos sobre comunicação cultural, imprensa, redes e audiovisual no DF.".into(),
            kicker: "Blog".into(),
            heading: "Últimos artigos".into(),
            intro: "Conteúdos sobre imprensa, redes, audiovisual e gestão de temporada no DF.".into(),
            empty: "Nenhum post publicado ainda.".into(),
            post_title_suffix: "Blog Gibi Comunica".into(),
            post_description: "Conteúdo do blog Gibi Comunica.".into(),
            back: "&larr; Voltar para o blog".into(),
            skip_link: "Ir para o conteúdo principal".into(),
        }
    }
}

impl Settings {
    /// Loads settings for the project at `root`: from `explicit` if given
    /// (which must then exist), else from `root/quill.toml` if present, else
    /// the defaults.
    pub fn discover(root: &Path, explicit: Option<&Path>) -> Result<Settings> {
        if let Some(path) = explicit {
            return Toml::read(path);
        }

        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            return Toml::read(&path);
        }

        log::debug!("no {} in {}; using defaults", CONFIG_FILE, root.display());
        Ok(Settings::default())
    }

    /// `path` resolved against the site's base URL. Already absolute URLs
    /// (those with a scheme) are returned unchanged.
    ///
    /// ```rust
    /// use quire::config::Settings;
    ///
    /// let settings = Settings::default();
    /// assert_eq!(settings.absolute("/img/a.jpg").as_str(), "https://gibicomunica.com.br/img/a.jpg");
    /// assert_eq!(settings.absolute("img/a.jpg").as_str(), "https://gibicomunica.com.br/img/a.jpg");
    /// assert_eq!(settings.absolute("https://cdn.example.com/b.jpg").as_str(), "https://cdn.example.com/b.jpg");
    /// ```
    pub fn absolute(&self, path: &str) -> UrlBuf {
        let mut url = self.url.clone();
        url.append(path);
        url
    }

    pub fn default_image_url(&self) -> UrlBuf {
        self.absolute(&self.default_image)
    }

    /// Top-level entry names of the project root that are never copied into
    /// the output. Names starting with `.git` are excluded separately.
    pub fn copy_denylist(&self) -> FxHashSet<String> {
        let mut names: FxHashSet<String> = ["node_modules", "scripts", "blog", CONFIG_FILE]
            .into_iter()
            .map(String::from)
            .collect();

        names.extend(first_component(&self.output));
        names.extend(first_component(&self.content));
        names.extend(self.exclude.iter().cloned());
        names
    }
}

/// The top-level name a relative `path` lives under, if any.
fn first_component(path: &Path) -> Option<String> {
    match path.components().find(|c| *c != Component::CurDir)? {
        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_settings_keep_defaults() {
        let settings: Settings = Toml::from_str(r#"
            url = "https://example.com"
            exclude = ["drafts"]

            [blog]
            empty = "No posts yet."
        "#).unwrap();

        assert_eq!(settings.url.as_str(), "https://example.com");
        assert_eq!(settings.blog.empty, "No posts yet.");
        assert_eq!(settings.blog.kicker, "Blog");
        assert_eq!(settings.output, Path::new("public"));
        assert_eq!(settings.default_image_url().as_str(), "https://example.com/assets/social-share.jpg");
    }

    #[test]
    fn denylist_covers_build_inputs_and_outputs() {
        let settings = Settings {
            output: PathBuf::from("./dist/site"),
            exclude: vec!["drafts".into()],
            ..Settings::default()
        };

        let names = settings.copy_denylist();
        for name in ["dist", "content", "node_modules", "scripts", "blog", "drafts", CONFIG_FILE] {
            assert!(names.contains(name), "missing {name}");
        }

        assert!(!names.contains("public"));

        let settings = Settings { output: PathBuf::from("/srv/www"), ..Settings::default() };
        assert!(!settings.copy_denylist().contains("srv"));
    }
}

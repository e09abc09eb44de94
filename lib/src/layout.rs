use std::fmt::Write;
use std::path::Path;
use std::{fs, io};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Settings;
use crate::error::{Chainable, Result};
use crate::url::Url;
use crate::util::escape_html;

static BRAND: Lazy<Regex> = Lazy::new(|| element(r#"a\s[^>]*class="brand""#, "a"));
static NAV: Lazy<Regex> = Lazy::new(|| element(r"nav\b", "nav"));
static HEADER: Lazy<Regex> = Lazy::new(|| element(r"header\b", "header"));
static FOOTER: Lazy<Regex> = Lazy::new(|| element(r"footer\b", "footer"));

/// Matches the first `<open ...>...</close>` element, case-insensitively.
fn element(open: &str, close: &str) -> Regex {
    Regex::new(&format!(r"(?is)<{open}[^>]*>.*?</{close}\s*>")).expect("valid element regex")
}

/// What a page is, for `og:type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Website,
    Article,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PageKind::Website => "website",
            PageKind::Article => "article",
        }
    }
}

/// Per-page inputs to the document head. `title` and `description` are raw
/// text; they are escaped when rendered.
#[derive(Debug, Clone, Copy)]
pub struct Head<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub canonical: &'a Url,
    /// Social-share image. Falls back to the site default.
    pub image: Option<&'a Url>,
    pub kind: PageKind,
}

/// The header and footer shared by every generated page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    pub header: String,
    pub footer: String,
}

impl Layout {
    /// Loads the layout for the project at `root`: from the configured layout
    /// file if there is one, else from the reference page. A missing
    /// reference page falls back to the built-in header and footer.
    pub fn load(root: &Path, settings: &Settings) -> Result<Layout> {
        if let Some(layout) = &settings.layout {
            let path = root.join(layout);
            let html = fs::read_to_string(&path).chain_with(|| error! {
                "failed to read layout file",
                "path" => path.display(),
            })?;

            return Ok(Layout::extract(&html, settings));
        }

        let path = root.join(&settings.reference);
        match fs::read_to_string(&path) {
            Ok(html) => Ok(Layout::extract(&html, settings)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!("reference page {} not found; using fallback layout", path.display());
                Ok(Layout::fallback(settings))
            }
            Err(e) => Err(e).chain_with(|| error! {
                "failed to read reference page",
                "path" => path.display(),
            }),
        }
    }

    /// Pulls the header and footer out of a full HTML page.
    ///
    /// The header is the brand link and first `<nav>` wrapped in the site
    /// header, or failing those the page's first `<header>`. The footer is
    /// the first `<footer>`. Anything not found uses the fallback.
    pub fn extract(html: &str, settings: &Settings) -> Layout {
        let brand = BRAND.find(html).map(|m| m.as_str());
        let nav = NAV.find(html).map(|m| m.as_str());
        let header = match (brand, nav) {
            (None, None) => match HEADER.find(html) {
                Some(m) => m.as_str().to_string(),
                None => {
                    log::debug!("no header found in reference page; using fallback");
                    fallback_header(settings)
                }
            },
            (brand, nav) => format!(
                r#"<header class="site-header" id="topo"><div class="container header-inner">{}{}</div></header>"#,
                brand.unwrap_or_default(),
                nav.unwrap_or_default(),
            ),
        };

        let footer = match FOOTER.find(html) {
            Some(m) => m.as_str().to_string(),
            None => {
                log::debug!("no footer found in reference page; using fallback");
                fallback_footer(settings)
            }
        };

        Layout { header, footer }
    }

    pub fn fallback(settings: &Settings) -> Layout {
        Layout {
            header: fallback_header(settings),
            footer: fallback_footer(settings),
        }
    }

    /// Renders a full HTML document around `body`.
    pub fn render(&self, settings: &Settings, head: &Head<'_>, body: &str) -> String {
        let mut html = render_head(settings, head);
        let _ = write!(html, "
<body>
  <a href=\"#conteudo-principal\" class=\"skip-link\">{skip}</a>
  {header}
  {body}
  {footer}
  <script src=\"{script}\"></script>
</body>
</html>
",
            skip = escape_html(&settings.blog.skip_link),
            header = self.header,
            footer = self.footer,
            script = escape_html(&settings.script),
        );

        html
    }
}

/// Renders the document prologue and `<head>`.
pub fn render_head(settings: &Settings, head: &Head<'_>) -> String {
    let default_image = settings.default_image_url();
    let image = head.image.unwrap_or(default_image.as_url());
    let title = escape_html(head.title);
    let description = escape_html(head.description);
    let canonical = escape_html(head.canonical);
    let image = escape_html(image);

    let mut html = String::with_capacity(2048);
    let _ = write!(html, r#"<!doctype html>
<html lang="{lang}">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{title}</title>
  <meta name="description" content="{description}">
  <meta name="robots" content="index,follow">
  <link rel="canonical" href="{canonical}">
  <link rel="icon" type="image/png" sizes="32x32" href="/assets/favicon-32.png">
  <link rel="icon" type="image/png" sizes="16x16" href="/assets/favicon-16.png">
  <link rel="apple-touch-icon" href="/assets/apple-touch-icon.png">
  <link rel="manifest" href="/site.webmanifest">
  <meta name="theme-color" content="{theme_color}">
  <link rel="preconnect" href="https://fonts.googleapis.com">
  <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
  <link href="https://fonts.googleapis.com/css2?family=Inter:wght@300;400;500;600;700&amp;display=swap" rel="stylesheet">
  <link rel="stylesheet" href="{stylesheet}">
  <meta property="og:type" content="{kind}">
  <meta property="og:title" content="{title}">
  <meta property="og:description" content="{description}">
  <meta property="og:url" content="{canonical}">
  <meta property="og:image" content="{image}">
  <meta property="og:locale" content="{og_locale}">
  <meta name="twitter:card" content="summary_large_image">
  <meta name="twitter:title" content="{title}">
  <meta name="twitter:description" content="{description}">
  <meta name="twitter:image" content="{image}">
</head>"#,
        lang = escape_html(&settings.lang),
        theme_color = escape_html(&settings.theme_color),
        stylesheet = escape_html(&settings.stylesheet),
        kind = head.kind.as_str(),
        og_locale = escape_html(&settings.og_locale),
    );

    html
}

fn fallback_header(settings: &Settings) -> String {
    format!(r#"<header class="site-header" id="topo">
  <div class="container header-inner">
    <a class="brand" href="/"><span class="brand-text">{}</span></a>
    <nav class="nav"><ul class="nav-menu"><li><a href="/">Inicial</a></li><li><a href="/blog/">Blog</a></li></ul></nav>
  </div>
</header>"#, escape_html(&settings.name))
}

fn fallback_footer(settings: &Settings) -> String {
    format!(r#"<footer class="site-footer">
    <div class="container footer-inner">
      <p>&copy; <span id="year"></span> {}.</p>
    </div>
  </footer>"#, escape_html(&settings.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = r#"<html><body>
<HEADER class="site-header"><div class="header-inner">
  <a class="brand" href="/"><img src="/logo.svg"> Gibi</a>
  <button class="nav-toggle">menu</button>
  <nav class="nav" id="nav-menu"><ul><li><a href="/">Inicial</a></li></ul></nav>
</div></HEADER>
<main>...</main>
<footer class="site-footer"><p>rodapé</p></footer>
<footer>second</footer>
</body></html>"#;

    fn head<'a>(title: &'a str, canonical: &'a Url) -> Head<'a> {
        Head { title, description: "desc", canonical, image: None, kind: PageKind::Website }
    }

    #[test]
    fn extracts_brand_nav_and_footer() {
        let layout = Layout::extract(HOME, &Settings::default());
        assert!(layout.header.starts_with(r#"<header class="site-header" id="topo">"#));
        assert!(layout.header.contains(r#"<a class="brand" href="/"><img src="/logo.svg"> Gibi</a>"#));
        assert!(layout.header.contains(r#"<nav class="nav" id="nav-menu">"#));
        assert!(!layout.header.contains("nav-toggle"));
        assert_eq!(layout.footer, r#"<footer class="site-footer"><p>rodapé</p></footer>"#);
    }

    #[test]
    fn header_element_when_no_brand_or_nav() {
        let html = "<header id=h><h1>Site</h1></header><p>x</p>";
        let layout = Layout::extract(html, &Settings::default());
        assert_eq!(layout.header, "<header id=h><h1>Site</h1></header>");
        assert_eq!(layout.footer, Layout::fallback(&Settings::default()).footer);
    }

    #[test]
    fn nothing_to_extract_falls_back() {
        let settings = Settings::default();
        let layout = Layout::extract("<p>nothing here</p>", &settings);
        assert_eq!(layout, Layout::fallback(&settings));
        assert!(layout.header.contains("Gibi Comunica"));
    }

    #[test]
    fn head_escapes_text() {
        let settings = Settings::default();
        let canonical = Url::new("https://gibicomunica.com.br/blog/");
        let html = render_head(&settings, &head("<script>alert('x')</script> & co", canonical));
        assert!(html.contains("<title>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co</title>"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"<meta property="og:title" content="&lt;script&gt;"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://gibicomunica.com.br/blog/">"#));
    }

    #[test]
    fn head_uses_default_image_and_kind() {
        let settings = Settings::default();
        let canonical = Url::new("https://gibicomunica.com.br/blog/");
        let html = render_head(&settings, &head("Blog", canonical));
        assert!(html.contains(r#"<meta property="og:image" content="https://gibicomunica.com.br/assets/social-share.jpg">"#));
        assert!(html.contains(r#"<meta property="og:type" content="website">"#));

        let image = Url::new("https://cdn.example.com/b.jpg");
        let html = render_head(&settings, &Head { image: Some(image), kind: PageKind::Article, ..head("Blog", canonical) });
        assert!(html.contains(r#"<meta name="twitter:image" content="https://cdn.example.com/b.jpg">"#));
        assert!(html.contains(r#"<meta property="og:type" content="article">"#));
    }

    #[test]
    fn document_wraps_body() {
        let settings = Settings::default();
        let layout = Layout { header: "<header>H</header>".into(), footer: "<footer>F</footer>".into() };
        let canonical = Url::new("https://gibicomunica.com.br/blog/");
        let html = layout.render(&settings, &head("T", canonical), "<main>B</main>");

        let header = html.find("<header>H</header>").unwrap();
        let body = html.find("<main>B</main>").unwrap();
        let footer = html.find("<footer>F</footer>").unwrap();
        let script = html.find(r#"<script src="/js/main.js"></script>"#).unwrap();
        assert!(html.find("</head>").unwrap() < header);
        assert!(header < body && body < footer && footer < script);
        assert!(html.trim_end().ends_with("</html>"));
        assert_eq!(html, layout.render(&settings, &head("T", canonical), "<main>B</main>"));
    }
}

use pulldown_cmark::{html, Options, Parser};

use crate::markdown::{Autolink, HardBreaks, Plugin};

/// Renders post bodies: GitHub-flavored markdown with newlines rendered as
/// line breaks and bare URLs linked. Raw HTML is passed through untouched.
#[derive(Debug, Clone)]
pub struct Markdown {
    options: Options,
    breaks: bool,
    autolink: bool,
}

impl Default for Markdown {
    fn default() -> Self {
        Markdown {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_FOOTNOTES,
            breaks: true,
            autolink: true,
        }
    }
}

/// Skips the wrapped plugin when disabled.
struct Toggle<P>(Option<P>);

impl<P: Plugin> Plugin for Toggle<P> {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = pulldown_cmark::Event<'a>> + 'a
        where I: Iterator<Item = pulldown_cmark::Event<'a>> + 'a
    {
        match &mut self.0 {
            Some(plugin) => either::Either::Left(plugin.remap(events)),
            None => either::Either::Right(events),
        }
    }
}

impl Markdown {
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Whether single newlines become `<br />`. On by default.
    pub fn breaks(mut self, enabled: bool) -> Self {
        self.breaks = enabled;
        self
    }

    /// Whether bare URLs become links. On by default.
    pub fn autolink(mut self, enabled: bool) -> Self {
        self.autolink = enabled;
        self
    }

    pub fn render(&self, input: &str) -> String {
        let mut plugins = (
            Toggle(self.breaks.then_some(HardBreaks)),
            Toggle(self.autolink.then_some(Autolink)),
        );

        let parser = Parser::new_ext(input, self.options);
        let mut output = String::with_capacity(input.len() + input.len() / 2);
        html::push_html(&mut output, plugins.remap(parser));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newlines_become_breaks() {
        let html = Markdown::default().render("Line1\nLine2");
        assert_eq!(html, "<p>Line1<br />\nLine2</p>\n");

        let html = Markdown::default().breaks(false).render("Line1\nLine2");
        assert_eq!(html, "<p>Line1\nLine2</p>\n");
    }

    #[test]
    fn gfm_extensions() {
        let html = Markdown::default().render("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));

        let html = Markdown::default().render("~~old~~\n\n- [x] done");
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains(r#"type="checkbox""#));
    }

    #[test]
    fn bare_urls_are_linked() {
        let html = Markdown::default().render("Veja https://example.com/a_b. E www.example.org!");
        assert!(html.contains(r#"<a href="https://example.com/a_b">https://example.com/a_b</a>."#));
        assert!(html.contains(r#"<a href="http://www.example.org">www.example.org</a>!"#));
    }

    #[test]
    fn links_and_code_are_not_relinked() {
        let html = Markdown::default().render("[https://a.com](https://a.com) `https://b.com`");
        assert_eq!(html.matches("<a ").count(), 1);
        assert!(html.contains("<code>https://b.com</code>"));

        let html = Markdown::default().render("```\nhttps://c.com\n```\n");
        assert!(!html.contains("<a "));

        let html = Markdown::default().autolink(false).render("https://d.com");
        assert!(!html.contains("<a "));
    }

    #[test]
    fn inline_anchor_text_is_not_relinked() {
        let html = Markdown::default().render("Veja <a href=\"https://x.com\">https://x.com</a> aqui e https://y.com");
        assert_eq!(html, "<p>Veja <a href=\"https://x.com\">https://x.com</a> aqui e <a href=\"https://y.com\">https://y.com</a></p>\n");
    }

    #[test]
    fn bare_emails_are_linked() {
        let html = Markdown::default().render("Escreva para contato@gibicomunica.com.br.");
        assert_eq!(html, "<p>Escreva para <a href=\"mailto:contato@gibicomunica.com.br\">contato@gibicomunica.com.br</a>.</p>\n");
    }

    #[test]
    fn raw_html_passes_through() {
        let html = Markdown::default().render("<div class=\"embed\"><iframe src=\"x\"></iframe></div>\n");
        assert!(html.contains("<div class=\"embed\"><iframe src=\"x\"></iframe></div>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = "# Title\n\nSome *text* with https://example.com\n\n| a |\n|---|\n| b |\n";
        let markdown = Markdown::default();
        assert_eq!(markdown.render(input), markdown.render(input));
    }
}

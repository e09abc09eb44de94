use std::collections::VecDeque;

use once_cell::sync::Lazy;
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};
use pulldown_cmark::utils::TextMergeStream;
use regex::Regex;

use crate::markdown::Plugin;

/// A bare URL (`http://`, `https://` or `www.`) or email address at the
/// start of the text or after whitespace or an opening delimiter.
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[\s*_~(])((?:https?://|www\.)[^\s<]+|[A-Za-z0-9._+-]+@[A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)+)")
        .expect("valid regex")
});

/// Turns bare URLs and email addresses in text into links, as GitHub does.
/// Text inside links (markdown or inline `<a>` tags), images and code is
/// left alone.
#[derive(Debug, Default, Clone, Copy)]
pub struct Autolink;

struct AutolinkIterator<'a, I: Iterator<Item = Event<'a>>> {
    inner: TextMergeStream<'a, I>,
    queue: VecDeque<Event<'a>>,
    link_depth: usize,
    in_code: bool,
}

impl Plugin for Autolink {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        AutolinkIterator {
            inner: TextMergeStream::new(events),
            queue: VecDeque::new(),
            link_depth: 0,
            in_code: false,
        }
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for AutolinkIterator<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.queue.pop_front() {
            return Some(event);
        }

        let event = self.inner.next()?;
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => self.link_depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => {
                self.link_depth = self.link_depth.saturating_sub(1);
            }
            Event::InlineHtml(html) => match anchor_tag(html) {
                Some(true) => self.link_depth += 1,
                Some(false) => self.link_depth = self.link_depth.saturating_sub(1),
                None => {}
            },
            Event::Start(Tag::CodeBlock(_)) => self.in_code = true,
            Event::End(TagEnd::CodeBlock) => self.in_code = false,
            Event::Text(text) if self.link_depth == 0 && !self.in_code => {
                if link_text(text, &mut self.queue) {
                    return self.queue.pop_front();
                }
            }
            _ => {}
        }

        Some(event)
    }
}

/// Splits `text` into text and link events, pushing them onto `queue`.
/// Returns `false`, leaving `queue` untouched, if `text` has no bare URLs.
fn link_text<'a>(text: &str, queue: &mut VecDeque<Event<'a>>) -> bool {
    let mut last = 0;
    for captures in BARE_URL.captures_iter(text) {
        let Some(m) = captures.get(1) else { continue };
        let url = trim_url(m.as_str());
        let href = if let Some(domain) = url.strip_prefix("www.") {
            if !domain.contains('.') {
                continue;
            }

            format!("http://{url}")
        } else if url.starts_with("http://") || url.starts_with("https://") {
            if url.ends_with("//") {
                continue;
            }

            url.to_string()
        } else {
            format!("mailto:{url}")
        };

        if m.start() > last {
            queue.push_back(Event::Text(CowStr::from(text[last..m.start()].to_string())));
        }

        queue.push_back(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));

        queue.push_back(Event::Text(CowStr::from(url.to_string())));
        queue.push_back(Event::End(TagEnd::Link));
        last = m.start() + url.len();
    }

    if queue.is_empty() {
        return false;
    }

    if last < text.len() {
        queue.push_back(Event::Text(CowStr::from(text[last..].to_string())));
    }

    true
}

/// `Some(true)` for an opening `<a ...>` tag, `Some(false)` for `</a>`,
/// `None` for any other inline HTML.
fn anchor_tag(html: &str) -> Option<bool> {
    let (open, rest) = match html.strip_prefix("</") {
        Some(rest) => (false, rest),
        None => (true, html.strip_prefix('<')?),
    };

    let mut chars = rest.chars();
    let is_anchor = chars.next().is_some_and(|c| c.eq_ignore_ascii_case(&'a'))
        && chars.next().is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/');

    is_anchor.then_some(open)
}

/// Drops trailing punctuation and unbalanced closing parentheses.
fn trim_url(mut url: &str) -> &str {
    loop {
        let trimmed = url.trim_end_matches(['?', '!', '.', ',', ':', ';', '*', '_', '~', '"', '\'']);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(inner) if trimmed.matches(')').count() > trimmed.matches('(').count() => inner,
            _ => trimmed,
        };

        if trimmed.len() == url.len() {
            return url;
        }

        url = trimmed;
    }
}

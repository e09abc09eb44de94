use pulldown_cmark::Event;

use crate::markdown::Plugin;

/// Renders every newline inside a paragraph as `<br />`.
#[derive(Debug, Default, Clone, Copy)]
pub struct HardBreaks;

impl Plugin for HardBreaks {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        events.map(|event| match event {
            Event::SoftBreak => Event::HardBreak,
            event => event,
        })
    }
}

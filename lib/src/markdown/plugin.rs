use pulldown_cmark::Event;

/// A pass over the markdown event stream.
pub trait Plugin {
    #[inline(always)]
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        events
    }
}

/// Runs `A`, then `B` over its output.
impl<A: Plugin, B: Plugin> Plugin for (A, B) {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        let (a, b) = self;
        b.remap(a.remap(events))
    }
}

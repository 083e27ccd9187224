use scraper::ElementRef;

/// Search scope for per-field lookups: probe the content block first, then
/// widen to the anchor's ancestor chain, inside out.
///
/// Listing cards are not uniformly structured; some nest metadata directly,
/// others place it in siblings only reachable through the anchor's
/// ancestors. Probing narrow-then-wide avoids missing metadata without
/// immediately picking up a neighboring card's.
///
/// The widening is deliberately unbounded — it runs all the way to the
/// document root, so on a deeply nested page a match may come from an
/// enclosing section when no closer one exists.
pub struct SearchScope<'a> {
    block: ElementRef<'a>,
    anchor: ElementRef<'a>,
}

impl<'a> SearchScope<'a> {
    pub fn new(block: ElementRef<'a>, anchor: ElementRef<'a>) -> Self {
        Self { block, anchor }
    }

    /// Apply `probe` to the content block, then to each ancestor of the
    /// anchor; the first non-`None` result wins.
    pub fn find_map<T>(&self, probe: impl Fn(ElementRef<'a>) -> Option<T>) -> Option<T> {
        probe(self.block).or_else(|| {
            self.anchor
                .ancestors()
                .filter_map(ElementRef::wrap)
                .find_map(probe)
        })
    }
}

//! Side-effect channel between the machine and the host

use super::Source;

/// Host operations invoked by the machine on transitions
///
/// `initialize` opens the log resource, `enable` turns active writing on, `disable` turns
/// it off and `flush` finalizes and closes it. Implementations must not fail from the
/// machine's point of view; a host that can fail handles that itself.
pub trait LoggingSink {
    fn initialize(&mut self, source: Source);
    fn enable(&mut self, source: Source);
    fn disable(&mut self, source: Source);
    fn flush(&mut self, source: Source);
}

impl<S: LoggingSink + ?Sized> LoggingSink for &mut S {
    fn initialize(&mut self, source: Source) {
        (**self).initialize(source)
    }

    fn enable(&mut self, source: Source) {
        (**self).enable(source)
    }

    fn disable(&mut self, source: Source) {
        (**self).disable(source)
    }

    fn flush(&mut self, source: Source) {
        (**self).flush(source)
    }
}

/// Sink built from four closures
pub struct Callbacks<I, E, D, F> {
    pub initialize: I,
    pub enable: E,
    pub disable: D,
    pub flush: F,
}

impl<I, E, D, F> Callbacks<I, E, D, F>
where
    I: FnMut(Source),
    E: FnMut(Source),
    D: FnMut(Source),
    F: FnMut(Source),
{
    /// Create a sink from the initialize, enable, disable and flush callbacks
    pub fn new(initialize: I, enable: E, disable: D, flush: F) -> Self {
        Self {
            initialize,
            enable,
            disable,
            flush,
        }
    }
}

impl<I, E, D, F> LoggingSink for Callbacks<I, E, D, F>
where
    I: FnMut(Source),
    E: FnMut(Source),
    D: FnMut(Source),
    F: FnMut(Source),
{
    fn initialize(&mut self, source: Source) {
        (self.initialize)(source)
    }

    fn enable(&mut self, source: Source) {
        (self.enable)(source)
    }

    fn disable(&mut self, source: Source) {
        (self.disable)(source)
    }

    fn flush(&mut self, source: Source) {
        (self.flush)(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_callbacks_route_each_operation() {
        let calls = RefCell::new(Vec::new());
        let mut sink = Callbacks::new(
            |s: Source| calls.borrow_mut().push(("i", s)),
            |s: Source| calls.borrow_mut().push(("e", s)),
            |s: Source| calls.borrow_mut().push(("d", s)),
            |s: Source| calls.borrow_mut().push(("f", s)),
        );

        sink.initialize(Source::StartStop);
        sink.enable(Source::PauseResume);
        sink.disable(Source::PauseResume);
        sink.flush(Source::StartStop);
        drop(sink);

        assert_eq!(
            calls.into_inner(),
            vec![
                ("i", Source::StartStop),
                ("e", Source::PauseResume),
                ("d", Source::PauseResume),
                ("f", Source::StartStop),
            ]
        );
    }
}

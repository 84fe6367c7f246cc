use std::fmt;

use crate::canvas::RenderResult;

/// Payload of the PreRender, PartialRenderFinished and RenderFinished
/// events. Fields that are not known yet at the time of the event are zero.
#[derive(Debug, Clone, Default)]
pub struct RenderFinishedArgs {
    pub total_width: f32,
    pub total_height: f32,
    pub width: f32,
    pub height: f32,
    pub render_result: RenderResult,
}

/// Handle returned by every subscription, used to unsubscribe again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type RenderHandler = Box<dyn FnMut(&RenderFinishedArgs)>;
type PostRenderHandler = Box<dyn FnMut()>;

/// Subscriber lists for the four render lifecycle events.
///
/// Handlers run synchronously on the emitting thread, in subscription order.
#[derive(Default)]
pub struct RenderEvents {
    next_id: u64,
    pre_render: Vec<(SubscriptionId, RenderHandler)>,
    partial_render_finished: Vec<(SubscriptionId, RenderHandler)>,
    render_finished: Vec<(SubscriptionId, RenderHandler)>,
    post_render_finished: Vec<(SubscriptionId, PostRenderHandler)>,
}

impl RenderEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_pre_render(
        &mut self,
        handler: impl FnMut(&RenderFinishedArgs) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.pre_render.push((id, Box::new(handler)));
        id
    }

    pub fn on_partial_render_finished(
        &mut self,
        handler: impl FnMut(&RenderFinishedArgs) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.partial_render_finished.push((id, Box::new(handler)));
        id
    }

    pub fn on_render_finished(
        &mut self,
        handler: impl FnMut(&RenderFinishedArgs) + 'static,
    ) -> SubscriptionId {
        let id = self.allocate_id();
        self.render_finished.push((id, Box::new(handler)));
        id
    }

    pub fn on_post_render_finished(&mut self, handler: impl FnMut() + 'static) -> SubscriptionId {
        let id = self.allocate_id();
        self.post_render_finished.push((id, Box::new(handler)));
        id
    }

    /// Removes a handler from whichever event it was registered on. Returns
    /// `false` when the id is unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.len();
        self.pre_render.retain(|(sub, _)| *sub != id);
        self.partial_render_finished.retain(|(sub, _)| *sub != id);
        self.render_finished.retain(|(sub, _)| *sub != id);
        self.post_render_finished.retain(|(sub, _)| *sub != id);
        self.len() != before
    }

    pub fn clear(&mut self) {
        self.pre_render.clear();
        self.partial_render_finished.clear();
        self.render_finished.clear();
        self.post_render_finished.clear();
    }

    /// Total number of registered handlers across all events.
    pub fn len(&self) -> usize {
        self.pre_render.len()
            + self.partial_render_finished.len()
            + self.render_finished.len()
            + self.post_render_finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn emit_pre_render(&mut self, args: &RenderFinishedArgs) {
        for (_, handler) in &mut self.pre_render {
            handler(args);
        }
    }

    pub(crate) fn emit_partial_render_finished(&mut self, args: &RenderFinishedArgs) {
        for (_, handler) in &mut self.partial_render_finished {
            handler(args);
        }
    }

    pub(crate) fn emit_render_finished(&mut self, args: &RenderFinishedArgs) {
        for (_, handler) in &mut self.render_finished {
            handler(args);
        }
    }

    pub(crate) fn emit_post_render_finished(&mut self) {
        for (_, handler) in &mut self.post_render_finished {
            handler();
        }
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl fmt::Debug for RenderEvents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEvents")
            .field("pre_render", &self.pre_render.len())
            .field(
                "partial_render_finished",
                &self.partial_render_finished.len(),
            )
            .field("render_finished", &self.render_finished.len())
            .field("post_render_finished", &self.post_render_finished.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    #[test]
    fn handlers_run_in_subscription_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut events = RenderEvents::new();

        for label in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            events.on_render_finished(move |args| {
                let entry = format!("{label}:{}", args.total_width);
                seen.borrow_mut().push(entry);
            });
        }

        events.emit_render_finished(&RenderFinishedArgs {
            total_width: 10.0,
            ..Default::default()
        });

        assert_eq!(*seen.borrow(), ["first:10", "second:10", "third:10"]);
    }

    #[test]
    fn unsubscribe_removes_only_the_given_handler() {
        let calls = Rc::new(RefCell::new(0));
        let mut events = RenderEvents::new();

        let kept = Rc::clone(&calls);
        events.on_post_render_finished(move || *kept.borrow_mut() += 1);
        let dropped = Rc::clone(&calls);
        let id = events.on_post_render_finished(move || *dropped.borrow_mut() += 100);

        assert!(events.unsubscribe(id));
        assert!(!events.unsubscribe(id));
        events.emit_post_render_finished();

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(events.len(), 1);
    }
}

use crate::color::Tab;
use crate::session::Session;
use crate::wheel::{angle_from_pointer, Point};

/// Tracks which tab (if any) is being dragged and turns pointer motion into
/// tab angles.
///
/// While a drag is in progress the controller is "subscribed": the input
/// layer should route pointer-move and pointer-up here only while
/// [`DragController::is_subscribed`] holds.
#[derive(Clone, Copy, Debug)]
pub struct DragController {
    active: Option<Tab>,
    origin: Point,
}

impl DragController {
    /// `origin` is the wheel center in pointer coordinates.
    pub fn new(origin: Point) -> Self {
        Self { active: None, origin }
    }

    pub fn active_tab(&self) -> Option<Tab> {
        self.active
    }

    pub fn is_subscribed(&self) -> bool {
        self.active.is_some()
    }

    pub fn begin_drag(&mut self, session: &Session, tab: Tab) {
        if !session.is_active() {
            return;
        }
        tracing::trace!(%tab, "drag started");
        self.active = Some(tab);
    }

    pub fn on_pointer_move(&mut self, session: &mut Session, pointer: Point) {
        let Some(tab) = self.active else {
            return;
        };
        if !session.is_active() {
            return;
        }
        if !pointer.x.is_finite() || !pointer.y.is_finite() {
            return;
        }
        let angle = angle_from_pointer(pointer, self.origin);
        session.set_tab_angle(tab, angle);
    }

    pub fn end_drag(&mut self) {
        if let Some(tab) = self.active.take() {
            tracing::trace!(%tab, "drag ended");
        }
    }
}

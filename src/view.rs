use crate::viewmodel::SharedViewModel;

/// A renderable element bound to a view-model.
///
/// The library never draws; it only resolves views and hands them to a
/// [`ContentHost`]. What a "view" concretely is belongs to the toolkit
/// adapter.
pub trait View {
    /// The view-model this view is bound to, if any.
    fn view_model(&self) -> Option<SharedViewModel>;
}

pub type BoxedView = Box<dyn View>;

/// Toolkit seam: one displayed view per host surface.
///
/// A concrete adapter (a window pane, a page frame, a content control)
/// implements this once per toolkit; the navigation state machine drives
/// it and stays toolkit-agnostic.
pub trait ContentHost {
    /// Attach `view` as the displayed content, replacing whatever was
    /// shown. A surface that cannot take content yet (not mounted, mid
    /// transition) returns the view back; the host keeps it pending and
    /// re-attaches it on the next refresh.
    fn show_content(&mut self, view: BoxedView) -> Result<(), BoxedView>;

    /// Whether any content is currently displayed.
    fn has_content(&self) -> bool;

    /// View-model bound to the displayed content, if any.
    fn current_view_model(&self) -> Option<SharedViewModel>;

    /// Detach the displayed content.
    fn clear_content(&mut self);
}

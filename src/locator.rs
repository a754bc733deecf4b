use crate::view::BoxedView;
use crate::viewmodel::{SharedViewModel, ViewModelKey};

/// Dependency-injection seam: resolves view-model instances by type.
///
/// Whether a resolution returns a cached singleton or a fresh transient is
/// the application's registration choice; the navigation host treats every
/// resolution as "the instance to show now". A `None` is a tolerated miss:
/// the navigation that requested it no-ops.
pub trait ServiceLocator {
    fn resolve(&self, key: ViewModelKey, contract: Option<&str>) -> Option<SharedViewModel>;
}

/// Maps a resolved view-model to a renderable view.
///
/// `contract` disambiguates multiple view registrations for one
/// view-model type.
pub trait ViewLocator {
    fn resolve_view(
        &self,
        view_model: &SharedViewModel,
        contract: Option<&str>,
    ) -> Option<BoxedView>;
}

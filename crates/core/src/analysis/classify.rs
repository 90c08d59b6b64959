use std::collections::HashSet;

use crate::analysis::layout::SizeModel;
use crate::analysis::resolve::{ResolutionError, TypeIndex};
use crate::model::TypeId;

/// Identities of the types whose footprint exceeds the configured width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WideSet<'g> {
    ids: HashSet<&'g TypeId>,
}

impl<'g> WideSet<'g> {
    pub fn contains(&self, id: &TypeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'g> FromIterator<&'g TypeId> for WideSet<'g> {
    fn from_iter<I: IntoIterator<Item = &'g TypeId>>(iter: I) -> Self {
        Self { ids: iter.into_iter().collect() }
    }
}

/// Whether a footprint counts as wide. The bound is exclusive: a type of
/// exactly `max_width` bytes is fine.
pub fn is_wide(footprint: u64, max_width: u64) -> bool {
    footprint > max_width
}

/// Classify the given types (usually one unit's own definitions).
pub fn classify<'g>(
    types: impl IntoIterator<Item = TypeIndex>,
    model: &mut SizeModel<'_, 'g>,
) -> Result<WideSet<'g>, ResolutionError> {
    let max_width = model.config().max_width;
    let mut wide = WideSet::default();
    for idx in types {
        let footprint = model.footprint(idx)?;
        if is_wide(footprint, max_width) {
            wide.ids.insert(&model.graph().def(idx).id);
        }
    }
    Ok(wide)
}

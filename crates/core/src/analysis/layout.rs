use serde::{Deserialize, Serialize};

use crate::analysis::resolve::{ResolutionError, ResolvedGraph, Slot, TypeIndex};
use crate::config::SizeConfig;
use crate::model::{Scalar, Width};

/// Bytes a value occupies, padding included.
pub type Footprint = u64;

/// Size and alignment of a type under a given `SizeConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub size: Footprint,
    pub align: u64,
}

impl Layout {
    /// Layout of a struct with no fields.
    pub const EMPTY: Layout = Layout { size: 0, align: 1 };

    pub fn new(size: Footprint, align: u64) -> Self {
        Self { size, align }
    }
}

/// Round `value` up to a multiple of `align`; `None` on overflow.
pub fn align_to(value: u64, align: u64) -> Option<u64> {
    if align <= 1 {
        Some(value)
    } else {
        value.div_ceil(align).checked_mul(align)
    }
}

fn cap_align(align: u64, config: &SizeConfig) -> u64 {
    align.clamp(1, config.max_align.max(1))
}

/// Layout of a primitive field; `None` when a word multiple overflows.
pub fn scalar_layout(scalar: Scalar, config: &SizeConfig) -> Option<Layout> {
    match scalar.width() {
        Width::Bytes { size, align } => Some(Layout::new(size, cap_align(align, config))),
        Width::Words(n) => {
            let size = n.checked_mul(config.word_size)?;
            Some(Layout::new(size, cap_align(config.word_size, config)))
        }
    }
}

/// Layout of any pointer: one word, word aligned.
pub fn pointer_layout(config: &SizeConfig) -> Layout {
    Layout::new(config.word_size, cap_align(config.word_size, config))
}

/// Lay out an aggregate from its field layouts, in declaration order.
///
/// Each field starts at the running offset rounded up to its alignment; the
/// total is rounded up to the largest field alignment (capped at
/// `max_align`). No fields means size 0, alignment 1. `None` when the size
/// does not fit in a `u64`.
pub fn struct_layout(
    fields: impl IntoIterator<Item = Layout>,
    config: &SizeConfig,
) -> Option<Layout> {
    let mut offset: u64 = 0;
    let mut align = 1;
    for field in fields {
        let field_align = cap_align(field.align, config);
        offset = align_to(offset, field_align)?.checked_add(field.size)?;
        align = align.max(field_align);
    }
    Some(Layout::new(align_to(offset, align)?, align))
}

/// Memoizing size model over one resolved graph for one pass.
#[derive(Debug)]
pub struct SizeModel<'r, 'g> {
    graph: &'r ResolvedGraph<'g>,
    config: SizeConfig,
    cache: Vec<Option<Layout>>,
}

impl<'r, 'g> SizeModel<'r, 'g> {
    pub fn new(graph: &'r ResolvedGraph<'g>, config: &SizeConfig) -> Self {
        Self { graph, config: *config, cache: vec![None; graph.len()] }
    }

    pub fn config(&self) -> &SizeConfig {
        &self.config
    }

    pub fn graph(&self) -> &'r ResolvedGraph<'g> {
        self.graph
    }

    pub fn footprint(&mut self, idx: TypeIndex) -> Result<Footprint, ResolutionError> {
        Ok(self.layout(idx)?.size)
    }

    /// Lay out `idx` and every composite it nests by value.
    ///
    /// Works bottom-up from an explicit stack, so nesting depth is bounded by
    /// the heap rather than the call stack. The graph is acyclic by the time
    /// it gets here.
    pub fn layout(&mut self, idx: TypeIndex) -> Result<Layout, ResolutionError> {
        if let Some(layout) = self.cache[idx.0] {
            return Ok(layout);
        }
        let graph = self.graph;
        let mut latest = Layout::EMPTY;
        let mut stack = vec![(idx, false)];

        while let Some((current, expanded)) = stack.pop() {
            if self.cache[current.0].is_some() {
                continue;
            }
            if !expanded {
                stack.push((current, true));
                for slot in graph.slots(current) {
                    if let Slot::Composite(child) = slot {
                        if self.cache[child.0].is_none() {
                            stack.push((*child, false));
                        }
                    }
                }
                continue;
            }

            let layout = graph
                .slots(current)
                .iter()
                .map(|slot| self.slot_layout(*slot))
                .collect::<Option<Vec<_>>>()
                .and_then(|fields| struct_layout(fields, &self.config))
                .ok_or_else(|| ResolutionError::Overflow(graph.def(current).id.clone()))?;
            tracing::trace!(
                ty = %graph.def(current).id,
                size = layout.size,
                align = layout.align,
                "laid out type"
            );
            self.cache[current.0] = Some(layout);
            latest = layout;
        }

        // `idx` sits at the bottom of the stack, so it is laid out last.
        Ok(latest)
    }

    /// Children are laid out before their parent, so composites hit the cache.
    fn slot_layout(&self, slot: Slot) -> Option<Layout> {
        match slot {
            Slot::Scalar(scalar) => scalar_layout(scalar, &self.config),
            Slot::Pointer => Some(pointer_layout(&self.config)),
            Slot::Composite(idx) => self.cache[idx.0],
        }
    }
}

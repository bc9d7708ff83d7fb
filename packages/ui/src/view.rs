//! # List rendering model
//!
//! A [`ListView`] is the content of one list container (polls or users). It is
//! rebuilt wholesale from each server snapshot with [`ListView::render`]; there
//! is no diffing against what was shown before.
//!
//! Every render bumps a generation counter. Components key their blocks with
//! [`ListView::entry_key`], which includes the generation, so a new render
//! produces fresh DOM nodes and fresh click handlers while the previous
//! generation's nodes (and their handlers) are dropped.
//!
//! Between renders a block can be faded out and removed individually, which is
//! what deletion does while it waits for the authoritative re-fetch.

use std::time::Duration;

use crate::cell::ViewCell;
use crate::timer::sleep;

/// One renderable entity of a list.
pub trait Block: Clone + PartialEq {
    /// Prefix of DOM ids, e.g. `"poll"` for `poll-7`.
    const KIND: &'static str;
    /// Text shown when the list is empty.
    const EMPTY_TEXT: &'static str;

    /// Canonical id of the entity.
    fn id(&self) -> &str;

    fn dom_id(&self) -> String {
        dom_id(Self::KIND, self.id())
    }
}

/// DOM id of the block for entity `id` of kind `kind`.
pub fn dom_id(kind: &str, id: &str) -> String {
    format!("{kind}-{id}")
}

#[derive(Clone, Debug, PartialEq)]
pub struct Entry<B> {
    pub block: B,
    /// Removal animation in progress
    pub fading: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListView<B> {
    entries: Vec<Entry<B>>,
    generation: u64,
}

impl<B> Default for ListView<B> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            generation: 0,
        }
    }
}

impl<B: Block> ListView<B> {
    /// Replace the whole list with `blocks`.
    pub fn render(&mut self, blocks: Vec<B>) {
        self.generation += 1;
        self.entries = blocks
            .into_iter()
            .map(|block| Entry {
                block,
                fading: false,
            })
            .collect();
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn entries(&self) -> &[Entry<B>] {
        &self.entries
    }

    /// The placeholder text when nothing is rendered.
    pub fn placeholder(&self) -> Option<&'static str> {
        self.entries.is_empty().then_some(B::EMPTY_TEXT)
    }

    pub fn dom_ids(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.block.dom_id()).collect()
    }

    pub fn contains(&self, dom_id: &str) -> bool {
        self.position(dom_id).is_some()
    }

    /// Key for an entry, unique per render generation.
    pub fn entry_key(&self, entry: &Entry<B>) -> String {
        format!("{}-{}", self.generation, entry.block.dom_id())
    }

    pub fn block_mut(&mut self, dom_id: &str) -> Option<&mut B> {
        let index = self.position(dom_id)?;
        Some(&mut self.entries[index].block)
    }

    /// Start the removal animation. Returns the generation the block belongs
    /// to, or `None` when no such block is shown.
    pub fn begin_fade(&mut self, dom_id: &str) -> Option<u64> {
        let index = self.position(dom_id)?;
        self.entries[index].fading = true;
        Some(self.generation)
    }

    /// Remove a block that was faded in `generation`. A block re-rendered
    /// since then is a different node and stays.
    pub fn remove_faded(&mut self, dom_id: &str, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        match self.position(dom_id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn position(&self, dom_id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.block.dom_id() == dom_id)
    }
}

/// Fade a block out, wait for the animation, then drop it.
pub async fn fade_out<B: Block>(
    view: &impl ViewCell<ListView<B>>,
    dom_id: &str,
    fade: Duration,
) -> bool {
    let Some(generation) = view.update(|v| v.begin_fade(dom_id)) else {
        tracing::debug!(%dom_id, "block already gone, skipping fade");
        return false;
    };
    sleep(fade).await;
    view.update(|v| v.remove_faded(dom_id, generation))
}

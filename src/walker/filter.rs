//! Filtering decorator
//!
//! [`Filtered`] wraps a walker and skips every stop whose node the filter
//! rejects. It is itself a [`Walker`], so it drops into a registry slot in
//! place of the walker it wraps; the wrapped walker is never modified.

use super::{Braille, Description, Walker};
use crate::document::{Document, NodeId};
use crate::selection::Selection;

/// Decides whether a walker may stop on a node
pub trait NodeFilter {
    fn accept(&self, doc: &Document, node: NodeId) -> bool;
}

impl<F> NodeFilter for F
where
    F: Fn(&Document, NodeId) -> bool,
{
    fn accept(&self, doc: &Document, node: NodeId) -> bool {
        self(doc, node)
    }
}

/// A walker restricted by a [`NodeFilter`]
pub struct Filtered<W, F> {
    inner: W,
    filter: F,
}

impl<W: Walker, F: NodeFilter> Filtered<W, F> {
    pub fn new(inner: W, filter: F) -> Self {
        Filtered { inner, filter }
    }

    pub fn inner(&self) -> &W {
        &self.inner
    }
}

impl<W: Walker, F: NodeFilter> Walker for Filtered<W, F> {
    fn next(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let mut cur = *sel;
        loop {
            let next = self.inner.next(doc, &cur)?;
            if next == cur {
                return None;
            }
            if self.filter.accept(doc, next.start.node) {
                return Some(next);
            }
            cur = next;
        }
    }

    fn sync(&self, doc: &Document, sel: &Selection) -> Option<Selection> {
        let synced = self.inner.sync(doc, sel)?;
        if self.filter.accept(doc, synced.start.node) {
            Some(synced)
        } else {
            self.next(doc, &synced)
        }
    }

    fn act(&self, doc: &Document, sel: &Selection) -> bool {
        self.inner.act(doc, sel)
    }

    fn describe(
        &self,
        doc: &Document,
        prev: Option<&Selection>,
        cur: &Selection,
    ) -> Vec<Description> {
        self.inner.describe(doc, prev, cur)
    }

    fn braille_describe(&self, doc: &Document, prev: Option<&Selection>, cur: &Selection) -> Braille {
        self.inner.braille_describe(doc, prev, cur)
    }

    fn granularity_label(&self) -> &'static str {
        self.inner.granularity_label()
    }
}

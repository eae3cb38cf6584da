//! In-memory hoot collection and its reconciliation rules
//!
//! Order is the server's list order plus appends. Entries are matched by id,
//! never by position, and ids stay unique.

use common::models::Hoot;
use tracing::warn;

/// Ordered collection of loaded hoots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HootCollection {
    hoots: Vec<Hoot>,
}

impl HootCollection {
    /// Build a collection from a server listing
    ///
    /// A repeated id keeps its first position and takes the later value.
    pub fn new(hoots: Vec<Hoot>) -> Self {
        let mut collection = Self::default();
        for hoot in hoots {
            collection.append(hoot);
        }
        collection
    }

    pub fn len(&self) -> usize {
        self.hoots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hoots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Hoot> {
        self.hoots.iter()
    }

    pub fn as_slice(&self) -> &[Hoot] {
        &self.hoots
    }

    pub fn get(&self, id: &str) -> Option<&Hoot> {
        self.hoots.iter().find(|h| h.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn last(&self) -> Option<&Hoot> {
        self.hoots.last()
    }

    /// Append a newly created hoot at the end
    pub fn append(&mut self, hoot: Hoot) {
        if let Some(existing) = self.hoots.iter_mut().find(|h| h.id == hoot.id) {
            warn!("Hoot {} already loaded, replacing in place", hoot.id);
            *existing = hoot;
            return;
        }
        self.hoots.push(hoot);
    }

    /// Replace the entry with the same id, keeping its position
    ///
    /// Returns false when no entry has that id.
    pub fn replace(&mut self, hoot: Hoot) -> bool {
        match self.hoots.iter_mut().find(|h| h.id == hoot.id) {
            Some(existing) => {
                *existing = hoot;
                true
            }
            None => false,
        }
    }

    /// Remove the entry with the given id
    pub fn remove(&mut self, id: &str) -> Option<Hoot> {
        let index = self.hoots.iter().position(|h| h.id == id)?;
        Some(self.hoots.remove(index))
    }
}

impl<'a> IntoIterator for &'a HootCollection {
    type Item = &'a Hoot;
    type IntoIter = std::slice::Iter<'a, Hoot>;

    fn into_iter(self) -> Self::IntoIter {
        self.hoots.iter()
    }
}

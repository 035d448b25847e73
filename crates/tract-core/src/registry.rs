//! Per-contact state table.
//!
//! Each pointer or touch contact is either controlling the tongue or owns an
//! independent constriction slot. The mouse is the reserved contact `-1`;
//! touches use their session-stable identifiers. Absence from the table
//! means "no active contact", so duplicate or out-of-order up events are
//! harmless no-ops.

use fnv::FnvHashMap;

pub type ContactId = i32;

/// Reserved identifier for single-contact mouse input.
pub const MOUSE_CONTACT: ContactId = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactMode {
    /// Contact drives the tongue position.
    Tongue,
    /// Contact owns an independent constriction slot.
    Constriction(u32),
}

#[derive(Debug, Default)]
pub struct ConstrictionRegistry {
    contacts: FnvHashMap<ContactId, ContactMode>,
}

impl ConstrictionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self, id: ContactId) -> Option<ContactMode> {
        self.contacts.get(&id).copied()
    }

    pub fn is_registered(&self, id: ContactId) -> bool {
        self.contacts.contains_key(&id)
    }

    pub fn register_tongue(&mut self, id: ContactId) {
        self.contacts.insert(id, ContactMode::Tongue);
    }

    /// Register a new constriction contact and return its slot, the lowest
    /// slot not currently held by any contact.
    pub fn register_constriction(&mut self, id: ContactId) -> u32 {
        let slot = self.lowest_free_slot();
        self.contacts.insert(id, ContactMode::Constriction(slot));
        slot
    }

    /// Remove a contact, returning what it was. Removing an unknown contact
    /// is a no-op, so a duplicated up/cancel never raises.
    pub fn remove(&mut self, id: ContactId) -> Option<ContactMode> {
        self.contacts.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Contacts currently holding constriction slots.
    pub fn active_constrictions(&self) -> impl Iterator<Item = (ContactId, u32)> + '_ {
        self.contacts.iter().filter_map(|(id, mode)| match mode {
            ContactMode::Constriction(slot) => Some((*id, *slot)),
            ContactMode::Tongue => None,
        })
    }

    fn lowest_free_slot(&self) -> u32 {
        let mut slot = 0;
        while self
            .contacts
            .values()
            .any(|m| *m == ContactMode::Constriction(slot))
        {
            slot += 1;
        }
        slot
    }
}

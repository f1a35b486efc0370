//! Auxiliary export documents

use serde::Serialize;
use serde_json::Value;

/// Which extras slot a document fills
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtrasField {
    Identity,
    Follow,
    Playlists,
    Marquee,
    Wrapped,
    Library,
    Capsule,
}

/// Best-effort parsed auxiliary documents. Every field is independent.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Extras {
    pub identity: Option<Value>,
    pub follow: Option<Value>,
    pub playlists: Option<Value>,
    pub marquee: Option<Value>,
    pub wrapped: Option<Value>,
    pub library: Option<Value>,
    pub capsule: Option<Value>,
}

impl Extras {
    pub fn get(&self, field: ExtrasField) -> Option<&Value> {
        match field {
            ExtrasField::Identity => self.identity.as_ref(),
            ExtrasField::Follow => self.follow.as_ref(),
            ExtrasField::Playlists => self.playlists.as_ref(),
            ExtrasField::Marquee => self.marquee.as_ref(),
            ExtrasField::Wrapped => self.wrapped.as_ref(),
            ExtrasField::Library => self.library.as_ref(),
            ExtrasField::Capsule => self.capsule.as_ref(),
        }
    }

    pub fn set(&mut self, field: ExtrasField, value: Option<Value>) {
        let slot = match field {
            ExtrasField::Identity => &mut self.identity,
            ExtrasField::Follow => &mut self.follow,
            ExtrasField::Playlists => &mut self.playlists,
            ExtrasField::Marquee => &mut self.marquee,
            ExtrasField::Wrapped => &mut self.wrapped,
            ExtrasField::Library => &mut self.library,
            ExtrasField::Capsule => &mut self.capsule,
        };
        *slot = value;
    }
}

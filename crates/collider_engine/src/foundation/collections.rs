//! Specialized collection types
//!
//! Collider data and its render proxies are stored in separate tables keyed
//! by the same stable id, so a visual handle is never the source of truth.

pub use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    /// Stable identifier of an authored collider
    pub struct ColliderId;
}

/// Arena of authored collider data keyed by [`ColliderId`]
pub type ColliderArena<T> = SlotMap<ColliderId, T>;

/// Side table keyed by the same ids as a [`ColliderArena`]
pub type SideTable<T> = SecondaryMap<ColliderId, T>;

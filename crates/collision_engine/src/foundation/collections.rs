//! Specialized collection types

pub use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a bounding volume owned by a [`HandleMap`]
    ///
    /// Handles stay valid across insertions and removals of other volumes.
    /// A handle whose volume was removed is detected at lookup time instead
    /// of dangling.
    pub struct VolumeHandle;
}

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<VolumeHandle, T>;

use std::collections::BTreeSet;

use crate::domain::utils::id::ChannelId;

/// The channels still available in one time slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChannelSet {
    available: BTreeSet<ChannelId>,
}

impl ChannelSet {
    /// A slot with every channel `"0" .. "num_channels - 1"` available.
    pub fn full(num_channels: usize) -> Self {
        let available = (0..num_channels).map(|channel| ChannelId::new(channel.to_string())).collect();
        ChannelSet { available }
    }

    /// Reserves `channel` in this slot.
    ///
    /// # Returns
    /// `true` if the channel was available and is now reserved, `false` if it was
    /// already reserved or was never part of the set.
    pub fn remove(&mut self, channel: &ChannelId) -> bool {
        self.available.remove(channel)
    }

    /// Releases `channel` back into this slot.
    ///
    /// # Returns
    /// `true` if the channel was not available before, `false` otherwise (no-op).
    pub fn insert(&mut self, channel: ChannelId) -> bool {
        self.available.insert(channel)
    }

    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.available.contains(channel)
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelId> {
        self.available.iter()
    }
}

use crate::domain::channels::channel_set::ChannelSet;
use crate::domain::utils::id::ChannelId;
use crate::error::{ChannelError, ConfigError};

/// Hard cap on the number of wireless channels a workload may configure.
pub const MAX_CHANNELS: usize = 20;

/// Number of channels used when a workload does not configure one.
pub const DEFAULT_NUM_CHANNELS: usize = 16;

/// Checks a configured channel count against `[1, MAX_CHANNELS]`.
pub fn validate_num_channels(num_channels: usize) -> Result<usize, ConfigError> {
    if num_channels == 0 || num_channels > MAX_CHANNELS {
        log::warn!("Rejected numChannels {}, must be within [1, {}].", num_channels, MAX_CHANNELS);
        return Err(ConfigError::NumChannelsOutOfRange(num_channels));
    }
    Ok(num_channels)
}

/// Per-time-slot channel availability ledger.
///
/// A scheduler appends one slot per time step with [`Channels::add_new_channel_set`] and reserves
/// channels in it while walking the slots in increasing order. Slots are addressed by their
/// zero-based creation index and are never removed. Access is single-writer; the ledger does no
/// locking of its own.
#[derive(Debug, Clone)]
pub struct Channels {
    /// Size of the full channel universe. Constant for the lifetime of the ledger.
    num_channels: usize,

    /// Available channels, one set per time slot.
    channels_available: Vec<ChannelSet>,
}

impl Channels {
    pub fn new(num_channels: usize) -> Self {
        Channels { num_channels, channels_available: Vec::new() }
    }

    /// Appends one more time slot with every channel available.
    ///
    /// # Returns
    /// The index of the new slot.
    pub fn add_new_channel_set(&mut self) -> usize {
        self.channels_available.push(ChannelSet::full(self.num_channels));
        let slot = self.channels_available.len() - 1;
        log::trace!("Added channel set for time slot {} ({} channels).", slot, self.num_channels);
        slot
    }

    /// Read view of the channels still available in `time_slot`.
    pub fn channel_set(&self, time_slot: usize) -> Result<&ChannelSet, ChannelError> {
        let len = self.channels_available.len();
        self.channels_available.get(time_slot).ok_or_else(|| {
            log::error!("Requested channel set of time slot {}, but the ledger only holds {} slots.", time_slot, len);
            ChannelError::SlotOutOfRange { slot: time_slot, len }
        })
    }

    /// Live handle on the channels of `time_slot`.
    ///
    /// Removing or inserting through the handle is the same as calling
    /// [`Channels::remove_channel`] / [`Channels::add_channel`]; the change stays in the ledger.
    pub fn channel_set_mut(&mut self, time_slot: usize) -> Result<&mut ChannelSet, ChannelError> {
        let len = self.channels_available.len();
        self.channels_available.get_mut(time_slot).ok_or_else(|| {
            log::error!("Requested channel set of time slot {}, but the ledger only holds {} slots.", time_slot, len);
            ChannelError::SlotOutOfRange { slot: time_slot, len }
        })
    }

    /// `true` if every channel of `time_slot` is reserved.
    pub fn is_empty(&self, time_slot: usize) -> Result<bool, ChannelError> {
        Ok(self.channel_set(time_slot)?.is_empty())
    }

    /// Reserves `channel` in `time_slot`.
    ///
    /// # Returns
    /// `Ok(true)` if the channel was available and is now reserved, `Ok(false)` if it was
    /// already reserved or unknown.
    pub fn remove_channel(&mut self, time_slot: usize, channel: &ChannelId) -> Result<bool, ChannelError> {
        let removed = self.channel_set_mut(time_slot)?.remove(channel);
        if removed {
            log::debug!("Reserved channel {} in time slot {}.", channel, time_slot);
        } else {
            log::debug!("Channel {} is not available in time slot {}, nothing reserved.", channel, time_slot);
        }
        Ok(removed)
    }

    /// Releases `channel` back into `time_slot`.
    ///
    /// # Returns
    /// `Ok(true)` if the channel was not available before, `Ok(false)` if it already was.
    pub fn add_channel(&mut self, time_slot: usize, channel: ChannelId) -> Result<bool, ChannelError> {
        let name = channel.to_string();
        let added = self.channel_set_mut(time_slot)?.insert(channel);
        if added {
            log::debug!("Released channel {} in time slot {}.", name, time_slot);
        }
        Ok(added)
    }

    /// Size of the channel universe the ledger was created with.
    pub fn num_channels(&self) -> usize {
        self.num_channels
    }

    /// Number of time slots appended so far.
    pub fn num_slots(&self) -> usize {
        self.channels_available.len()
    }
}

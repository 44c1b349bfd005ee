pub mod channel_set;
pub mod channels;

pub use channel_set::ChannelSet;
pub use channels::Channels;

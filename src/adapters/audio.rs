use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};

/// Voice session controller used by voice-capable channels
#[async_trait]
pub trait AudioController: Send + Sync {
    /// Join the voice channel `channel_id` in `guild_id`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Session established (or already active)
    /// * `Err(_)` - The controller could not join
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> anyhow::Result<()>;
}

/// Controller for clients built without voice support
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAudioController;

#[async_trait]
impl AudioController for NoAudioController {
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> anyhow::Result<()> {
        anyhow::bail!("no audio controller configured (guild {guild_id}, channel {channel_id})")
    }
}

use routecord::adapters::AudioController;
use serenity::async_trait;
use serenity::model::id::{ChannelId, GuildId};
use std::sync::{Arc, Mutex};

pub struct MockAudioController {
    pub connections: Arc<Mutex<Vec<(GuildId, ChannelId)>>>,
}

impl Default for MockAudioController {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAudioController {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_connections(&self) -> Vec<(GuildId, ChannelId)> {
        self.connections.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioController for MockAudioController {
    async fn connect(&self, guild_id: GuildId, channel_id: ChannelId) -> anyhow::Result<()> {
        self.connections.lock().unwrap().push((guild_id, channel_id));
        Ok(())
    }
}

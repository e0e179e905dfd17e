mod adapters;

use adapters::{MockAudioController, MockResponse, MockRestClient};
use reqwest::Method;
use routecord::ClientContext;
use routecord::cache::CacheStrategy;
use routecord::entity::{Capability, Channel};
use routecord::model::{
    ChannelData, ChannelType, Guild, Member, MessageCreate, MessageData, MessageUpdate,
};
use routecord::rest::{RequestOpts, RestError};
use rstest::rstest;
use serde_json::json;
use serenity::model::Permissions;
use serenity::model::id::{ChannelId, GuildId, MessageId, StageInstanceId};
use std::sync::Arc;

const GUILD_ID: u64 = 81384788765712384;

struct Fixture {
    rest: Arc<MockRestClient>,
    audio: Arc<MockAudioController>,
    context: Arc<ClientContext>,
}

impl Fixture {
    fn new() -> Self {
        let rest = Arc::new(MockRestClient::new());
        let audio = Arc::new(MockAudioController::new());
        let context = ClientContext::new(rest.clone(), audio.clone());
        Self {
            rest,
            audio,
            context,
        }
    }

    fn channel(&self, id: u64, kind: ChannelType, strategy: CacheStrategy) -> Channel {
        let mut data = ChannelData::new(ChannelId::new(id), kind);
        if kind != ChannelType::Dm {
            data.guild_id = Some(GuildId::new(GUILD_ID));
        }
        self.context.entity_builder().create_channel(data, strategy)
    }
}

fn message_json(id: u64, channel_id: u64, content: &str) -> serde_json::Value {
    json!({
        "id": id.to_string(),
        "channel_id": channel_id.to_string(),
        "content": content,
        "pinned": false,
    })
}

/// Every gated operation with the capability it requires
const OPERATIONS: &[(Capability, &str)] = &[
    (Capability::MessageBearing, "last_message_id"),
    (Capability::MessageBearing, "last_pin_timestamp"),
    (Capability::MessageBearing, "create_message"),
    (Capability::MessageBearing, "update_message"),
    (Capability::MessageBearing, "delete_message"),
    (Capability::MessageBearing, "bulk_delete_messages"),
    (Capability::GuildScoped, "guild_id"),
    (Capability::GuildScoped, "guild"),
    (Capability::GuildScoped, "permissions"),
    (Capability::GuildScoped, "parent_id"),
    (Capability::GuildScoped, "parent"),
    (Capability::GuildScoped, "position"),
    (Capability::TextCapable, "nsfw"),
    (Capability::TextCapable, "topic"),
    (Capability::VoiceCapable, "connect"),
    (Capability::VoiceCapable, "bitrate"),
    (Capability::VoiceCapable, "user_limit"),
    (Capability::NewsCapable, "crosspost_message"),
    (Capability::StageCapable, "stage_instance"),
    (Capability::StageCapable, "create_stage_instance"),
    (Capability::StageCapable, "is_moderator"),
];

/// Invoke `operation` by name, remote ones included
async fn invoke(channel: Channel, operation: &'static str) {
    let opts = RequestOpts::new();
    let message_id = MessageId::new(1);
    match operation {
        "last_message_id" => {
            let _ = channel.last_message_id();
        }
        "last_pin_timestamp" => {
            let _ = channel.last_pin_timestamp();
        }
        "create_message" => {
            let _ = channel
                .create_message(&MessageCreate::new().content("hi"), &opts)
                .await;
        }
        "update_message" => {
            let _ = channel
                .update_message(message_id, &MessageUpdate::new().content("hi"), &opts)
                .await;
        }
        "delete_message" => {
            let _ = channel.delete_message(message_id, &opts).await;
        }
        "bulk_delete_messages" => {
            let _ = channel
                .bulk_delete_messages(&[message_id, MessageId::new(2)], &opts)
                .await;
        }
        "guild_id" => {
            let _ = channel.guild_id();
        }
        "guild" => {
            let _ = channel.guild();
        }
        "permissions" => {
            let _ = channel.permissions();
        }
        "parent_id" => {
            let _ = channel.parent_id();
        }
        "parent" => {
            let _ = channel.parent();
        }
        "position" => {
            let _ = channel.position();
        }
        "nsfw" => {
            let _ = channel.nsfw();
        }
        "topic" => {
            let _ = channel.topic();
        }
        "connect" => {
            let _ = channel.connect().await;
        }
        "bitrate" => {
            let _ = channel.bitrate();
        }
        "user_limit" => {
            let _ = channel.user_limit();
        }
        "crosspost_message" => {
            let _ = channel.crosspost_message(message_id, &opts).await;
        }
        "stage_instance" => {
            let _ = channel.stage_instance();
        }
        "create_stage_instance" => {
            let _ = channel.create_stage_instance("topic", &opts).await;
        }
        "is_moderator" => {
            let _ = channel.is_moderator(&Member::with_permissions(Permissions::ADMINISTRATOR));
        }
        other => unreachable!("no invoker for {other}"),
    }
}

#[test]
fn test_operation_table_covers_every_capability() {
    for capability in Capability::ALL {
        assert!(
            OPERATIONS.iter().any(|(required, _)| *required == capability),
            "{capability:?} has no operations listed"
        );
    }
}

#[tokio::test]
async fn test_unsupported_operations_panic_without_remote_calls() {
    let fixture = Fixture::new();

    for kind in ChannelType::ALL {
        for &(capability, operation) in OPERATIONS {
            if capability.supports(kind) {
                continue;
            }
            let channel = fixture.channel(1, kind, CacheStrategy::No);

            let result = tokio::spawn(invoke(channel, operation)).await;

            let err = result.expect_err("unsupported operation should panic");
            assert!(err.is_panic(), "{operation} on {kind}");
            let payload = err.into_panic();
            let message = payload.downcast_ref::<String>().unwrap();
            assert_eq!(
                *message,
                format!("unsupported operation '{operation}' for channel type {kind}")
            );
        }
    }

    assert_eq!(fixture.rest.call_count(), 0);
    assert!(fixture.audio.get_connections().is_empty());
}

#[test]
#[should_panic(expected = "unsupported operation 'topic' for channel type GuildVoice(2)")]
fn test_topic_on_voice_channel_panics() {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::GuildVoice, CacheStrategy::No);
    let _ = channel.topic();
}

#[test]
#[should_panic(expected = "unsupported operation 'guild_id' for channel type Dm(1)")]
fn test_guild_id_on_dm_panics() {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::Dm, CacheStrategy::No);
    let _ = channel.guild_id();
}

#[rstest]
#[case(ChannelType::Dm, true, false, false, false, false, false)]
#[case(ChannelType::GuildText, true, true, true, false, false, false)]
#[case(ChannelType::GuildVoice, false, true, false, true, false, false)]
#[case(ChannelType::GuildCategory, false, true, false, false, false, false)]
#[case(ChannelType::GuildNews, true, true, true, false, true, false)]
#[case(ChannelType::GuildStore, false, true, false, false, false, false)]
#[case(ChannelType::GuildStage, false, true, false, true, false, true)]
fn test_channel_predicates(
    #[case] kind: ChannelType,
    #[case] message_bearing: bool,
    #[case] guild: bool,
    #[case] text: bool,
    #[case] voice: bool,
    #[case] news: bool,
    #[case] stage: bool,
) {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, kind, CacheStrategy::No);

    assert_eq!(channel.is_message_bearing(), message_bearing);
    assert_eq!(channel.is_guild_channel(), guild);
    assert_eq!(channel.is_text_channel(), text);
    assert_eq!(channel.is_voice_channel(), voice);
    assert_eq!(channel.is_news_channel(), news);
    assert_eq!(channel.is_stage_channel(), stage);
    assert_eq!(channel.is_dm_channel(), kind == ChannelType::Dm);
    assert_eq!(channel.is_category(), kind == ChannelType::GuildCategory);
    assert_eq!(channel.is_store_channel(), kind == ChannelType::GuildStore);
}

#[tokio::test]
async fn test_create_message_wraps_response_without_caching() {
    let fixture = Fixture::new();
    fixture
        .rest
        .push_response(MockResponse::Json(message_json(10, 1, "hello")));
    let channel = fixture.channel(1, ChannelType::GuildText, CacheStrategy::No);

    let message = channel
        .create_message(&MessageCreate::new().content("hello"), &RequestOpts::new())
        .await
        .unwrap();

    assert_eq!(message.id(), MessageId::new(10));
    assert_eq!(message.content(), "hello");

    let calls = fixture.rest.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, Method::POST);
    assert_eq!(calls[0].route, "/channels/1/messages");
    assert_eq!(calls[0].body, Some(json!({ "content": "hello" })));

    // Messages returned by REST calls are not retained
    assert!(fixture.context.caches().messages.is_empty());
}

#[tokio::test]
async fn test_message_cache_stays_empty_across_sends() {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::Dm, CacheStrategy::No);
    for id in 1..=20 {
        fixture
            .rest
            .push_response(MockResponse::Json(message_json(id, 1, "spam")));
        channel
            .create_message(&MessageCreate::new().content("spam"), &RequestOpts::new())
            .await
            .unwrap();
    }

    assert_eq!(fixture.rest.call_count(), 20);
    assert!(fixture.context.caches().messages.is_empty());
}

#[tokio::test]
async fn test_bulk_delete_evicts_cached_messages() {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::GuildText, CacheStrategy::No);
    for id in 1..=3 {
        let data: MessageData = serde_json::from_value(message_json(id, 1, "old")).unwrap();
        fixture
            .context
            .entity_builder()
            .create_message(data, CacheStrategy::Yes);
    }
    assert_eq!(fixture.context.caches().messages.len(), 3);

    channel
        .bulk_delete_messages(&[MessageId::new(1), MessageId::new(2)], &RequestOpts::new())
        .await
        .unwrap();

    let messages = &fixture.context.caches().messages;
    assert_eq!(messages.len(), 1);
    assert!(messages.get(&MessageId::new(3)).is_some());
}

#[tokio::test]
async fn test_update_and_delete_message_routes() {
    let fixture = Fixture::new();
    fixture
        .rest
        .push_response(MockResponse::Json(message_json(10, 1, "edited")));
    let channel = fixture.channel(1, ChannelType::GuildNews, CacheStrategy::No);
    let opts = RequestOpts::new();

    let message = channel
        .update_message(MessageId::new(10), &MessageUpdate::new().content("edited"), &opts)
        .await
        .unwrap();
    assert_eq!(message.content(), "edited");

    channel.delete_message(MessageId::new(10), &opts).await.unwrap();

    let calls = fixture.rest.calls();
    assert_eq!(calls[0].method, Method::PATCH);
    assert_eq!(calls[0].route, "/channels/1/messages/10");
    assert_eq!(calls[1].method, Method::DELETE);
    assert_eq!(calls[1].route, "/channels/1/messages/10");
    assert!(fixture.context.caches().messages.get(&MessageId::new(10)).is_none());
}

#[rstest]
#[case::single(1)]
#[case::many(50)]
#[tokio::test]
async fn test_bulk_delete_is_one_request(#[case] count: u64) {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::GuildText, CacheStrategy::No);
    let ids: Vec<MessageId> = (1..=count).map(MessageId::new).collect();

    channel
        .bulk_delete_messages(&ids, &RequestOpts::new())
        .await
        .unwrap();

    let calls = fixture.rest.calls();
    assert_eq!(calls.len(), 1);
    if count == 1 {
        assert_eq!(calls[0].method, Method::DELETE);
        assert_eq!(calls[0].route, "/channels/1/messages/1");
    } else {
        assert_eq!(calls[0].method, Method::POST);
        assert_eq!(calls[0].route, "/channels/1/messages/bulk-delete");
        let body = calls[0].body.as_ref().unwrap();
        assert_eq!(body["messages"].as_array().unwrap().len(), count as usize);
    }
}

#[tokio::test]
async fn test_bulk_delete_without_ids_sends_nothing() {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::GuildText, CacheStrategy::No);

    channel
        .bulk_delete_messages(&[], &RequestOpts::new())
        .await
        .unwrap();

    assert_eq!(fixture.rest.call_count(), 0);
}

#[tokio::test]
async fn test_api_error_returned_untouched() {
    let fixture = Fixture::new();
    fixture.rest.push_response(MockResponse::Api {
        status: 403,
        body: json!({ "code": 50013, "message": "Missing Permissions" }),
    });
    let channel = fixture.channel(1, ChannelType::GuildText, CacheStrategy::No);

    let err = channel
        .create_message(&MessageCreate::new().content("hi"), &RequestOpts::new())
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.code, 50013);
    assert_eq!(api_error.message, "Missing Permissions");
}

#[test]
fn test_parent_resolves_cached_category_only() {
    let fixture = Fixture::new();
    fixture.channel(100, ChannelType::GuildCategory, CacheStrategy::Yes);
    fixture.channel(200, ChannelType::GuildText, CacheStrategy::Yes);

    let mut data = ChannelData::new(ChannelId::new(1), ChannelType::GuildText);
    data.parent_id = Some(ChannelId::new(100));
    let child = fixture
        .context
        .entity_builder()
        .create_channel(data.clone(), CacheStrategy::No);
    assert_eq!(child.parent().unwrap().id(), ChannelId::new(100));

    data.parent_id = Some(ChannelId::new(200));
    let child = fixture
        .context
        .entity_builder()
        .create_channel(data.clone(), CacheStrategy::No);
    assert!(child.parent().is_none());

    data.parent_id = Some(ChannelId::new(300));
    let child = fixture
        .context
        .entity_builder()
        .create_channel(data, CacheStrategy::No);
    assert!(child.parent().is_none());

    assert_eq!(fixture.rest.call_count(), 0);
}

#[test]
fn test_guild_lookup_from_cache() {
    let fixture = Fixture::new();
    let channel = fixture.channel(1, ChannelType::GuildVoice, CacheStrategy::No);
    assert!(channel.guild().is_none());

    fixture.context.entity_builder().create_guild(
        Guild {
            id: GuildId::new(GUILD_ID),
            name: "Test Guild".to_string(),
            icon: None,
            owner_id: None,
        },
        CacheStrategy::Yes,
    );

    assert_eq!(channel.guild().unwrap().name, "Test Guild");
    assert_eq!(channel.guild_id(), Some(GuildId::new(GUILD_ID)));
}

#[tokio::test]
async fn test_connect_delegates_to_audio_controller() {
    let fixture = Fixture::new();
    let channel = fixture.channel(42, ChannelType::GuildStage, CacheStrategy::No);

    channel.connect().await.unwrap();

    assert_eq!(
        fixture.audio.get_connections(),
        vec![(GuildId::new(GUILD_ID), ChannelId::new(42))]
    );
    assert_eq!(fixture.rest.call_count(), 0);
}

#[tokio::test]
async fn test_connect_without_audio_controller_fails() {
    let context = ClientContext::without_audio(Arc::new(MockRestClient::new()));
    let mut data = ChannelData::new(ChannelId::new(1), ChannelType::GuildVoice);
    data.guild_id = Some(GuildId::new(GUILD_ID));
    let channel = context
        .entity_builder()
        .create_channel(data, CacheStrategy::No);

    assert!(channel.connect().await.is_err());
}

#[tokio::test]
async fn test_crosspost_on_news_channel() {
    let fixture = Fixture::new();
    fixture
        .rest
        .push_response(MockResponse::Json(message_json(7, 5, "news")));
    let channel = fixture.channel(5, ChannelType::GuildNews, CacheStrategy::No);

    let message = channel
        .crosspost_message(MessageId::new(7), &RequestOpts::new())
        .await
        .unwrap();

    assert_eq!(message.id(), MessageId::new(7));
    assert_eq!(
        fixture.rest.calls()[0].route,
        "/channels/5/messages/7/crosspost"
    );
}

#[tokio::test]
async fn test_create_stage_instance_rebuilds_cached_channel() {
    let fixture = Fixture::new();
    fixture.rest.push_response(MockResponse::Json(json!({
        "id": "840647391636226060",
        "guild_id": GUILD_ID.to_string(),
        "channel_id": "42",
        "topic": "Testing Testing, 123",
        "privacy_level": 2,
    })));
    let channel = fixture.channel(42, ChannelType::GuildStage, CacheStrategy::Yes);
    assert!(channel.stage_instance().is_none());

    let stage_instance = channel
        .create_stage_instance("Testing Testing, 123", &RequestOpts::new())
        .await
        .unwrap();
    assert_eq!(stage_instance.id(), StageInstanceId::new(840647391636226060));

    let calls = fixture.rest.calls();
    assert_eq!(calls[0].route, "/stage-instances");
    assert_eq!(calls[0].body.as_ref().unwrap()["channel_id"], "42");

    // The held entity is immutable; the cached one was rebuilt
    assert!(channel.stage_instance().is_none());
    let cached = fixture
        .context
        .caches()
        .channels
        .get(&ChannelId::new(42))
        .unwrap();
    assert_eq!(
        cached.stage_instance().unwrap().topic(),
        "Testing Testing, 123"
    );

    // Re-fetched channel data keeps the link
    let rebuilt = fixture.channel(42, ChannelType::GuildStage, CacheStrategy::Yes);
    assert!(rebuilt.stage_instance().is_some());
}

#[tokio::test]
async fn test_stage_instance_delete_unlinks_channel() {
    let fixture = Fixture::new();
    fixture.rest.push_response(MockResponse::Json(json!({
        "id": "9",
        "guild_id": GUILD_ID.to_string(),
        "channel_id": "42",
        "topic": "Town hall",
        "privacy_level": 2,
    })));
    let channel = fixture.channel(42, ChannelType::GuildStage, CacheStrategy::Yes);
    let stage_instance = channel
        .create_stage_instance("Town hall", &RequestOpts::new())
        .await
        .unwrap();

    stage_instance.delete(&RequestOpts::new()).await.unwrap();

    let calls = fixture.rest.calls();
    assert_eq!(calls[1].method, Method::DELETE);
    assert_eq!(calls[1].route, "/stage-instances/42");
    let cached = fixture
        .context
        .caches()
        .channels
        .get(&ChannelId::new(42))
        .unwrap();
    assert!(cached.stage_instance().is_none());
}

#[rstest]
#[case::administrator(Some(Permissions::ADMINISTRATOR), true)]
#[case::full_moderation(
    Some(Permissions::MANAGE_CHANNELS | Permissions::MUTE_MEMBERS | Permissions::MOVE_MEMBERS),
    true
)]
#[case::missing_move(Some(Permissions::MANAGE_CHANNELS | Permissions::MUTE_MEMBERS), false)]
#[case::speaker(Some(Permissions::SPEAK | Permissions::CONNECT), false)]
#[case::unresolved(None, false)]
fn test_is_moderator(#[case] permissions: Option<Permissions>, #[case] expected: bool) {
    let fixture = Fixture::new();
    let channel = fixture.channel(42, ChannelType::GuildStage, CacheStrategy::No);
    let member = match permissions {
        Some(permissions) => Member::with_permissions(permissions),
        None => Member {
            user: None,
            nick: None,
            roles: Vec::new(),
            permissions: None,
        },
    };

    assert_eq!(channel.is_moderator(&member), expected);
}

#[tokio::test]
async fn test_entities_do_not_keep_context_alive() {
    let fixture = Fixture::new();
    let context = Arc::downgrade(&fixture.context);
    let rest = Arc::clone(&fixture.rest);
    let channel = fixture.channel(1, ChannelType::GuildText, CacheStrategy::Yes);
    assert_eq!(fixture.context.caches().channels.len(), 1);

    drop(fixture);

    assert!(context.upgrade().is_none());
    assert!(channel.context().is_none());
    assert!(channel.guild().is_none());
    let err = channel
        .create_message(&MessageCreate::new().content("late"), &RequestOpts::new())
        .await
        .unwrap_err();
    assert!(matches!(err, RestError::ContextDropped));
    assert_eq!(rest.call_count(), 0);
}

#[test]
fn test_shutdown_clears_caches() {
    let fixture = Fixture::new();
    fixture.channel(1, ChannelType::GuildText, CacheStrategy::Yes);
    assert_eq!(fixture.context.caches().channels.len(), 1);

    fixture.context.shutdown();

    assert!(fixture.context.caches().channels.is_empty());
    assert_eq!(Arc::strong_count(&fixture.context), 1);
}

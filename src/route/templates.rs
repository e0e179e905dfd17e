use reqwest::Method;

use super::{Route, RouteBase};

// Invites
pub const GET_INVITE: Route = Route::api(
    Method::GET,
    "/invites/{code}",
    &["with_counts", "with_expiration"],
);
pub const CREATE_INVITE: Route = Route::api(Method::POST, "/channels/{channel.id}/invites", &[]);
pub const DELETE_INVITE: Route = Route::api(Method::DELETE, "/invites/{code}", &[]);
pub const GET_GUILD_INVITES: Route = Route::api(Method::GET, "/guilds/{guild.id}/invites", &[]);
pub const GET_CHANNEL_INVITES: Route =
    Route::api(Method::GET, "/channels/{channel.id}/invites", &[]);

/// Public `https://discord.gg/{code}` link
pub const INVITE_URL: Route = Route::link(RouteBase::InviteUrl, "/{code}");

// Voice
pub const GET_VOICE_REGIONS: Route = Route::api(Method::GET, "/voice/regions", &[]);

// Channels and messages
pub const GET_CHANNEL: Route = Route::api(Method::GET, "/channels/{channel.id}", &[]);
pub const CREATE_MESSAGE: Route = Route::api(Method::POST, "/channels/{channel.id}/messages", &[]);
pub const UPDATE_MESSAGE: Route = Route::api(
    Method::PATCH,
    "/channels/{channel.id}/messages/{message.id}",
    &[],
);
pub const DELETE_MESSAGE: Route = Route::api(
    Method::DELETE,
    "/channels/{channel.id}/messages/{message.id}",
    &[],
);
pub const BULK_DELETE_MESSAGES: Route = Route::api(
    Method::POST,
    "/channels/{channel.id}/messages/bulk-delete",
    &[],
);
pub const CROSSPOST_MESSAGE: Route = Route::api(
    Method::POST,
    "/channels/{channel.id}/messages/{message.id}/crosspost",
    &[],
);

// Stage instances
pub const GET_STAGE_INSTANCE: Route = Route::api(Method::GET, "/stage-instances/{channel.id}", &[]);
pub const CREATE_STAGE_INSTANCE: Route = Route::api(Method::POST, "/stage-instances", &[]);
pub const DELETE_STAGE_INSTANCE: Route =
    Route::api(Method::DELETE, "/stage-instances/{channel.id}", &[]);

// Webhooks
pub const GET_WEBHOOK: Route = Route::api(Method::GET, "/webhooks/{webhook.id}", &[]);
pub const UPDATE_WEBHOOK: Route = Route::api(Method::PATCH, "/webhooks/{webhook.id}", &[]);
pub const DELETE_WEBHOOK: Route = Route::api(Method::DELETE, "/webhooks/{webhook.id}", &[]);

pub const GET_WEBHOOK_WITH_TOKEN: Route =
    Route::api_without_auth(Method::GET, "/webhooks/{webhook.id}/{webhook.token}", &[]);
pub const UPDATE_WEBHOOK_WITH_TOKEN: Route =
    Route::api_without_auth(Method::PATCH, "/webhooks/{webhook.id}/{webhook.token}", &[]);
pub const DELETE_WEBHOOK_WITH_TOKEN: Route =
    Route::api_without_auth(Method::DELETE, "/webhooks/{webhook.id}/{webhook.token}", &[]);

pub const CREATE_WEBHOOK_MESSAGE: Route = Route::api_without_auth(
    Method::POST,
    "/webhooks/{webhook.id}/{webhook.token}",
    &["wait", "thread_id"],
);
pub const CREATE_WEBHOOK_MESSAGE_SLACK: Route = Route::api_without_auth(
    Method::POST,
    "/webhooks/{webhook.id}/{webhook.token}/slack",
    &["wait", "thread_id"],
);
pub const CREATE_WEBHOOK_MESSAGE_GITHUB: Route = Route::api_without_auth(
    Method::POST,
    "/webhooks/{webhook.id}/{webhook.token}/github",
    &["wait", "thread_id"],
);
pub const UPDATE_WEBHOOK_MESSAGE: Route = Route::api_without_auth(
    Method::PATCH,
    "/webhooks/{webhook.id}/{webhook.token}/messages/{message.id}",
    &["thread_id"],
);
pub const DELETE_WEBHOOK_MESSAGE: Route = Route::api_without_auth(
    Method::DELETE,
    "/webhooks/{webhook.id}/{webhook.token}/messages/{message.id}",
    &["thread_id"],
);

//! Placeholder templating
//!
//! Purely textual replace-all over short, operator-authored templates.
//! Deliberately not a template engine: no escaping, no conditionals.

use crate::AggregateStats;

/// Replaced with the aggregate server count
pub const SERVER_COUNT: &str = "@server_count@";

/// Replaced with the aggregate shard count
pub const SHARD_COUNT: &str = "@shard_count@";

/// Replaced with the configured bot identifier (endpoint templates only)
pub const BOT_ID: &str = "@bot_id@";

/// Body sent when a destination configures no template of its own
pub const DEFAULT_BODY_TEMPLATE: &str = "{\"server_count\": @server_count@}";

/// Substitute every count placeholder in `template`
///
/// Order-independent; every occurrence is replaced; unrecognized
/// substrings pass through untouched.
pub fn render(template: &str, stats: AggregateStats) -> String {
    template
        .replace(SERVER_COUNT, &stats.server_count.to_string())
        .replace(SHARD_COUNT, &stats.shard_count.to_string())
}

/// Substitute the bot identifier
///
/// Applied to endpoint templates once, at config-load time.
pub fn resolve_bot_id(template: &str, bot_id: &str) -> String {
    template.replace(BOT_ID, bot_id)
}

/// Whether a template embeds a count placeholder
///
/// Drives delivery-mode selection: an endpoint carrying a count is sent
/// without a body.
pub fn has_count_placeholder(template: &str) -> bool {
    template.contains(SERVER_COUNT) || template.contains(SHARD_COUNT)
}

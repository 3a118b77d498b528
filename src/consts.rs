//! Shared constants for the editor crate.

// ── Simulated latency ───────────────────────────────────────────

/// Default delay before the global chat channel receives its assistant reply.
pub const DEFAULT_CHAT_LATENCY_MS: u64 = 2_500;

/// Default delay before a results-section channel receives its assistant reply.
pub const DEFAULT_SECTION_LATENCY_MS: u64 = 2_500;

/// Buffered actions a session queues for its host before reply tasks wait.
pub const SESSION_ACTION_CAPACITY: usize = 64;

// ── Font weight buckets ─────────────────────────────────────────

/// Highest numeric weight that still displays as `normal`.
pub const WEIGHT_NORMAL_MAX: f64 = 450.0;

/// Highest numeric weight that displays as `500`.
pub const WEIGHT_MEDIUM_MAX: f64 = 550.0;

/// Highest numeric weight that displays as `600`. Anything above is `bold`.
pub const WEIGHT_SEMIBOLD_MAX: f64 = 650.0;

// ── Preview frame widths ────────────────────────────────────────

pub const MOBILE_FRAME_WIDTH_PX: u32 = 375;
pub const TABLET_FRAME_WIDTH_PX: u32 = 768;
pub const DESKTOP_FRAME_WIDTH_PX: u32 = 1_280;

// ── Chat copy ───────────────────────────────────────────────────

/// Starter prompts offered on an empty global chat channel.
pub const GLOBAL_STARTER_PROMPTS: [&str; 3] = [
    "Add a new custom section.",
    "Make the icons purple and center align them with the text.",
    "Change the title of the magnet.",
];

/// Canned assistant reply for the global chat channel.
pub const GLOBAL_ASSISTANT_REPLY: &str =
    "I've made the changes you requested. The title is now smaller. Would you like me to adjust anything else?";

/// Keyword in a global chat message that switches the quiz to its animated theme.
pub const JAZZ_TRIGGER_KEYWORD: &str = "title";

use crowd_core::{TopicCategory, TopicItem};

/// Closing lines appended to every question.
pub const CLOSING_PROMPTS: [&str; 5] = [
    "Any pointers on a practical fix?",
    "What would you change first?",
    "Is there a safe pattern you recommend?",
    "How would you debug this quickly?",
    "Looking for a clean approach here.",
];

/// Tone line used when a profile has no tones of its own.
pub const GENERIC_TONE: &str = "Looking for guidance.";

/// Category-specific tips, one of which leads every answer.
pub fn tips_for(category: TopicCategory) -> &'static [&'static str] {
    match category {
        TopicCategory::Coding => &[
            "Add per-call timeouts and return partial results when safe.",
            "Use idempotency keys for retries to avoid duplicate side effects.",
            "Instrument each tool call and log failures with context.",
        ],
        TopicCategory::Robotics => &[
            "Lower angular gain and add velocity smoothing to reduce oscillation.",
            "Increase costmap inflation radius to avoid wall-hugging.",
            "Check timestamp sync across sensors before tuning fusion.",
        ],
        TopicCategory::Tech => &[
            "Trace the slowest span (DB/network/CPU) before optimizing.",
            "Add batching or caching on the hottest path.",
            "Validate retries with real traffic and p95/p99 metrics.",
        ],
    }
}

/// The fixed pool of seed questions.
#[derive(Debug, Clone)]
pub struct TopicPool {
    items: Vec<TopicItem>,
}

impl TopicPool {
    pub fn new(items: Vec<TopicItem>) -> Self {
        Self { items }
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            TopicItem::new(
                "Python async retry: tasks cancel each other on failure",
                "I have 3 async tool calls in a TaskGroup. One failure cancels the others. How do I retry per tool without collapsing the whole request?",
                &["python", "asyncio", "reliability"],
                "coding",
            ),
            TopicItem::new(
                "Robot oscillates near wall with local planner",
                "Using a DWA local planner, my robot oscillates in tight corridors. What tuning or control changes stabilize the path?",
                &["robotics", "control", "navigation"],
                "robotics",
            ),
            TopicItem::new(
                "TypeScript: cache invalidation + stale data bug",
                "My cache invalidation misses updates and users see stale data. What's a safe pattern for cache keys and TTL?",
                &["typescript", "caching", "architecture"],
                "coding",
            ),
            TopicItem::new(
                "High p95 latency in inference API",
                "p95 jumped from 200ms to 900ms. How do I find the bottleneck and reduce latency safely?",
                &["performance", "observability", "api"],
                "tech",
            ),
            TopicItem::new(
                "ROS2: sensor fusion time sync drift",
                "IMU + wheel odom drift over time and TF starts to diverge. How do I fix time sync and fusion?",
                &["robotics", "ros2", "sensors"],
                "robotics",
            ),
            TopicItem::new(
                "Distributed job queue idempotency",
                "We process payments with at-least-once delivery. How do we implement idempotency keys and retries?",
                &["distributed-systems", "payments", "reliability"],
                "tech",
            ),
            TopicItem::new(
                "Auth key rotation without breaking integrations",
                "We rotate API keys monthly. Some clients break during rotation. How do you roll keys safely?",
                &["security", "auth", "api"],
                "tech",
            ),
            TopicItem::new(
                "Tool output validation pipeline",
                "Tool responses sometimes come back malformed. What validation steps do you add before trusting the output?",
                &["tools", "validation", "safety"],
                "coding",
            ),
        ])
    }

    pub fn items(&self) -> &[TopicItem] {
        &self.items
    }

    pub fn find(&self, title: &str) -> Option<&TopicItem> {
        self.items.iter().find(|t| t.title == title)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for TopicPool {
    fn default() -> Self {
        Self::builtin()
    }
}

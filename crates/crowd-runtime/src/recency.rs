use crowd_core::random::choose;
use crowd_core::{RandomSource, TopicItem};
use std::collections::VecDeque;
use tracing::debug;

/// The last few distinct topic titles asked, oldest first.
#[derive(Debug, Clone)]
pub struct RecencyWindow {
    titles: VecDeque<String>,
    cap: usize,
}

impl RecencyWindow {
    /// A cap of zero is treated as one.
    pub fn new(cap: usize) -> Self {
        let cap = cap.max(1);
        Self {
            titles: VecDeque::with_capacity(cap),
            cap,
        }
    }

    /// Append a title, evicting the oldest entries past the cap.
    /// A title already present moves to the newest position.
    pub fn push(&mut self, title: impl Into<String>) {
        let title = title.into();
        self.titles.retain(|t| *t != title);
        self.titles.push_back(title);
        while self.titles.len() > self.cap {
            self.titles.pop_front();
        }
    }

    /// Record an acknowledged pick, applying its reset first.
    pub fn commit(&mut self, pick: &TopicPick<'_>) {
        if pick.reset {
            self.clear();
        }
        self.push(pick.topic.title.as_str());
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    pub fn clear(&mut self) {
        self.titles.clear();
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Oldest first.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.titles.iter().map(String::as_str)
    }
}

/// A topic chosen by [`pick_topic`].
#[derive(Debug, Clone, Copy)]
pub struct TopicPick<'a> {
    pub topic: &'a TopicItem,
    /// Every topic was in the window; [`RecencyWindow::commit`] clears it
    /// before recording this pick.
    pub reset: bool,
}

/// Choose a topic whose title is not in the window.
///
/// When every topic in the pool is in the window, the whole pool is eligible
/// again and the pick is flagged for a reset. The window itself is left alone
/// until [`RecencyWindow::commit`]. `None` only for an empty pool.
pub fn pick_topic<'a>(
    pool: &'a [TopicItem],
    window: &RecencyWindow,
    rng: &mut dyn RandomSource,
) -> Option<TopicPick<'a>> {
    let mut candidates: Vec<&TopicItem> = pool.iter().filter(|t| !window.contains(&t.title)).collect();
    let reset = candidates.is_empty();
    if reset {
        debug!(window = window.len(), "every topic used recently, window will reset");
        candidates = pool.iter().collect();
    }
    choose(rng, &candidates).map(|&topic| TopicPick { topic, reset })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crowd_core::ScriptedRandom;

    fn topics(titles: &[&str]) -> Vec<TopicItem> {
        titles.iter().map(|t| TopicItem::new(t, "body", &[], "tech")).collect()
    }

    #[test]
    fn test_fifo_eviction() {
        let mut w = RecencyWindow::new(2);
        w.push("a");
        w.push("b");
        w.push("c");
        assert_eq!(w.titles().collect::<Vec<_>>(), vec!["b", "c"]);
        assert!(!w.contains("a"));
    }

    #[test]
    fn test_repeat_push_stays_distinct() {
        let mut w = RecencyWindow::new(3);
        w.push("a");
        w.push("b");
        w.push("a");
        assert_eq!(w.titles().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_zero_cap_clamped() {
        let mut w = RecencyWindow::new(0);
        w.push("a");
        w.push("b");
        assert_eq!(w.cap(), 1);
        assert_eq!(w.len(), 1);
    }

    #[test]
    fn test_pick_skips_recent() {
        let pool = topics(&["a", "b", "c"]);
        let mut w = RecencyWindow::new(8);
        w.push("a");
        w.push("b");
        let mut rng = ScriptedRandom::new().with_indices([0]);
        let picked = pick_topic(&pool, &w, &mut rng).unwrap();
        assert_eq!(picked.topic.title, "c");
        assert!(!picked.reset);
        w.commit(&picked);
        assert_eq!(w.titles().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_pick_resets_when_window_covers_pool() {
        let pool = topics(&["a", "b"]);
        let mut w = RecencyWindow::new(8);
        w.push("a");
        w.push("b");
        let mut rng = ScriptedRandom::new().with_indices([1]);
        let picked = pick_topic(&pool, &w, &mut rng).unwrap();
        assert_eq!(picked.topic.title, "b");
        assert!(picked.reset);
        assert_eq!(w.len(), 2, "window untouched until commit");
        w.commit(&picked);
        assert_eq!(w.titles().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_pick_empty_pool() {
        let w = RecencyWindow::new(8);
        assert!(pick_topic(&[], &w, &mut ScriptedRandom::new()).is_none());
    }
}

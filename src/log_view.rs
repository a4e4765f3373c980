use crate::constants::LOG_VIEW_CAPACITY;
use chrono::Local;
use std::collections::VecDeque;

/// Recent diagnostics shown in the side pane. Oldest entries fall off.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: VecDeque<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: String) {
        let stamped = format!("{} {}", Local::now().format("%H:%M:%S"), entry);
        self.entries.push_back(stamped);
        while self.entries.len() > LOG_VIEW_CAPACITY {
            self.entries.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_view_is_bounded() {
        let mut logs = LogView::new();
        for i in 0..LOG_VIEW_CAPACITY + 5 {
            logs.add(format!("entry {}", i));
        }
        assert_eq!(logs.entries.len(), LOG_VIEW_CAPACITY);
        assert!(logs.entries.front().unwrap().ends_with("entry 5"));
    }
}

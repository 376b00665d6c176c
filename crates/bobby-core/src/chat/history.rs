//! History window selection.

use bobby_types::llm::Message;

/// Return the last `max_history` messages of `history`, in order.
///
/// When the history is already within the window it is returned whole.
pub fn trim_history(history: &[Message], max_history: usize) -> &[Message] {
    let start = history.len().saturating_sub(max_history);
    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation(len: usize) -> Vec<Message> {
        (0..len)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("question {i}"))
                } else {
                    Message::assistant(format!("answer {i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_trim_history_within_window_is_unchanged() {
        let history = conversation(3);
        assert_eq!(trim_history(&history, 10), history.as_slice());
        assert_eq!(trim_history(&history, 3), history.as_slice());
    }

    #[test]
    fn test_trim_history_keeps_most_recent_suffix() {
        let history = conversation(7);
        let trimmed = trim_history(&history, 4);
        assert_eq!(trimmed.len(), 4);
        assert_eq!(trimmed, &history[3..]);
        assert_eq!(trimmed[0].content(), "answer 3");
        assert_eq!(trimmed[3].content(), "question 6");
    }

    #[test]
    fn test_trim_history_length_is_min_of_len_and_window() {
        for len in 0..8 {
            let history = conversation(len);
            for window in 1..10 {
                let trimmed = trim_history(&history, window);
                assert_eq!(trimmed.len(), len.min(window));
                assert_eq!(trimmed, &history[len - trimmed.len()..]);
            }
        }
    }

    #[test]
    fn test_trim_history_empty() {
        assert!(trim_history(&[], 5).is_empty());
    }
}

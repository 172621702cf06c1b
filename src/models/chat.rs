use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer pair shown in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatExchange {
    pub user: String,
    pub bot: String,
    pub asked_at: DateTime<Utc>,
}

/// Conversation history owned by the presentation layer.
/// The pipeline never reads it; it only grows by one exchange per answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    exchanges: Vec<ChatExchange>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, question: &str, answer: &str) -> &ChatExchange {
        self.exchanges.push(ChatExchange {
            user: question.to_string(),
            bot: answer.to_string(),
            asked_at: Utc::now(),
        });
        &self.exchanges[self.exchanges.len() - 1]
    }

    pub fn exchanges(&self) -> &[ChatExchange] {
        &self.exchanges
    }

    pub fn len(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_appends_in_order() {
        let mut history = ChatHistory::new();
        history.push("O que é phishing?", "Resposta 1");
        history.push("E o golpe do Pix?", "Resposta 2");
        assert_eq!(history.len(), 2);
        assert_eq!(history.exchanges()[0].user, "O que é phishing?");
        assert_eq!(history.exchanges()[1].bot, "Resposta 2");
    }

    #[test]
    fn test_history_clear() {
        let mut history = ChatHistory::new();
        history.push("q", "a");
        history.clear();
        assert!(history.is_empty());
    }
}

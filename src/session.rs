//! Session-scoped chat transcript.
//!
//! The transcript belongs to the hosting session, not to the query pipeline:
//! the advisor is stateless across questions, and the history only lives for
//! the duration of one chat session.

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "you",
            Role::Assistant => "assistant",
        }
    }
}

/// One message in the conversation.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// In-memory conversation history for one session.
#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(ChatTurn {
            role,
            content: content.into(),
        });
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_turns_in_order() {
        let mut t = Transcript::default();
        assert!(t.is_empty());

        t.push(Role::User, "my head hurts");
        t.push(Role::Assistant, "consider Neurology");

        let turns = t.turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, Role::User);
        assert_eq!(turns[0].content, "my head hurts");
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn role_labels() {
        assert_eq!(Role::User.label(), "you");
        assert_eq!(Role::Assistant.label(), "assistant");
    }
}

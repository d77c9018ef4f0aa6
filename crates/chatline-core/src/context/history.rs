use crate::llm::{Role, Turn};
use std::collections::VecDeque;

/// In-process conversation log, capped at `2 × max_turns` messages.
///
/// Oldest messages are evicted first. Consecutive messages with the same
/// role are accepted as-is.
#[derive(Debug, Clone)]
pub struct ConversationMemory {
    turns: VecDeque<Turn>,
    max_turns: usize,
}

impl ConversationMemory {
    pub fn new(max_turns: usize) -> Self {
        Self {
            turns: VecDeque::new(),
            max_turns,
        }
    }

    /// Seed from an existing log, keeping only the most recent messages.
    pub fn from_turns(max_turns: usize, turns: impl IntoIterator<Item = Turn>) -> Self {
        let mut memory = Self::new(max_turns);
        memory.replace(turns);
        memory
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Maximum number of retained messages.
    pub fn capacity(&self) -> usize {
        self.max_turns.saturating_mul(2)
    }

    pub fn add(&mut self, role: Role, content: impl Into<String>) {
        self.push(Turn::new(role, content));
    }

    pub fn add_user(&mut self, content: impl Into<String>) {
        self.add(Role::User, content);
    }

    pub fn add_assistant(&mut self, content: impl Into<String>) {
        self.add(Role::Assistant, content);
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push_back(turn);
        self.trim_if_needed();
    }

    /// Replace the whole log.
    pub fn replace(&mut self, turns: impl IntoIterator<Item = Turn>) {
        self.turns = turns.into_iter().collect();
        self.trim_if_needed();
    }

    /// The capped log in chronological order.
    pub fn as_messages(&self) -> Vec<Turn> {
        self.turns.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Plain `role: content` transcript, one message per line.
    pub fn transcript(&self) -> String {
        self.turns
            .iter()
            .map(|t| format!("{}: {}", t.role, t.content))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.back()
    }

    fn trim_if_needed(&mut self) {
        while self.turns.len() > self.capacity() {
            self.turns.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cap_holds_after_every_add() {
        let mut memory = ConversationMemory::new(3);
        for i in 0..20 {
            let role = if i % 2 == 0 { Role::User } else { Role::Assistant };
            memory.add(role, format!("m{i}"));
            assert!(memory.len() <= 6);
        }
        let contents: Vec<_> = memory.iter().map(|t| t.content.as_str()).collect();
        assert_eq!(contents, vec!["m14", "m15", "m16", "m17", "m18", "m19"]);
    }

    #[test]
    fn test_five_adds_with_two_turns_keeps_last_four() {
        let mut memory = ConversationMemory::new(2);
        memory.add_user("u1");
        memory.add_assistant("a1");
        memory.add_user("u2");
        memory.add_assistant("a2");
        memory.add_user("u3");

        assert_eq!(
            memory.as_messages(),
            vec![
                Turn::assistant("a1"),
                Turn::user("u2"),
                Turn::assistant("a2"),
                Turn::user("u3"),
            ]
        );
    }

    #[test]
    fn test_consecutive_same_role_is_tolerated() {
        let mut memory = ConversationMemory::new(1);
        memory.add_assistant("one");
        memory.add_assistant("two");
        memory.add_assistant("three");
        assert_eq!(memory.len(), 2);
        assert_eq!(memory.last(), Some(&Turn::assistant("three")));
    }

    #[test]
    fn test_from_turns_keeps_most_recent() {
        let turns = (0..5).map(|i| Turn::user(format!("{i}")));
        let memory = ConversationMemory::from_turns(1, turns);
        assert_eq!(memory.as_messages(), vec![Turn::user("3"), Turn::user("4")]);
    }

    #[test]
    fn test_clear_and_transcript() {
        let mut memory = ConversationMemory::new(5);
        memory.add_user("Hi");
        memory.add_assistant("Hello");
        assert_eq!(memory.transcript(), "user: Hi\nassistant: Hello");

        memory.clear();
        assert!(memory.is_empty());
        assert_eq!(memory.transcript(), "");
    }

    #[test]
    fn test_huge_max_turns_saturates_capacity() {
        let mut memory = ConversationMemory::new(usize::MAX);
        assert_eq!(memory.capacity(), usize::MAX);

        memory.add_user("hi");
        memory.add_assistant("hello");
        assert_eq!(memory.len(), 2);
    }
}

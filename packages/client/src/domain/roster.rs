//! Live roster state.
//!
//! An in-memory, keyed collection of participant records updated
//! incrementally by channel events. All mutation happens on the single
//! monitoring loop, so the type itself carries no locking.

use super::entity::Participant;

/// The participants of the current event, keyed by participant id.
///
/// Insertion order is preserved internally; display order is always
/// ascending by id via [`Roster::sorted_by_id`].
#[derive(Debug, Default, Clone)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty the roster.
    ///
    /// Called whenever a new event is loaded so no participant of a
    /// previous event leaks into the current one.
    pub fn clear(&mut self) {
        self.participants.clear();
    }

    /// Bulk-seed the roster from the initial event payload.
    pub fn add_many(&mut self, participants: Vec<Participant>) {
        for participant in participants {
            self.upsert(participant);
        }
    }

    /// Replace-or-append by id.
    ///
    /// A record with a known id replaces the existing entry entirely (no
    /// field-level merge); an unknown id appends a new entry.
    pub fn upsert(&mut self, participant: Participant) {
        match self.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => *existing = participant,
            None => self.participants.push(participant),
        }
    }

    /// Look up a participant by id
    pub fn get(&self, id: i64) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Participants sorted ascending by id, for display.
    pub fn sorted_by_id(&self) -> Vec<&Participant> {
        let mut participants: Vec<&Participant> = self.participants.iter().collect();
        participants.sort_by_key(|p| p.id);
        participants
    }

    /// Number of participants currently in the roster
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{ConnectionState, Warning};

    fn participant(id: i64, username: &str) -> Participant {
        Participant {
            id,
            username: username.to_string(),
            last_name: "Dupont".to_string(),
            connection_state: None,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_upsert_appends_unknown_id() {
        // テスト項目: 未知の id の upsert は新しいエントリを追加する
        // given (前提条件):
        let mut roster = Roster::new();

        // when (操作):
        roster.upsert(participant(1, "alice"));
        roster.upsert(participant(2, "bob"));

        // then (期待する結果):
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(1).unwrap().username, "alice");
        assert_eq!(roster.get(2).unwrap().username, "bob");
    }

    #[test]
    fn test_upsert_replaces_known_id_entirely() {
        // テスト項目: 既知の id の upsert はレコード全体を置き換える（フィールド単位のマージはしない）
        // given (前提条件):
        let mut roster = Roster::new();
        let mut original = participant(1, "alice");
        original.warnings = vec![Warning { amount: 2 }];
        original.connection_state = Some(ConnectionState {
            slug: "actif".to_string(),
            name: "Actif".to_string(),
        });
        roster.upsert(original);

        // when (操作):
        roster.upsert(participant(1, "alice2"));

        // then (期待する結果):
        assert_eq!(roster.len(), 1);
        let replaced = roster.get(1).unwrap();
        assert_eq!(replaced.username, "alice2");
        assert!(replaced.warnings.is_empty());
        assert!(replaced.connection_state.is_none());
    }

    #[test]
    fn test_sorted_by_id_orders_ascending() {
        // テスト項目: 表示用リストが id の昇順でソートされる
        // given (前提条件):
        let mut roster = Roster::new();
        roster.upsert(participant(3, "charlie"));
        roster.upsert(participant(1, "alice"));
        roster.upsert(participant(2, "bob"));

        // when (操作):
        let sorted = roster.sorted_by_id();

        // then (期待する結果):
        let ids: Vec<i64> = sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_empties_the_roster() {
        // テスト項目: clear で全ての参加者が削除される
        // given (前提条件):
        let mut roster = Roster::new();
        roster.add_many(vec![participant(1, "alice"), participant(2, "bob")]);

        // when (操作):
        roster.clear();

        // then (期待する結果):
        assert!(roster.is_empty());
        assert!(roster.get(1).is_none());
    }

    #[test]
    fn test_add_many_deduplicates_by_id() {
        // テスト項目: add_many でも id ごとに 1 エントリしか保持されない
        // given (前提条件):
        let mut roster = Roster::new();

        // when (操作):
        roster.add_many(vec![
            participant(1, "alice"),
            participant(1, "alice-updated"),
            participant(2, "bob"),
        ]);

        // then (期待する結果):
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(1).unwrap().username, "alice-updated");
    }
}

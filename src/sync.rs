//! Pure reconciliation of a movie's association collections against a
//! desired target collection. No storage types here; the stores translate
//! the computed changes into inserts/updates/deletes.

use std::collections::{HashMap, HashSet};

/// One desired cast entry as supplied by the caller, in list order.
#[derive(Clone, Debug, PartialEq)]
pub struct CastMember {
    pub actor_id: i32,
    pub character: String,
}

/// A cast entry with its dense 1-based rank.
#[derive(Clone, Debug, PartialEq)]
pub struct RankedCastMember {
    pub actor_id: i32,
    pub character: String,
    pub cast_order: i32,
}

/// Ranks a desired cast by list position: first entry gets order 1, with
/// no gaps. Client-supplied order values are never trusted; position is
/// the only input. Duplicate actor ids are the caller's responsibility to
/// deduplicate; for ranking, the last position wins.
pub fn assign_ranks(cast: &[CastMember]) -> Vec<RankedCastMember> {
    cast.iter()
        .enumerate()
        .map(|(position, member)| RankedCastMember {
            actor_id: member.actor_id,
            character: member.character.clone(),
            cast_order: position as i32 + 1,
        })
        .collect()
}

/// Changes needed to turn the current genre set into the desired one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenreChanges {
    pub insert: Vec<i32>,
    pub delete: Vec<i32>,
}

impl GenreChanges {
    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && self.delete.is_empty()
    }
}

/// Set-difference reconciliation keyed on genre id: desired-but-absent
/// pairs are inserted, present-but-undesired pairs are deleted, the
/// intersection is left untouched. Repeated ids in the desired list
/// collapse to one pair. Calling twice with the same desired set yields
/// no changes the second time.
pub fn reconcile_genres(current: &[i32], desired: &[i32]) -> GenreChanges {
    let desired_set: HashSet<i32> = desired.iter().copied().collect();

    let mut seen: HashSet<i32> = current.iter().copied().collect();
    let insert = desired.iter().copied().filter(|&id| seen.insert(id)).collect();

    GenreChanges {
        insert,
        delete: current.iter().copied().filter(|id| !desired_set.contains(id)).collect(),
    }
}

/// Changes needed to turn the current cast into the desired ranked cast.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CastChanges {
    pub insert: Vec<RankedCastMember>,
    pub update: Vec<RankedCastMember>,
    pub delete: Vec<i32>,
}

impl CastChanges {
    pub fn is_empty(&self) -> bool {
        self.insert.is_empty() && self.update.is_empty() && self.delete.is_empty()
    }
}

/// Set-difference reconciliation keyed on actor id. Retained members are
/// updated only when their rank or character actually changed, so a
/// repeat call with the same list is write-free.
pub fn reconcile_cast(current: &[RankedCastMember], desired: &[RankedCastMember]) -> CastChanges {
    let current_by_id: HashMap<i32, &RankedCastMember> =
        current.iter().map(|m| (m.actor_id, m)).collect();
    // Last position wins when the caller passed duplicate actor ids.
    let desired_by_id: HashMap<i32, &RankedCastMember> =
        desired.iter().map(|m| (m.actor_id, m)).collect();

    let mut changes = CastChanges::default();

    for member in desired {
        let latest = desired_by_id[&member.actor_id];
        if latest.cast_order != member.cast_order {
            // Earlier occurrence of a duplicated id; skip it.
            continue;
        }
        match current_by_id.get(&member.actor_id) {
            None => changes.insert.push(member.clone()),
            Some(existing)
                if existing.cast_order != member.cast_order
                    || existing.character != member.character =>
            {
                changes.update.push(member.clone())
            }
            Some(_) => {}
        }
    }

    changes.delete = current
        .iter()
        .map(|m| m.actor_id)
        .filter(|id| !desired_by_id.contains_key(id))
        .collect();

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(actor_id: i32, character: &str) -> CastMember {
        CastMember { actor_id, character: character.to_string() }
    }

    fn ranked(actor_id: i32, character: &str, cast_order: i32) -> RankedCastMember {
        RankedCastMember { actor_id, character: character.to_string(), cast_order }
    }

    #[test]
    fn ranks_mirror_list_position() {
        let cast = [member(7, "Cobb"), member(3, "Arthur"), member(9, "Mal")];
        let ranked_cast = assign_ranks(&cast);
        assert_eq!(
            ranked_cast,
            vec![ranked(7, "Cobb", 1), ranked(3, "Arthur", 2), ranked(9, "Mal", 3)]
        );
    }

    #[test]
    fn ranks_are_dense_for_duplicates() {
        // Deduplication is the caller's job; ranking still follows position.
        let cast = [member(1, "A"), member(1, "B")];
        let ranked_cast = assign_ranks(&cast);
        assert_eq!(ranked_cast[0].cast_order, 1);
        assert_eq!(ranked_cast[1].cast_order, 2);
    }

    #[test]
    fn genre_reconciliation_computes_set_difference() {
        let changes = reconcile_genres(&[1, 2, 3], &[2, 3, 4]);
        assert_eq!(changes.insert, vec![4]);
        assert_eq!(changes.delete, vec![1]);
    }

    #[test]
    fn genre_reconciliation_is_idempotent() {
        let desired = [5, 6];
        let first = reconcile_genres(&[], &desired);
        assert_eq!(first.insert, vec![5, 6]);

        // Simulate the applied state: a second call has nothing to do.
        let second = reconcile_genres(&desired, &desired);
        assert!(second.is_empty());
    }

    #[test]
    fn cast_reconciliation_inserts_updates_and_deletes() {
        let current = [ranked(1, "Cobb", 1), ranked(2, "Arthur", 2), ranked(3, "Mal", 3)];
        // Actor 1 dropped, 2 and 3 shift up, 4 joins.
        let desired = assign_ranks(&[member(2, "Arthur"), member(3, "Mal"), member(4, "Eames")]);

        let changes = reconcile_cast(&current, &desired);
        assert_eq!(changes.insert, vec![ranked(4, "Eames", 3)]);
        assert_eq!(changes.update, vec![ranked(2, "Arthur", 1), ranked(3, "Mal", 2)]);
        assert_eq!(changes.delete, vec![1]);
    }

    #[test]
    fn cast_reconciliation_detects_character_change() {
        let current = [ranked(1, "Cobb", 1)];
        let desired = [ranked(1, "Dom Cobb", 1)];
        let changes = reconcile_cast(&current, &desired);
        assert_eq!(changes.update, vec![ranked(1, "Dom Cobb", 1)]);
        assert!(changes.insert.is_empty());
        assert!(changes.delete.is_empty());
    }

    #[test]
    fn unchanged_cast_is_write_free() {
        let current = [ranked(1, "Cobb", 1), ranked(2, "Arthur", 2)];
        let desired = assign_ranks(&[member(1, "Cobb"), member(2, "Arthur")]);
        assert!(reconcile_cast(&current, &desired).is_empty());
    }

    #[test]
    fn duplicate_actor_ids_last_position_wins() {
        let desired = assign_ranks(&[member(1, "First"), member(1, "Last")]);
        let changes = reconcile_cast(&[], &desired);
        assert_eq!(changes.insert, vec![ranked(1, "Last", 2)]);
    }
}

//! Session scheduler interleaving new material with due reviews.
//!
//! Cards live in one map. An id sits either in the new-queue (never drawn)
//! or in the due list (answered at least once and waiting to come back),
//! never in both. Drawing a card takes it out of whichever structure held it.

use crate::algorithm::{Leitner, SpacedRepetitionAlgorithm};
use crate::types::{Card, CardId, DueOrder, EntryId};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::debug;

/// Where a drawn card came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    /// A previously answered card whose due time has passed.
    Review,
    /// The head of the new-card queue.
    Queued,
    /// Supplied by the fresh-entry callback.
    Fresh,
}

/// Review counter for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerStats {
    pub review_count: usize,
}

/// Card pool for one level session.
#[derive(Debug, Clone)]
pub struct Scheduler<A = Leitner> {
    algorithm: A,
    due_order: DueOrder,
    cards: HashMap<CardId, Card>,
    new_queue: VecDeque<CardId>,
    due: Vec<CardId>,
    next_id: CardId,
}

impl<A: SpacedRepetitionAlgorithm> Scheduler<A> {
    pub fn new(algorithm: A, due_order: DueOrder) -> Self {
        Self {
            algorithm,
            due_order,
            cards: HashMap::new(),
            new_queue: VecDeque::new(),
            due: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a card at bucket 0, due now, at the back of the new-queue.
    pub fn enqueue_new(
        &mut self,
        entry: EntryId,
        cloze_eligible: bool,
        meta: BTreeMap<String, String>,
        now: DateTime<Utc>,
    ) -> CardId {
        let id = self.next_id;
        self.next_id += 1;

        self.cards.insert(
            id,
            Card {
                id,
                entry,
                bucket: 0,
                due: now,
                consecutive_correct: 0,
                cloze_eligible,
                meta,
            },
        );
        self.new_queue.push_back(id);
        id
    }

    /// Pick the next card: a due review first, then the new-queue head,
    /// then whatever `generate_fresh` supplies. `None` means nothing is left.
    pub fn next_card<F>(&mut self, now: DateTime<Utc>, generate_fresh: F) -> Option<(Card, DrawSource)>
    where
        F: FnOnce(&Self) -> Option<(EntryId, bool, BTreeMap<String, String>)>,
    {
        if let Some(pos) = self.due_position(now) {
            let id = self.due.remove(pos);
            debug!(card_id = id, "drawing due review");
            return self.cards.get(&id).cloned().map(|c| (c, DrawSource::Review));
        }

        if let Some(id) = self.new_queue.pop_front() {
            debug!(card_id = id, "drawing queued card");
            return self.cards.get(&id).cloned().map(|c| (c, DrawSource::Queued));
        }

        let (entry, cloze_eligible, meta) = generate_fresh(self)?;
        let id = self.enqueue_new(entry, cloze_eligible, meta, now);
        self.new_queue.retain(|&queued| queued != id);
        debug!(card_id = id, entry, "drawing fresh card");
        self.cards.get(&id).cloned().map(|c| (c, DrawSource::Fresh))
    }

    fn due_position(&self, now: DateTime<Utc>) -> Option<usize> {
        let overdue = self
            .due
            .iter()
            .enumerate()
            .filter_map(|(pos, id)| self.cards.get(id).map(|card| (pos, card)))
            .filter(|(_, card)| card.due <= now);

        match self.due_order {
            DueOrder::InsertionOrder => overdue.map(|(pos, _)| pos).next(),
            DueOrder::EarliestDue => overdue
                .min_by_key(|(pos, card)| (card.due, *pos))
                .map(|(pos, _)| pos),
        }
    }

    /// Move a card up or down one bucket and make it reviewable again.
    /// Returns the updated card, or `None` for an unknown id.
    pub fn record_result(&mut self, id: CardId, correct: bool, now: DateTime<Utc>) -> Option<&Card> {
        let card = self.cards.get_mut(&id)?;
        let result = self.algorithm.schedule(card, correct, now);
        card.bucket = result.bucket;
        card.consecutive_correct = result.consecutive_correct;
        card.due = result.next_due;

        self.new_queue.retain(|&queued| queued != id);
        if !self.due.contains(&id) {
            self.due.push(id);
        }
        debug!(
            card_id = id,
            correct,
            bucket = result.bucket,
            due = %result.next_due,
            "rescheduled card"
        );
        self.cards.get(&id)
    }

    /// Forget a card entirely.
    pub fn remove_card(&mut self, id: CardId) -> Option<Card> {
        self.new_queue.retain(|&queued| queued != id);
        self.due.retain(|&due| due != id);
        self.cards.remove(&id)
    }

    /// Drop every card and restart id assignment.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.new_queue.clear();
        self.due.clear();
        self.next_id = 1;
    }

    /// Number of reviewable cards whose due time has passed.
    pub fn stats(&self, now: DateTime<Utc>) -> SchedulerStats {
        let review_count = self
            .due
            .iter()
            .filter_map(|id| self.cards.get(id))
            .filter(|card| card.due <= now)
            .count();
        SchedulerStats { review_count }
    }

    /// Earliest due time among reviewable cards, whether or not it has passed.
    pub fn next_due(&self) -> Option<DateTime<Utc>> {
        self.due
            .iter()
            .filter_map(|id| self.cards.get(id))
            .map(|card| card.due)
            .min()
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Whether any tracked card is bound to `entry`.
    pub fn tracks_entry(&self, entry: EntryId) -> bool {
        self.cards.values().any(|card| card.entry == entry)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn top_bucket(&self) -> usize {
        self.algorithm.bucket_count().saturating_sub(1)
    }

    pub fn is_queued(&self, id: CardId) -> bool {
        self.new_queue.contains(&id)
    }

    pub fn is_due_tracked(&self, id: CardId) -> bool {
        self.due.contains(&id)
    }
}

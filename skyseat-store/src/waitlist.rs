use skyseat_core::RejectReason;
use skyseat_shared::{SeatPosition, WaitlistEntry};
use tracing::debug;

#[derive(Debug)]
struct Slot {
    entry: WaitlistEntry,
    next: Option<usize>,
}

/// FIFO queue of collided requests, singly linked through an index arena.
///
/// Enqueue is O(1) at the tail. Removal walks from the head and keeps the
/// predecessor so the node can be spliced out in place.
#[derive(Debug, Default)]
pub struct Waitlist {
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl Waitlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends the entry and returns its 1-based queue position.
    pub fn enqueue(&mut self, entry: WaitlistEntry) -> Result<usize, RejectReason> {
        if self.contains(&entry.id) {
            return Err(RejectReason::DuplicateId(entry.id));
        }

        debug!("Waitlisted {} for {}", entry.id, entry.requested_seat);
        let slot = Slot { entry, next: None };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                index
            }
            None => {
                self.slots.push(Some(slot));
                self.slots.len() - 1
            }
        };

        match self.tail.and_then(|tail| self.slots[tail].as_mut()) {
            Some(tail) => tail.next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
        Ok(self.len)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WaitlistEntry> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            let slot = self.slots.get(cursor?)?.as_ref()?;
            cursor = slot.next;
            Some(&slot.entry)
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|entry| entry.id == id)
    }

    /// 1-based position of a waiting id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.iter().position(|entry| entry.id == id).map(|p| p + 1)
    }

    /// Dequeues the oldest entry waiting for exactly `seat`.
    pub fn take_matching(&mut self, seat: SeatPosition) -> Option<WaitlistEntry> {
        self.remove_where(|entry| entry.requested_seat == seat)
    }

    /// Withdraws a waiting request by id.
    pub fn remove(&mut self, id: &str) -> Option<WaitlistEntry> {
        self.remove_where(|entry| entry.id == id)
    }

    fn remove_where<F>(&mut self, mut matches: F) -> Option<WaitlistEntry>
    where
        F: FnMut(&WaitlistEntry) -> bool,
    {
        let mut prev: Option<usize> = None;
        let mut cursor = self.head;

        while let Some(index) = cursor {
            let slot = self.slots[index].as_ref()?;
            if !matches(&slot.entry) {
                prev = Some(index);
                cursor = slot.next;
                continue;
            }

            let slot = self.slots[index].take()?;
            match prev.and_then(|p| self.slots[p].as_mut()) {
                Some(prev_slot) => prev_slot.next = slot.next,
                None => self.head = slot.next,
            }
            if self.tail == Some(index) {
                self.tail = prev;
            }
            self.free.push(index);
            self.len -= 1;
            return Some(slot.entry);
        }

        None
    }
}

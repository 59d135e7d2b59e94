use skyseat_core::zoning::check_zone;
use skyseat_core::{PassengerStore, RejectReason, Rejected, SortReport, StoreKind};
use skyseat_shared::{PassengerRecord, SeatPosition};
use std::cmp::Ordering;
use tracing::{debug, info};

use crate::sorting::{by_id, by_name};

type NodeIndex = usize;
type RecordOrder = fn(&PassengerRecord, &PassengerRecord) -> Ordering;

#[derive(Debug)]
struct Node {
    record: PassengerRecord,
    prev: Option<NodeIndex>,
    next: Option<NodeIndex>,
}

/// Doubly linked list backend.
///
/// Nodes live in an arena and link to each other by index. Freed slots are
/// recycled, so an index stays valid for as long as its node is linked.
#[derive(Debug, Default)]
pub struct LinkedStore {
    nodes: Vec<Option<Node>>,
    free: Vec<NodeIndex>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    len: usize,
}

impl LinkedStore {
    pub fn new() -> Self {
        info!("Linked list store initialized");
        Self::default()
    }

    // Indices reachable from head, tail or a link always refer to live slots.
    fn node(&self, index: NodeIndex) -> &Node {
        self.nodes[index]
            .as_ref()
            .unwrap_or_else(|| panic!("linked store: dangling node index {index}"))
    }

    fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
        self.nodes[index]
            .as_mut()
            .unwrap_or_else(|| panic!("linked store: dangling node index {index}"))
    }

    fn next_of(&self, index: NodeIndex) -> Option<NodeIndex> {
        self.node(index).next
    }

    fn iter_nodes(&self) -> NodeIter<'_> {
        NodeIter {
            store: self,
            cursor: self.head,
        }
    }

    fn find_index(&self, id: &str) -> Option<NodeIndex> {
        self.iter_nodes()
            .find(|(_, node)| node.record.id == id)
            .map(|(index, _)| index)
    }

    fn find_by_seat(&self, seat: SeatPosition) -> Option<&PassengerRecord> {
        self.iter_nodes()
            .map(|(_, node)| &node.record)
            .find(|record| record.seat == seat)
    }

    fn allocate(&mut self, node: Node) -> NodeIndex {
        match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    /// O(1) tail append.
    fn push_back(&mut self, record: PassengerRecord) {
        let index = self.allocate(Node {
            record,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => self.head = Some(index),
        }
        self.tail = Some(index);
        self.len += 1;
    }

    /// O(1) unlink of a known node: only, head, tail and middle cases.
    fn unlink(&mut self, index: NodeIndex) -> PassengerRecord {
        let node = self.nodes[index]
            .take()
            .unwrap_or_else(|| panic!("linked store: dangling node index {index}"));

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.free.push(index);
        self.len -= 1;
        node.record
    }

    fn swap_payloads(&mut self, a: NodeIndex, b: NodeIndex) {
        if a == b {
            return;
        }
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (left, right) = self.nodes.split_at_mut(high);
        if let (Some(x), Some(y)) = (left[low].as_mut(), right[0].as_mut()) {
            std::mem::swap(&mut x.record, &mut y.record);
        }
    }

    /// Bubble sort that swaps record payloads between adjacent nodes and
    /// leaves every link untouched.
    fn bubble_sort(&mut self, compare: RecordOrder) -> SortReport {
        let mut report = SortReport::default();
        if self.len < 2 {
            return report;
        }

        // Nodes from `sorted_from` onwards are already in final position.
        let mut sorted_from: Option<NodeIndex> = None;
        loop {
            report.passes += 1;
            let mut swapped = false;
            let mut current = self.head;

            while let Some(index) = current {
                let next_index = match self.next_of(index) {
                    Some(next) if Some(next) != sorted_from => next,
                    _ => {
                        sorted_from = Some(index);
                        break;
                    }
                };

                report.comparisons += 1;
                let order = compare(&self.node(index).record, &self.node(next_index).record);
                if order == Ordering::Greater {
                    self.swap_payloads(index, next_index);
                    report.swaps += 1;
                    swapped = true;
                }
                current = Some(next_index);
            }

            if !swapped || sorted_from == self.head {
                break;
            }
        }

        report
    }

    /// Merge sort on the links themselves. Afterwards the backward links are
    /// rebuilt by the merge and the tail is found by walking to the end.
    fn merge_sort(&mut self, compare: RecordOrder) -> SortReport {
        let mut report = SortReport::default();
        if self.len < 2 {
            return report;
        }

        let head = self.head;
        self.head = self.merge_sort_from(head, compare, &mut report);
        if let Some(head) = self.head {
            self.node_mut(head).prev = None;
        }

        let mut tail = self.head;
        while let Some(next) = tail.and_then(|index| self.next_of(index)) {
            tail = Some(next);
        }
        self.tail = tail;

        report
    }

    fn merge_sort_from(
        &mut self,
        head: Option<NodeIndex>,
        compare: RecordOrder,
        report: &mut SortReport,
    ) -> Option<NodeIndex> {
        let first = head?;
        if self.next_of(first).is_none() {
            return Some(first);
        }

        report.passes += 1;
        let second = self.split(first);
        let left = self.merge_sort_from(Some(first), compare, report);
        let right = self.merge_sort_from(second, compare, report);
        self.merge(left, right, compare, report)
    }

    /// Fast/slow bisection. Cuts the list after the middle node and returns
    /// the head of the second half.
    fn split(&mut self, head: NodeIndex) -> Option<NodeIndex> {
        let mut slow = head;
        let mut fast = self.next_of(head);

        while let Some(step) = fast {
            fast = self.next_of(step);
            if let Some(step_two) = fast {
                slow = self.next_of(slow).unwrap_or(slow);
                fast = self.next_of(step_two);
            }
        }

        let second = self.next_of(slow);
        self.node_mut(slow).next = None;
        if let Some(second) = second {
            self.node_mut(second).prev = None;
        }
        second
    }

    fn merge(
        &mut self,
        mut left: Option<NodeIndex>,
        mut right: Option<NodeIndex>,
        compare: RecordOrder,
        report: &mut SortReport,
    ) -> Option<NodeIndex> {
        let mut merged_head: Option<NodeIndex> = None;
        let mut merged_tail: Option<NodeIndex> = None;

        loop {
            let pick = match (left, right) {
                (Some(l), Some(r)) => {
                    report.comparisons += 1;
                    if compare(&self.node(l).record, &self.node(r).record) != Ordering::Greater {
                        left = self.next_of(l);
                        l
                    } else {
                        right = self.next_of(r);
                        r
                    }
                }
                (Some(rest), None) | (None, Some(rest)) => {
                    // The remainder is already linked forwards; hook it on.
                    self.link_after(&mut merged_head, merged_tail, rest);
                    break;
                }
                (None, None) => break,
            };

            self.link_after(&mut merged_head, merged_tail, pick);
            merged_tail = Some(pick);
        }

        merged_head
    }

    fn link_after(
        &mut self,
        head: &mut Option<NodeIndex>,
        tail: Option<NodeIndex>,
        index: NodeIndex,
    ) {
        match tail {
            Some(tail) => self.node_mut(tail).next = Some(index),
            None => *head = Some(index),
        }
        self.node_mut(index).prev = tail;
    }

    /// Walks the list backwards from the tail. Used to check the back links.
    pub fn ids_reversed(&self) -> Vec<String> {
        let mut ids = Vec::with_capacity(self.len);
        let mut cursor = self.tail;
        while let Some(index) = cursor {
            let node = self.node(index);
            ids.push(node.record.id.clone());
            cursor = node.prev;
        }
        ids
    }
}

struct NodeIter<'a> {
    store: &'a LinkedStore,
    cursor: Option<NodeIndex>,
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = (NodeIndex, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        let node = self.store.node(index);
        self.cursor = node.next;
        Some((index, node))
    }
}

impl PassengerStore for LinkedStore {
    fn kind(&self) -> StoreKind {
        StoreKind::Linked
    }

    fn reserve(&mut self, record: PassengerRecord) -> Result<(), Rejected> {
        if let Err(reason) = check_zone(record.seat, record.travel_class) {
            return Err(Rejected::new(reason, record));
        }
        if self.find_by_seat(record.seat).is_some() {
            return Err(Rejected::new(RejectReason::SeatOccupied(record.seat), record));
        }
        if self.find_index(&record.id).is_some() {
            let reason = RejectReason::DuplicateId(record.id.clone());
            return Err(Rejected::new(reason, record));
        }

        debug!("[LL] Seated {} at {}", record.id, record.seat);
        self.push_back(record);
        Ok(())
    }

    fn cancel(&mut self, id: &str) -> Option<PassengerRecord> {
        let index = self.find_index(id)?;
        let record = self.unlink(index);
        debug!("[LL] Removed {} from {}", record.id, record.seat);
        Some(record)
    }

    fn find(&self, id: &str) -> Option<&PassengerRecord> {
        self.iter_nodes()
            .map(|(_, node)| &node.record)
            .find(|record| record.id == id)
    }

    fn is_occupied(&self, seat: SeatPosition) -> bool {
        self.find_by_seat(seat).is_some()
    }

    fn occupant_name(&self, seat: SeatPosition) -> Option<&str> {
        self.find_by_seat(seat).map(|record| record.name.as_str())
    }

    fn records(&self) -> Box<dyn Iterator<Item = &PassengerRecord> + '_> {
        Box::new(self.iter_nodes().map(|(_, node)| &node.record))
    }

    fn len(&self) -> usize {
        self.len
    }

    fn row_capacity(&self) -> Option<usize> {
        None
    }

    fn sort_by_name(&mut self) -> SortReport {
        self.bubble_sort(by_name)
    }

    fn sort_by_id(&mut self) -> SortReport {
        self.merge_sort(by_id)
    }
}

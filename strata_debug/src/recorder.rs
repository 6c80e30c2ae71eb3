// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Per-view change lists ([`on_view_changes`](TraceSink::on_view_changes))
//! store only the count.

use strata_core::trace::{CommitEvent, HitTestEvent, OrderUpdateEvent, TraceSink, ViewChange};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_COMMIT: u8 = 1;
const TAG_ORDER_UPDATE: u8 = 2;
const TAG_HIT_TEST: u8 = 3;
const TAG_VIEW_CHANGES_COUNT: u8 = 4;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    fn write_option_u32(&mut self, v: Option<u32>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u32(val);
            }
            None => {
                self.write_u8(0);
                self.write_u32(0);
            }
        }
    }
}

impl TraceSink for RecorderSink {
    fn on_commit(&mut self, e: &CommitEvent) {
        self.write_u8(TAG_COMMIT);
        self.write_u64(e.commit_index);
        self.write_u32(e.views);
        self.write_u32(e.topology_changes);
        self.write_u32(e.z_index_changes);
        self.write_u32(e.quad_changes);
        self.write_u32(e.added);
        self.write_u32(e.removed);
        self.write_bool(e.order_invalidated);
    }

    fn on_order_update(&mut self, e: &OrderUpdateEvent) {
        self.write_u8(TAG_ORDER_UPDATE);
        self.write_u64(e.commit_index);
        self.write_option_u32(e.root);
        self.write_bool(e.recomputed);
        self.write_u32(e.ordered);
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        self.write_u8(TAG_HIT_TEST);
        self.write_u64(e.commit_index);
        self.write_f64(e.x);
        self.write_f64(e.y);
        self.write_u32(e.candidates);
        self.write_option_u32(e.hit);
        self.write_u32(e.hit_order);
    }

    fn on_view_changes(&mut self, commit_index: u64, changes: &[ViewChange]) {
        self.write_u8(TAG_VIEW_CHANGES_COUNT);
        self.write_u64(commit_index);
        self.write_u32(u32::try_from(changes.len()).unwrap_or(u32::MAX));
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq)]
pub enum RecordedEvent {
    /// A [`CommitEvent`].
    Commit(CommitEvent),
    /// An [`OrderUpdateEvent`].
    OrderUpdate(OrderUpdateEvent),
    /// A [`HitTestEvent`].
    HitTest(HitTestEvent),
    /// View-change count for a commit.
    ViewChangesCount {
        /// Commit counter.
        commit_index: u64,
        /// Number of view changes.
        count: u32,
    },
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Iteration stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes: [u8; N] = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[v]| v)
    }

    fn read_bool(&mut self) -> Option<bool> {
        Some(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.read_u64().map(f64::from_bits)
    }

    fn read_option_u32(&mut self) -> Option<Option<u32>> {
        let present = self.read_u8()?;
        let val = self.read_u32()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn decode_commit(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Commit(CommitEvent {
            commit_index: self.read_u64()?,
            views: self.read_u32()?,
            topology_changes: self.read_u32()?,
            z_index_changes: self.read_u32()?,
            quad_changes: self.read_u32()?,
            added: self.read_u32()?,
            removed: self.read_u32()?,
            order_invalidated: self.read_bool()?,
        }))
    }

    fn decode_order_update(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::OrderUpdate(OrderUpdateEvent {
            commit_index: self.read_u64()?,
            root: self.read_option_u32()?,
            recomputed: self.read_bool()?,
            ordered: self.read_u32()?,
        }))
    }

    fn decode_hit_test(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::HitTest(HitTestEvent {
            commit_index: self.read_u64()?,
            x: self.read_f64()?,
            y: self.read_f64()?,
            candidates: self.read_u32()?,
            hit: self.read_option_u32()?,
            hit_order: self.read_u32()?,
        }))
    }

    fn decode_view_changes_count(&mut self) -> Option<RecordedEvent> {
        let commit_index = self.read_u64()?;
        let count = self.read_u32()?;
        Some(RecordedEvent::ViewChangesCount {
            commit_index,
            count,
        })
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        match self.read_u8()? {
            TAG_COMMIT => self.decode_commit(),
            TAG_ORDER_UPDATE => self.decode_order_update(),
            TAG_HIT_TEST => self.decode_hit_test(),
            TAG_VIEW_CHANGES_COUNT => self.decode_view_changes_count(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

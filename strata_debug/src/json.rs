// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON trace export.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a JSON array of instant events in the
//! [Chrome Trace Event Format][format].
//!
//! Scene events carry no wall-clock time, so each event's `ts` is its position
//! in the recording and `tid` is the commit it belongs to. Loading the file in
//! Perfetto lays events out in recording order, grouped per commit.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes)
        .enumerate()
        .map(|(seq, recorded)| to_json(seq, &recorded))
        .collect();
    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn to_json(seq: usize, recorded: &RecordedEvent) -> Value {
    let (name, cat, commit_index, args) = match recorded {
        RecordedEvent::Commit(e) => (
            "Commit",
            "Scene",
            e.commit_index,
            json!({
                "views": e.views,
                "topology_changes": e.topology_changes,
                "z_index_changes": e.z_index_changes,
                "quad_changes": e.quad_changes,
                "added": e.added,
                "removed": e.removed,
                "order_invalidated": e.order_invalidated,
            }),
        ),
        RecordedEvent::OrderUpdate(e) => (
            "OrderUpdate",
            "Order",
            e.commit_index,
            json!({
                "root": e.root,
                "recomputed": e.recomputed,
                "ordered": e.ordered,
            }),
        ),
        RecordedEvent::HitTest(e) => (
            "HitTest",
            "Input",
            e.commit_index,
            json!({
                "x": e.x,
                "y": e.y,
                "candidates": e.candidates,
                "hit": e.hit,
                "hit_order": e.hit_order,
            }),
        ),
        RecordedEvent::ViewChangesCount {
            commit_index,
            count,
        } => (
            "ViewChanges",
            "Rich",
            *commit_index,
            json!({ "count": count }),
        ),
    };
    json!({
        "ph": "i",
        "name": name,
        "cat": cat,
        "ts": seq,
        "pid": 0,
        "tid": commit_index,
        "s": "t",
        "args": args,
    })
}

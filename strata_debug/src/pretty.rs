// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use strata_core::trace::{
    CommitEvent, HitTestEvent, OrderUpdateEvent, TraceSink, ViewChange, ViewField,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    verbose: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            verbose: false,
        }
    }

    /// Also prints one line per view change instead of only the count.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn field_name(field: ViewField) -> &'static str {
    match field {
        ViewField::Topology => "topology",
        ViewField::ZIndex => "z-index",
        ViewField::Quad => "quad",
        ViewField::Added => "added",
        ViewField::Removed => "removed",
    }
}

fn slot(index: Option<u32>) -> String {
    index.map_or_else(|| "-".to_owned(), |i| format!("#{i}"))
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_commit(&mut self, e: &CommitEvent) {
        let order = if e.order_invalidated { "dirty" } else { "clean" };
        let _ = writeln!(
            self.writer,
            "[commit] #{} views={} topology={} z={} quad={} +{} -{} order={order}",
            e.commit_index,
            e.views,
            e.topology_changes,
            e.z_index_changes,
            e.quad_changes,
            e.added,
            e.removed,
        );
    }

    fn on_order_update(&mut self, e: &OrderUpdateEvent) {
        let action = if e.recomputed { "recomputed" } else { "up-to-date" };
        let _ = writeln!(
            self.writer,
            "[order] commit={} root={} {action} ordered={}",
            e.commit_index,
            slot(e.root),
            e.ordered,
        );
    }

    fn on_hit_test(&mut self, e: &HitTestEvent) {
        let _ = writeln!(
            self.writer,
            "[hit] commit={} at ({:.1}, {:.1}) candidates={} -> {} order={}",
            e.commit_index,
            e.x,
            e.y,
            e.candidates,
            slot(e.hit),
            e.hit_order,
        );
    }

    fn on_view_changes(&mut self, commit_index: u64, changes: &[ViewChange]) {
        let _ = writeln!(
            self.writer,
            "[views] commit={commit_index} changes={}",
            changes.len(),
        );
        if self.verbose {
            for change in changes {
                let _ = writeln!(
                    self.writer,
                    "  #{} {}",
                    change.view_index,
                    field_name(change.field),
                );
            }
        }
    }
}

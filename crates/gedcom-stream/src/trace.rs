// Dweve GEDCOM - Streaming GEDCOM Codec
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tracing decorators for node readers and writers.
//!
//! Wrap a reader or writer to log every call at `TRACE` level, which is
//! what the CLI's `--trace` flag does.

use tracing::trace;

use crate::event::NodeKind;
use crate::node::{NodeReader, NodeWriter};

/// Logs every [`NodeReader`] call before delegating it.
#[derive(Debug)]
pub struct TracingReader<R> {
    inner: R,
}

impl<R> TracingReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: NodeReader> NodeReader for TracingReader<R> {
    type Error = R::Error;

    fn read(&mut self) -> Result<bool, R::Error> {
        let more = self.inner.read()?;
        trace!(
            more,
            kind = ?self.inner.node_kind(),
            name = self.inner.name(),
            value = self.inner.value(),
            depth = self.inner.depth(),
            "read"
        );
        Ok(more)
    }

    fn node_kind(&self) -> NodeKind {
        self.inner.node_kind()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    fn value(&self) -> &str {
        self.inner.value()
    }

    fn depth(&self) -> usize {
        self.inner.depth()
    }

    fn attribute_count(&self) -> usize {
        self.inner.attribute_count()
    }

    fn move_to_attribute(&mut self, index: usize) -> bool {
        let moved = self.inner.move_to_attribute(index);
        trace!(index, moved, "move_to_attribute");
        moved
    }

    fn move_to_attribute_named(&mut self, name: &str) -> bool {
        let moved = self.inner.move_to_attribute_named(name);
        trace!(name, moved, "move_to_attribute_named");
        moved
    }

    fn move_to_next_attribute(&mut self) -> bool {
        let moved = self.inner.move_to_next_attribute();
        trace!(moved, "move_to_next_attribute");
        moved
    }

    fn move_to_element(&mut self) -> bool {
        let moved = self.inner.move_to_element();
        trace!(moved, "move_to_element");
        moved
    }

    fn read_attribute_value(&mut self) -> bool {
        let read = self.inner.read_attribute_value();
        trace!(read, value = self.inner.value(), "read_attribute_value");
        read
    }

    fn close(&mut self) {
        trace!("close reader");
        self.inner.close();
    }
}

/// Logs every [`NodeWriter`] call before delegating it.
#[derive(Debug)]
pub struct TracingWriter<W> {
    inner: W,
}

impl<W> TracingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: NodeWriter> NodeWriter for TracingWriter<W> {
    type Error = W::Error;

    fn start_document(&mut self) -> Result<(), W::Error> {
        trace!("start_document");
        self.inner.start_document()
    }

    fn start_element(&mut self, name: &str) -> Result<(), W::Error> {
        trace!(name, "start_element");
        self.inner.start_element(name)
    }

    fn start_attribute(&mut self, name: &str) -> Result<(), W::Error> {
        trace!(name, "start_attribute");
        self.inner.start_attribute(name)
    }

    fn end_attribute(&mut self) -> Result<(), W::Error> {
        trace!("end_attribute");
        self.inner.end_attribute()
    }

    fn text(&mut self, value: &str) -> Result<(), W::Error> {
        trace!(value, "text");
        self.inner.text(value)
    }

    fn escape(&mut self, content: &str) -> Result<(), W::Error> {
        trace!(content, "escape");
        self.inner.escape(content)
    }

    fn end_element(&mut self) -> Result<(), W::Error> {
        trace!("end_element");
        self.inner.end_element()
    }

    fn end_element_full(&mut self) -> Result<(), W::Error> {
        trace!("end_element_full");
        self.inner.end_element_full()
    }

    fn end_document(&mut self) -> Result<(), W::Error> {
        trace!("end_document");
        self.inner.end_document()
    }

    fn flush(&mut self) -> Result<(), W::Error> {
        self.inner.flush()
    }
}

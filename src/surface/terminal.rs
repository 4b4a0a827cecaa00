//! Terminal surface.
//!
//! Keeps its nodes in a [`MemorySurface`] and draws the tree under a node as
//! an indented outline:
//!
//! ```text
//! <div id="foo">
//!   <a>
//!     "bar"
//!   <b>
//!   <br>
//! ```
//!
//! Output is queued and flushed once, wrapped in a synchronized update so the
//! terminal never shows half a frame.
//!
//! The operation log of the inner memory surface starts switched off, so a
//! surface that lives as long as the host does not grow with every render.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{Attribute as StyleAttribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{BeginSynchronizedUpdate, EndSynchronizedUpdate};

use crate::error::SurfaceError;
use crate::types::{AttrValue, NODE_VALUE};
use super::memory::{MemoryNodeKind, MemorySurface};
use super::{NodeId, Surface};

/// Surface that presents itself on a terminal.
#[derive(Debug)]
pub struct TerminalSurface {
    inner: MemorySurface,
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSurface {
    pub fn new() -> Self {
        let mut inner = MemorySurface::new();
        inner.set_op_log(false);
        Self { inner }
    }

    /// New surface with one detached element to render into.
    pub fn with_container(tag: &str) -> Result<(Self, NodeId), SurfaceError> {
        let mut surface = Self::new();
        let container = surface.create_element(tag)?;
        Ok((surface, container))
    }

    /// Underlying node arena.
    pub fn memory(&self) -> &MemorySurface {
        &self.inner
    }

    /// Record surface operations again (for debugging a render).
    pub fn set_op_log(&mut self, enabled: bool) {
        self.inner.set_op_log(enabled);
    }

    pub fn clear_ops(&mut self) {
        self.inner.clear_ops();
    }

    /// Queue the outline of `root` onto `out` (does not flush).
    pub fn write_to<W: Write>(&self, out: &mut W, root: NodeId) -> io::Result<()> {
        let mut stack = vec![(root, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let Some(node) = self.inner.node(id) else { continue };
            let indent = "  ".repeat(depth);

            match node.kind() {
                MemoryNodeKind::Text => {
                    let text = node
                        .attributes()
                        .get(NODE_VALUE)
                        .map(AttrValue::to_string)
                        .unwrap_or_default();
                    queue!(out, Print(&indent), Print(format!("{:?}", text)), Print("\n"))?;
                }
                MemoryNodeKind::Element(tag) => {
                    queue!(
                        out,
                        Print(&indent),
                        SetForegroundColor(Color::Cyan),
                        SetAttribute(StyleAttribute::Bold),
                        Print(format!("<{}", tag)),
                        SetAttribute(StyleAttribute::Reset),
                    )?;
                    for (name, value) in node.attributes() {
                        queue!(
                            out,
                            SetForegroundColor(Color::Yellow),
                            Print(format!(" {}", name)),
                            ResetColor,
                            Print(format!("=\"{}\"", value)),
                        )?;
                    }
                    queue!(out, SetForegroundColor(Color::Cyan), Print(">"), ResetColor, Print("\n"))?;
                }
            }

            for child in node.children().iter().rev() {
                stack.push((*child, depth + 1));
            }
        }

        Ok(())
    }

    /// Draw the outline of `root` on stdout in a single flush.
    pub fn present(&self, root: NodeId) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        queue!(stdout, BeginSynchronizedUpdate)?;
        self.write_to(&mut stdout, root)?;
        queue!(stdout, EndSynchronizedUpdate)?;
        stdout.flush()
    }
}

impl Surface for TerminalSurface {
    fn create_element(&mut self, tag: &str) -> Result<NodeId, SurfaceError> {
        self.inner.create_element(tag)
    }

    fn create_text_node(&mut self) -> Result<NodeId, SurfaceError> {
        self.inner.create_text_node()
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SurfaceError> {
        self.inner.append_child(parent, child)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &AttrValue) -> Result<(), SurfaceError> {
        self.inner.set_attribute(node, name, value)
    }
}

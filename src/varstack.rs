//! # Variable Stack
//!
//! Tracks the stack-offset assignment for locals and function parameters
//! during code generation (spec §3). A local's offset is its 1-based
//! physical push order since the function's prologue — never reused, never
//! reset per `{…}` body — because nothing in the generated code ever pops
//! a nested block's locals off the runtime stack; an `if`/`while` body that
//! declares a local just keeps decrementing SP, and only the function
//! epilogue's `MOV SP R1` ever reclaims it. A closed block's locals fall out
//! of *name* scope (so referencing them by name afterwards is an error) but
//! their stack slots stay physically spent, so the next local still has to
//! count past them. The code generator negates the offset for locals
//! (`-offset`, below R1) and leaves it positive for parameters (`+offset`,
//! above R1).

use crate::ast::TypeRef;

#[derive(Debug, Clone)]
struct Entry {
    name: String,
    offset: i64,
    ty: TypeRef,
}

pub struct VarStack {
    entries: Vec<Entry>,
    /// Total locals ever pushed, including ones a `pop_frame` has since
    /// dropped from `entries`. `push` draws the next offset from here
    /// rather than from `entries.len()`, since `entries` shrinks on
    /// `pop_frame` but the physical stack slots a closed frame's locals
    /// occupied are never reclaimed.
    next_offset: i64,
    /// Saved `entries.len()` at each `start_frame`, one per nesting level
    /// still open. Used only to know how many entries a matching
    /// `pop_frame` should drop back out of *name lookup* — it plays no part
    /// in offset assignment.
    frame_starts: Vec<usize>,
}

impl VarStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_offset: 1,
            frame_starts: Vec::new(),
        }
    }

    /// Push the current length as the base of a new `{…}` body.
    pub fn start_frame(&mut self) {
        self.frame_starts.push(self.entries.len());
    }

    /// Push `name` onto the stack, returning its 1-based physical offset.
    /// Monotonic for the lifetime of this `VarStack` — never relative to
    /// the innermost `start_frame`, and never reused after a `pop_frame`,
    /// since the slot a popped local occupied is still physically spent.
    pub fn push(&mut self, name: impl Into<String>, ty: TypeRef) -> i64 {
        let offset = self.next_offset;
        self.next_offset += 1;
        self.entries.push(Entry {
            name: name.into(),
            offset,
            ty,
        });
        offset
    }

    /// Pop the most recently pushed entry.
    pub fn pop(&mut self) {
        self.entries.pop();
    }

    /// Remove every entry pushed since the matching `start_frame`, restoring
    /// the enclosing frame's base, and return how many were removed.
    pub fn pop_frame(&mut self) -> usize {
        let frame_start = self.frame_starts.pop().unwrap_or(0);
        let removed = self.entries.len() - frame_start;
        self.entries.truncate(frame_start);
        removed
    }

    /// Offset of the most recent entry named `name`, if any.
    pub fn get_offset(&self, name: &str) -> Option<i64> {
        self.entries.iter().rev().find(|e| e.name == name).map(|e| e.offset)
    }

    /// Offset and declared type of the most recent entry named `name`, if
    /// any, in one lookup — lets a caller mask a reassignment to the
    /// variable's width without a second, separate scan.
    pub fn get(&self, name: &str) -> Option<(i64, &TypeRef)> {
        self.entries.iter().rev().find(|e| e.name == name).map(|e| (e.offset, &e.ty))
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeRef> {
        self.entries.iter().rev().find(|e| e.name == name).map(|e| &e.ty)
    }
}

impl Default for VarStack {
    fn default() -> Self {
        Self::new()
    }
}

use std::cell::Cell;

#[derive(Debug, Clone)]
pub struct IndentTracker {
    pub level: Cell<u16>,
    pub spaces_per_level: u16,
}

impl IndentTracker {
    pub fn new(spaces_per_level: u16) -> Self {
        Self {
            level: Cell::new(0),
            spaces_per_level,
        }
    }

    pub fn current(&self) -> Indentation<'_> { Indentation::new(self, 0) }
}

/// a RAII guard for adding indentation levels.
///
/// example:
/// ```no_run
/// writeln!(f, "{indent}struct VertexData")?;
/// writeln!(f, "{indent}{{")?;
/// {
///     let indent = indent.deeper();
///     writeln!(f, "{indent}vec4 attribute_0 : POSITION;")?;
/// } //indent is back to how it was before
/// writeln!(f, "{indent}}};")?
/// ```
pub struct Indentation<'a> {
    depth_offset: u16,
    tracker: &'a IndentTracker,
}

impl Drop for Indentation<'_> {
    fn drop(&mut self) {
        let lv = &self.tracker.level;
        lv.set(lv.get().saturating_sub(self.depth_offset));
    }
}

impl<'a> Indentation<'a> {
    fn new(tracker: &'a IndentTracker, depth_offset: u16) -> Self {
        let lv = &tracker.level;
        lv.set(lv.get().saturating_add(depth_offset));
        Self { depth_offset, tracker }
    }

    pub fn deeper(&'a self) -> Indentation<'a> { Indentation::new(self.tracker, 1) }
}

impl std::fmt::Display for Indentation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let depth = (self.tracker.level.get() * self.tracker.spaces_per_level) as usize;
        write!(f, "{:depth$}", "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_indentation_restores() {
        let tracker = IndentTracker::new(2);
        let outer = tracker.current();
        assert_eq!(outer.to_string(), "");
        {
            let inner = outer.deeper();
            assert_eq!(inner.to_string(), "  ");
            let innermost = inner.deeper();
            assert_eq!(innermost.to_string(), "    ");
        }
        assert_eq!(outer.to_string(), "");
    }
}

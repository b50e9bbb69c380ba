use crate::Value;


/// Scopes a template is rendered against, outermost first.
///
/// Names are resolved from the innermost scope outwards, so inner scopes
/// shadow outer ones.
#[derive(Clone, Debug, Default)]
pub struct ContextStack<'a> {
    frames: Vec<&'a Value>,
}

impl<'a> ContextStack<'a> {
    pub fn new(root: &'a Value) -> Self {
        ContextStack { frames: vec![root] }
    }

    pub fn push(&mut self, frame: &'a Value) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Resolve a variable path such as `.`, `name` or `a.b.c`.
    ///
    /// The first segment is searched in every scope that has members,
    /// innermost first; the rest are member accesses on the result.
    /// A missing segment anywhere resolves the whole path to `None`.
    pub fn lookup(&self, path: &str) -> Option<&'a Value> {
        if path == "." {
            return self.frames.last().copied();
        }
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut value = self.frames.iter().rev().copied().find_map(|frame| frame.get(first))?;
        for segment in segments {
            value = value.get(segment)?;
        }
        Some(value)
    }

    /// Run `render` with `frame` as innermost scope, restoring the stack
    /// afterwards whatever `render` returns.
    pub(crate) fn with_frame<T>(&mut self, frame: &'a Value, render: impl FnOnce(&mut Self) -> T) -> T {
        let len = self.frames.len();
        self.frames.push(frame);
        let result = render(self);
        self.frames.truncate(len);
        result
    }
}

impl<'a> From<&'a Value> for ContextStack<'a> {
    fn from(root: &'a Value) -> Self {
        ContextStack::new(root)
    }
}

impl<'a> From<&'a [Value]> for ContextStack<'a> {
    fn from(frames: &'a [Value]) -> Self {
        ContextStack { frames: frames.iter().collect::<_>() }
    }
}

impl<'a> From<&'a Vec<Value>> for ContextStack<'a> {
    fn from(frames: &'a Vec<Value>) -> Self {
        ContextStack::from(frames.as_slice())
    }
}

impl<'a> From<Vec<&'a Value>> for ContextStack<'a> {
    fn from(frames: Vec<&'a Value>) -> Self {
        ContextStack { frames }
    }
}

//! Template-string context stack.
//!
//! Each open template string pushes a `Text` frame and each `${` pushes an
//! `Interpolation` frame. Braces opened inside an interpolation are counted
//! on its frame so the matching `}` can be told apart from the one that
//! closes the interpolation. A `}` with no interpolation on top is ordinary
//! punctuation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TemplateFrame {
    /// Inside the text of a template string.
    Text,
    /// Inside `${ ... }`, with the number of unmatched `{` seen so far.
    Interpolation { open_braces: u32 },
}

/// What a `}` meant in the current context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CloseBrace {
    /// Not inside an interpolation.
    Plain,
    /// Matches a `{` opened inside an interpolation.
    Nested,
    /// Closes the innermost interpolation.
    EndInterpolation,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct TemplateStack {
    frames: Vec<TemplateFrame>,
}

impl TemplateStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Whether the scanner is reading template text.
    #[inline]
    pub(crate) fn in_text(&self) -> bool {
        self.frames.last() == Some(&TemplateFrame::Text)
    }

    /// Number of open interpolations at any depth.
    pub(crate) fn interpolation_depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|frame| matches!(frame, TemplateFrame::Interpolation { .. }))
            .count()
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Handle a backtick. Returns true if it opened a template string and
    /// false if it closed one.
    pub(crate) fn quote(&mut self) -> bool {
        if self.in_text() {
            self.frames.pop();
            false
        } else {
            self.frames.push(TemplateFrame::Text);
            true
        }
    }

    /// Handle `${`. Returns the number of open interpolations afterwards.
    pub(crate) fn open_interpolation(&mut self) -> usize {
        self.frames
            .push(TemplateFrame::Interpolation { open_braces: 0 });
        self.interpolation_depth()
    }

    pub(crate) fn open_brace(&mut self) {
        if let Some(TemplateFrame::Interpolation { open_braces }) = self.frames.last_mut() {
            *open_braces += 1;
        }
    }

    pub(crate) fn close_brace(&mut self) -> CloseBrace {
        match self.frames.last_mut() {
            Some(TemplateFrame::Interpolation { open_braces }) if *open_braces > 0 => {
                *open_braces -= 1;
                CloseBrace::Nested
            }
            Some(TemplateFrame::Interpolation { .. }) => {
                self.frames.pop();
                CloseBrace::EndInterpolation
            }
            _ => CloseBrace::Plain,
        }
    }
}

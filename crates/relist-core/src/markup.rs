#![forbid(unsafe_code)]

//! Paired markup tag strings.

use std::borrow::Cow;

/// An opening and closing tag, e.g. `<b>` / `</b>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MarkupTag {
    pub open: Cow<'static, str>,
    pub close: Cow<'static, str>,
}

impl MarkupTag {
    /// Tag from explicit strings.
    #[must_use]
    pub fn new(open: impl Into<Cow<'static, str>>, close: impl Into<Cow<'static, str>>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// Tag for an element name: `named("b")` is `<b>` / `</b>`.
    #[must_use]
    pub fn named(tag: &str) -> Self {
        Self::new(format!("<{tag}>"), format!("</{tag}>"))
    }

    /// Surround `text` with the tag.
    #[must_use]
    pub fn wrap(&self, text: &str) -> String {
        let mut out = String::with_capacity(self.open.len() + text.len() + self.close.len());
        out.push_str(&self.open);
        out.push_str(text);
        out.push_str(&self.close);
        out
    }
}

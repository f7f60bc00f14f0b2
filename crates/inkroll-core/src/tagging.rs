//! Preserve-case tagging of string handles.
//!
//! Strings live either in read-only source data or in working memory. A
//! handle can be *mirrored* into the preserve-case view of its own residence,
//! which exempts it from decapitalization without touching its bytes.

/// Where a string's bytes live.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Residence {
    /// Read-only authored data.
    Source,
    /// Buffers filled at runtime (names, formatted strings).
    Working,
}

/// Preserve-case mirror a handle is viewed through.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mirror {
    #[default]
    None,
    Source,
    Working,
}

/// Borrowed string data plus its preserve-case tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TextHandle<'a> {
    text: &'a [u8],
    residence: Residence,
    mirror: Mirror,
}

impl<'a> TextHandle<'a> {
    pub const fn new(text: &'a [u8], residence: Residence) -> Self {
        Self {
            text,
            residence,
            mirror: Mirror::None,
        }
    }

    /// Handle to authored, read-only text.
    pub const fn source(text: &'a [u8]) -> Self {
        Self::new(text, Residence::Source)
    }

    /// Handle to a runtime buffer.
    pub const fn working(text: &'a [u8]) -> Self {
        Self::new(text, Residence::Working)
    }

    pub const fn text(&self) -> &'a [u8] {
        self.text
    }

    pub const fn residence(&self) -> Residence {
        self.residence
    }

    pub const fn mirror(&self) -> Mirror {
        self.mirror
    }

    pub const fn is_mirrored(&self) -> bool {
        !matches!(self.mirror, Mirror::None)
    }
}

/// Tags `handle` preserve-case in its own residence's mirror.
pub fn tag(handle: TextHandle<'_>) -> TextHandle<'_> {
    let mirror = match handle.residence {
        Residence::Source => Mirror::Source,
        Residence::Working => Mirror::Working,
    };
    TextHandle { mirror, ..handle }
}

/// Clears any preserve-case tag.
pub fn untag(handle: TextHandle<'_>) -> TextHandle<'_> {
    TextHandle {
        mirror: Mirror::None,
        ..handle
    }
}

pub fn is_tagged(handle: &TextHandle<'_>) -> bool {
    handle.is_mirrored()
}

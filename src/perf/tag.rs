//! Well-known measurement points

use std::fmt;

/// Measurement points the browser shell times.
///
/// The registry treats tags as opaque strings; this enum only fixes the
/// labels that show up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Application creation
    AppOnCreate,
    /// Main activity creation
    ActivityOnCreate,
    /// Browser fragment creation
    FragmentOnCreate,
    /// Memory snapshot taken once startup is done
    InitialMemory,
    /// Fragment creation until its first layout pass
    FragmentFirstDraw,
    /// Page load speed
    PageLoad,
}

impl Tag {
    /// Every well-known tag
    pub const ALL: [Tag; 6] = [
        Tag::AppOnCreate,
        Tag::ActivityOnCreate,
        Tag::FragmentOnCreate,
        Tag::InitialMemory,
        Tag::FragmentFirstDraw,
        Tag::PageLoad,
    ];

    /// Get the label written to logs
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::AppOnCreate => "APP_ON_CREATE",
            Tag::ActivityOnCreate => "ACTIVITY_ON_CREATE",
            Tag::FragmentOnCreate => "FRAGMENT_ON_CREATE",
            Tag::InitialMemory => "INITIAL_MEMORY",
            Tag::FragmentFirstDraw => "FRAGMENT_FIRST_DRAW",
            Tag::PageLoad => "PAGE_LOAD",
        }
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

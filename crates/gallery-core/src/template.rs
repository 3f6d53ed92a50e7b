use std::fmt;

/// Value of the content root's template attribute (`data-template`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TemplateId(String);

impl TemplateId {
    pub const HOME: &'static str = "home";
    pub const COLLECTIONS: &'static str = "collections";
    pub const ABOUT: &'static str = "about";
    pub const DETAIL: &'static str = "detail";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is(&self, id: &str) -> bool {
        self.0 == id
    }
}

impl From<&str> for TemplateId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Output formats and the primary/secondary roles they play

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Ps,
    Pdf,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Ps => "ps",
            Format::Pdf => "pdf",
        }
    }

    /// The complementary format
    pub fn other(self) -> Format {
        match self {
            Format::Ps => Format::Pdf,
            Format::Pdf => Format::Ps,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Ps => write!(f, "PostScript"),
            Format::Pdf => write!(f, "PDF"),
        }
    }
}

/// Which format is compiled directly and which one is converted from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRoles {
    pub primary: Format,
    pub secondary: Format,
}

impl FormatRoles {
    pub fn new(use_pdf: bool) -> Self {
        let primary = if use_pdf { Format::Pdf } else { Format::Ps };
        Self {
            primary,
            secondary: primary.other(),
        }
    }

    pub fn target_for(&self, format: Format) -> BuildTarget {
        if format == self.primary {
            BuildTarget::Primary
        } else {
            BuildTarget::Secondary
        }
    }

    pub fn format_of(&self, target: BuildTarget) -> Format {
        match target {
            BuildTarget::Primary => self.primary,
            BuildTarget::Secondary => self.secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTarget {
    Primary,
    Secondary,
}

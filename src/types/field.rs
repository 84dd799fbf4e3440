//! Names of the three co-registered input fields.

use std::fmt;

/// One of the three input fields of a cross-section record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Flow velocity normal to the cross-section (signed, m/s).
    Flow,
    /// Salinity (psu).
    Salinity,
    /// Cross-sectional area represented by a sample (m²).
    CrossSection,
}

impl FieldKind {
    /// All fields, in validation order.
    pub const ALL: [FieldKind; 3] = [FieldKind::Flow, FieldKind::Salinity, FieldKind::CrossSection];

    /// Field name as used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Flow => "flow",
            FieldKind::Salinity => "salinity",
            FieldKind::CrossSection => "cross_section",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

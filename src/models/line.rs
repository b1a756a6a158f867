//! Transmission line domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// A transmission line a report can be filed against.
///
/// Reports store the display label, not the line id, as their foreign
/// key; the label must therefore be stable and unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Line {
    pub id: Uuid,
    pub name: String,
    /// Nominal voltage in kV.
    pub voltage: i32,
    pub created_at: DateTime<Utc>,
}

impl Line {
    /// Display label, e.g. `"KIDATU-MOROGORO 220kV"`.
    pub fn label(&self) -> String {
        line_label(&self.name, self.voltage)
    }
}

/// Build the display label stored on reports.
pub fn line_label(name: &str, voltage: i32) -> String {
    format!("{} {}kV", name, voltage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_label() {
        assert_eq!(line_label("KIDATU-MOROGORO", 220), "KIDATU-MOROGORO 220kV");

        let line = Line {
            id: Uuid::new_v4(),
            name: "UBUNGO-CHALINZE".to_string(),
            voltage: 132,
            created_at: Utc::now(),
        };
        assert_eq!(line.label(), "UBUNGO-CHALINZE 132kV");
    }
}

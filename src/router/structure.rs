//! Structure catalogue
//!
//! The closed set of Harvest resource types the connector answers for.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A Harvest resource type recognised by the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Structure {
    Contacts,
    Clients,
    InvoiceMessages,
    InvoicePayments,
    Invoices,
    InvoiceItemCategories,
    EstimateMessages,
    Estimates,
    EstimateItemCategories,
    Expenses,
    ExpenseCategories,
    Tasks,
    TimeEntries,
    UserAssignments,
    TaskAssignments,
    Projects,
    Roles,
    BillableRates,
    CostRates,
    ProjectAssignments,
    Users,
}

impl Structure {
    /// Every supported structure
    pub const ALL: [Structure; 21] = [
        Structure::Contacts,
        Structure::Clients,
        Structure::InvoiceMessages,
        Structure::InvoicePayments,
        Structure::Invoices,
        Structure::InvoiceItemCategories,
        Structure::EstimateMessages,
        Structure::Estimates,
        Structure::EstimateItemCategories,
        Structure::Expenses,
        Structure::ExpenseCategories,
        Structure::Tasks,
        Structure::TimeEntries,
        Structure::UserAssignments,
        Structure::TaskAssignments,
        Structure::Projects,
        Structure::Roles,
        Structure::BillableRates,
        Structure::CostRates,
        Structure::ProjectAssignments,
        Structure::Users,
    ];

    /// Display name as callers spell it
    pub fn name(&self) -> &'static str {
        match self {
            Structure::Contacts => "Contacts",
            Structure::Clients => "Clients",
            Structure::InvoiceMessages => "Invoice Messages",
            Structure::InvoicePayments => "Invoice Payments",
            Structure::Invoices => "Invoices",
            Structure::InvoiceItemCategories => "Invoice Item Categories",
            Structure::EstimateMessages => "Estimate Messages",
            Structure::Estimates => "Estimates",
            Structure::EstimateItemCategories => "Estimate Item Categories",
            Structure::Expenses => "Expenses",
            Structure::ExpenseCategories => "Expense Categories",
            Structure::Tasks => "Tasks",
            Structure::TimeEntries => "Time Entries",
            Structure::UserAssignments => "User Assignments",
            Structure::TaskAssignments => "Task Assignments",
            Structure::Projects => "Projects",
            Structure::Roles => "Roles",
            Structure::BillableRates => "Billable Rates",
            Structure::CostRates => "Cost Rates",
            Structure::ProjectAssignments => "Project Assignments",
            Structure::Users => "Users",
        }
    }

    /// Key of the record array in a list response, e.g. `time_entries`
    pub fn envelope_key(&self) -> String {
        self.name().replace(' ', "_").to_lowercase()
    }
}

impl fmt::Display for Structure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Structure {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Structure::ALL
            .into_iter()
            .find(|structure| structure.name() == s)
            .ok_or_else(|| Error::invalid_structure(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for structure in Structure::ALL {
            assert_eq!(structure.name().parse::<Structure>().unwrap(), structure);
        }
    }

    #[test]
    fn test_unknown_structure() {
        let err = "Widgets".parse::<Structure>().unwrap_err();
        assert!(matches!(err, Error::InvalidStructure { ref structure } if structure == "Widgets"));
        assert!("clients".parse::<Structure>().is_err());
    }

    #[test]
    fn test_envelope_key() {
        assert_eq!(Structure::TimeEntries.envelope_key(), "time_entries");
        assert_eq!(Structure::Clients.envelope_key(), "clients");
        assert_eq!(
            Structure::InvoiceItemCategories.envelope_key(),
            "invoice_item_categories"
        );
    }
}

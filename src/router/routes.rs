//! Route descriptors and the routing table
//!
//! Each entry maps a (structure, kind) pair to a path template. `{name}`
//! slots in a template are required parameters that are consumed from the
//! query when the path is built.

use super::structure::Structure;
use crate::error::{Error, Result};
use crate::query::QueryParams;
use crate::types::Operation;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Bytes escaped in a path segment value
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Which endpoint family a route serves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// List endpoint, used by search and count
    List,
    /// Single-record endpoint, used by retrieve
    Single,
}

impl From<Operation> for RouteKind {
    fn from(operation: Operation) -> Self {
        match operation {
            Operation::Count | Operation::Search => RouteKind::List,
            Operation::Retrieve => RouteKind::Single,
        }
    }
}

/// Path descriptor for one (structure, kind) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    /// Path template, e.g. `/projects/{project_id}/task_assignments`
    pub template: &'static str,
    /// Path used when the template's slots are not all supplied
    pub fallback: Option<&'static str>,
}

/// A concrete path plus the parameters left over for the query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutedRequest {
    /// Resource path, always starting with `/`
    pub path: String,
    /// Parameters not consumed by the path
    pub residual: QueryParams,
}

impl Route {
    const fn fixed(template: &'static str) -> Self {
        Self {
            template,
            fallback: None,
        }
    }

    const fn nested(template: &'static str, fallback: &'static str) -> Self {
        Self {
            template,
            fallback: Some(fallback),
        }
    }

    /// Parameter names consumed by this route, in template order
    pub fn slots(&self) -> Vec<&'static str> {
        let mut slots = Vec::new();
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            slots.push(&rest[start + 1..start + len]);
            rest = &rest[start + len + 1..];
        }
        slots
    }

    /// Build the path for `params`, consuming slot parameters
    ///
    /// Empty values count as missing. Without a fallback, any missing slot
    /// fails with every missing name listed. Each value fills exactly one
    /// path segment and is never re-scanned for slots.
    pub fn build(&self, structure: Structure, mut params: QueryParams) -> Result<RoutedRequest> {
        let slots = self.slots();
        let missing: Vec<String> = slots
            .iter()
            .filter(|slot| params.get(slot).map_or(true, str::is_empty))
            .map(|slot| (*slot).to_string())
            .collect();

        if !missing.is_empty() {
            return match self.fallback {
                Some(fallback) => Ok(RoutedRequest {
                    path: fallback.to_string(),
                    residual: params,
                }),
                None => Err(Error::missing_params(structure.name(), missing)),
            };
        }

        let mut path = String::with_capacity(self.template.len());
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let slot = &rest[start + 1..start + len];
            let value = params.remove(slot).unwrap_or_default();
            if value == "." || value == ".." {
                return Err(Error::invalid_path_param(slot, value));
            }
            path.push_str(&rest[..start]);
            path.extend(utf8_percent_encode(&value, PATH_SEGMENT));
            rest = &rest[start + len + 1..];
        }
        path.push_str(rest);

        Ok(RoutedRequest {
            path,
            residual: params,
        })
    }
}

/// Routing table
///
/// Structures without a `Single` entry have no single-record endpoint.
pub static ROUTES: &[(Structure, RouteKind, Route)] = &[
    (Structure::Clients, RouteKind::List, Route::fixed("/clients")),
    (Structure::Clients, RouteKind::Single, Route::fixed("/clients/{client_id}")),
    (Structure::Contacts, RouteKind::List, Route::fixed("/contacts")),
    (Structure::Contacts, RouteKind::Single, Route::fixed("/contacts/{contact_id}")),
    (Structure::Invoices, RouteKind::List, Route::fixed("/invoices")),
    (Structure::Invoices, RouteKind::Single, Route::fixed("/invoices/{invoice_id}")),
    (
        Structure::InvoiceMessages,
        RouteKind::List,
        Route::nested("/invoices/{invoice_id}/messages", "/invoice_messages"),
    ),
    (
        Structure::InvoicePayments,
        RouteKind::List,
        Route::nested("/invoices/{invoice_id}/payments", "/invoice_payments"),
    ),
    (
        Structure::InvoiceItemCategories,
        RouteKind::List,
        Route::fixed("/invoice_item_categories"),
    ),
    (
        Structure::InvoiceItemCategories,
        RouteKind::Single,
        Route::fixed("/invoice_item_categories/{invoice_item_category_id}"),
    ),
    (Structure::Estimates, RouteKind::List, Route::fixed("/estimates")),
    (Structure::Estimates, RouteKind::Single, Route::fixed("/estimates/{estimate_id}")),
    (
        Structure::EstimateMessages,
        RouteKind::List,
        Route::nested("/estimates/{estimate_id}/messages", "/estimate_messages"),
    ),
    (
        Structure::EstimateItemCategories,
        RouteKind::List,
        Route::fixed("/estimate_item_categories"),
    ),
    (
        Structure::EstimateItemCategories,
        RouteKind::Single,
        Route::fixed("/estimate_item_categories/{estimate_item_category_id}"),
    ),
    (Structure::Expenses, RouteKind::List, Route::fixed("/expenses")),
    (Structure::Expenses, RouteKind::Single, Route::fixed("/expenses/{expense_id}")),
    (
        Structure::ExpenseCategories,
        RouteKind::List,
        Route::fixed("/expense_categories"),
    ),
    (
        Structure::ExpenseCategories,
        RouteKind::Single,
        Route::fixed("/expense_categories/{expense_category_id}"),
    ),
    (Structure::Tasks, RouteKind::List, Route::fixed("/tasks")),
    (Structure::Tasks, RouteKind::Single, Route::fixed("/tasks/{task_id}")),
    (Structure::TimeEntries, RouteKind::List, Route::fixed("/time_entries")),
    (
        Structure::TimeEntries,
        RouteKind::Single,
        Route::fixed("/time_entries/{time_entry_id}"),
    ),
    (Structure::Projects, RouteKind::List, Route::fixed("/projects")),
    (Structure::Projects, RouteKind::Single, Route::fixed("/projects/{project_id}")),
    (Structure::Roles, RouteKind::List, Route::fixed("/roles")),
    (Structure::Roles, RouteKind::Single, Route::fixed("/roles/{role_id}")),
    (Structure::Users, RouteKind::List, Route::fixed("/users")),
    (Structure::Users, RouteKind::Single, Route::fixed("/users/{user_id}")),
    (
        Structure::TaskAssignments,
        RouteKind::List,
        Route::nested("/projects/{project_id}/task_assignments", "/task_assignments"),
    ),
    (
        Structure::TaskAssignments,
        RouteKind::Single,
        Route::fixed("/projects/{project_id}/task_assignments/{task_assignment_id}"),
    ),
    (
        Structure::UserAssignments,
        RouteKind::List,
        Route::nested("/projects/{project_id}/user_assignments", "/user_assignments"),
    ),
    (
        Structure::UserAssignments,
        RouteKind::Single,
        Route::fixed("/projects/{project_id}/user_assignments/{user_assignment_id}"),
    ),
    (
        Structure::ProjectAssignments,
        RouteKind::List,
        Route::fixed("/users/{user_id}/project_assignments"),
    ),
    (
        Structure::BillableRates,
        RouteKind::List,
        Route::nested("/users/{user_id}/billable_rates", "/billable_rates"),
    ),
    (
        Structure::BillableRates,
        RouteKind::Single,
        Route::fixed("/users/{user_id}/billable_rates/{billable_rate_id}"),
    ),
    (
        Structure::CostRates,
        RouteKind::List,
        Route::nested("/users/{user_id}/cost_rates", "/cost_rates"),
    ),
    (
        Structure::CostRates,
        RouteKind::Single,
        Route::fixed("/users/{user_id}/cost_rates/{cost_rate_id}"),
    ),
];

/// Look up the route for a structure and kind
pub fn lookup(structure: Structure, kind: RouteKind) -> Option<&'static Route> {
    ROUTES
        .iter()
        .find(|(s, k, _)| *s == structure && *k == kind)
        .map(|(_, _, route)| route)
}

//! Application services for reconciliation and dashboard rendering.

mod dashboard;
mod reconciliation;

pub use dashboard::{
    ClientDashboard, ClientReport, ClientView, DashboardError, RecruiterDashboard, RecruiterView,
    ViewState,
};
pub use reconciliation::{FieldWriteError, ReconciliationReport, ReconciliationService};

//! Selling builds.
//!
//! Contains customers and the one-way export of a build into a sales order.

mod customer;
mod order;

pub use customer::Customer;
pub use order::{OrderLine, OrderStatus, SalePolicy, SalesOrder};

//! Sales orders created from published builds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::build::{BuildStatus, PcBuild};
use crate::catalog::Category;
use crate::error::{PcForgeError, Result};
use crate::ids::{BuildId, ComponentId, OrderId};
use crate::money::{Currency, Money};
use crate::sales::Customer;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order taken.
    #[default]
    Accepted,
    /// Machine being assembled.
    Assembling,
    /// On its way to the customer.
    Delivering,
    /// Handed over.
    Completed,
    /// Order cancelled.
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "accepted",
            OrderStatus::Assembling => "assembling",
            OrderStatus::Delivering => "delivering",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Accepted => "Accepted",
            OrderStatus::Assembling => "Assembling",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if order is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }

    /// Check if order can be cancelled.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Accepted | OrderStatus::Assembling)
    }
}

/// Rules the seller applies before turning a build into an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalePolicy {
    /// Only published builds may be sold.
    pub require_published: bool,
}

impl Default for SalePolicy {
    fn default() -> Self {
        Self {
            require_published: true,
        }
    }
}

/// One component of the sold build, as it was priced in the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub category: Category,
    pub component_id: ComponentId,
    pub name: String,
    pub unit_price: Money,
}

/// An order for one build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesOrder {
    /// Unique order identifier.
    pub id: OrderId,
    /// Human-readable order number.
    pub order_number: String,
    /// The build that was sold.
    pub build_id: BuildId,
    pub build_name: String,
    pub customer: Customer,
    pub status: OrderStatus,
    /// Component snapshot of the build.
    pub lines: Vec<OrderLine>,
    /// The build's sale price.
    pub total: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SalesOrder {
    /// Export a build into an order for `customer`.
    ///
    /// The total is the build's stored sale price; the lines are its stored
    /// components. Nothing is re-priced.
    pub fn from_build(
        build: &PcBuild,
        customer: Customer,
        currency: Currency,
        policy: SalePolicy,
    ) -> Result<Self> {
        if policy.require_published && build.status() != BuildStatus::Published {
            return Err(PcForgeError::BuildNotSellable {
                build: build.id.to_string(),
                status: build.status(),
            });
        }
        if build.final_price() < 0 {
            return Err(PcForgeError::ValidationError(format!(
                "build {} has a negative sale price",
                build.id
            )));
        }
        customer.validate()?;

        let lines = build
            .selection()
            .iter()
            .map(|(category, component)| OrderLine {
                category,
                component_id: component.id.clone(),
                name: component.name.clone(),
                unit_price: Money::new(component.price as i64, currency),
            })
            .collect();

        let now = Utc::now();
        let order = Self {
            id: OrderId::generate(),
            order_number: Self::generate_order_number(now),
            build_id: build.id.clone(),
            build_name: build.name.clone(),
            customer,
            status: OrderStatus::Accepted,
            lines,
            total: Money::new(build.final_price(), currency),
            created_at: now,
            updated_at: now,
        };

        info!(
            order = %order.order_number,
            build = %order.build_id,
            total = order.total.amount_minor,
            "build sold"
        );
        Ok(order)
    }

    /// Generate an order number from the creation time.
    fn generate_order_number(at: DateTime<Utc>) -> String {
        format!("ORD-{}", at.format("%Y%m%d-%H%M%S%3f"))
    }

    /// Number of components in the order.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of the component prices, before the build markup.
    pub fn cost_total(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(self.total.currency), |acc, line| acc + line.unit_price)
    }

    /// Cancel the order.
    pub fn cancel(&mut self) -> bool {
        if !self.status.can_cancel() {
            return false;
        }
        self.set_status(OrderStatus::Cancelled);
        true
    }

    /// Update order status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{BuildSelection, Markup};
    use crate::catalog::{Component, ComponentSpec};

    fn published_build() -> PcBuild {
        let selection: BuildSelection = vec![
            Component::new("2", "AMD Ryzen 5 7600X", 23000, ComponentSpec::cpu("AM5")),
            Component::new(
                "11",
                "MSI B650M Pro",
                12000,
                ComponentSpec::motherboard("AM5", "DDR5"),
            ),
            Component::new("8", "G.Skill 32GB DDR5-5600", 15000, ComponentSpec::ram("DDR5")),
            Component::new("5", "RTX 4060", 35000, ComponentSpec::gpu(115)),
            Component::new("20", "Kingston NV2 500GB", 4000, ComponentSpec::storage()),
            Component::new("14", "EVGA 650W Gold", 8000, ComponentSpec::psu(650)),
            Component::new(
                "23",
                "be quiet! Pure Rock 2",
                3500,
                ComponentSpec::cooler(["LGA1700", "AM5"]),
            ),
            Component::new("17", "NZXT H7 Flow", 12000, ComponentSpec::Case),
        ]
        .into_iter()
        .collect();
        let mut build =
            PcBuild::new("Budget build", "", selection, Markup::Fixed(10000.0)).unwrap();
        build.publish().unwrap();
        build
    }

    #[test]
    fn test_order_from_build() {
        let build = published_build();
        let customer = Customer::new("Ivan Petrov", "+7 (999) 123-45-67").with_city("Moscow");
        let order =
            SalesOrder::from_build(&build, customer, Currency::RUB, SalePolicy::default()).unwrap();

        assert_eq!(order.total, Money::new(122500, Currency::RUB));
        assert_eq!(order.item_count(), 8);
        assert_eq!(order.cost_total().amount_minor, 112500);
        assert_eq!(order.status, OrderStatus::Accepted);
        assert_eq!(order.lines[0].category, Category::Cpu);
        assert!(order.order_number.starts_with("ORD-"));
    }

    #[test]
    fn test_draft_not_sellable() {
        let build = PcBuild::new("Draft", "", BuildSelection::new(), Markup::default()).unwrap();
        let err = SalesOrder::from_build(
            &build,
            Customer::new("Ivan", "123"),
            Currency::RUB,
            SalePolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            PcForgeError::BuildNotSellable {
                status: BuildStatus::Draft,
                ..
            }
        ));

        let relaxed = SalePolicy {
            require_published: false,
        };
        assert!(
            SalesOrder::from_build(&build, Customer::new("Ivan", "123"), Currency::RUB, relaxed)
                .is_ok()
        );
    }

    #[test]
    fn test_negative_price_not_sellable() {
        let mut build = published_build();
        build.set_markup(Markup::Fixed(-200000.0)).unwrap();
        let err = SalesOrder::from_build(
            &build,
            Customer::new("Ivan", "123"),
            Currency::RUB,
            SalePolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, PcForgeError::ValidationError(_)));
    }

    #[test]
    fn test_order_cancel() {
        let build = published_build();
        let mut order = SalesOrder::from_build(
            &build,
            Customer::new("Ivan", "123"),
            Currency::RUB,
            SalePolicy::default(),
        )
        .unwrap();
        assert!(order.cancel());
        assert_eq!(order.status, OrderStatus::Cancelled);
        assert!(!order.cancel());
    }

    #[test]
    fn test_order_status_can_cancel() {
        assert!(OrderStatus::Accepted.can_cancel());
        assert!(OrderStatus::Assembling.can_cancel());
        assert!(!OrderStatus::Delivering.can_cancel());
        assert!(!OrderStatus::Completed.can_cancel());
    }
}

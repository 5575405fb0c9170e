//! Dashboard KPIs derived from daily analytics rows.

use serde::{Deserialize, Serialize};

use crate::api::Analytics;

/// Headline numbers of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Kpis {
    /// Sum of bookings over all rows.
    pub total_bookings: u64,
    /// Sum of revenue over all rows.
    pub total_revenue: f64,
    /// Users, approximated as one per booking.
    pub total_users: u64,
    /// Revenue per booking, two decimals; 0 without bookings.
    pub average_order_value: f64,
    /// Bookings relative to the best day across all rows, as a percentage
    /// with one decimal; 0 when there is no best day.
    pub conversion_rate: f64,
}

impl Kpis {
    /// Computes the KPIs over `rows`.
    pub fn from_analytics(rows: &[Analytics]) -> Self {
        let total_bookings: u64 = rows.iter().map(|r| r.total_bookings).sum();
        let total_revenue: f64 = rows.iter().map(|r| r.total_revenue).sum();

        let average_order_value = if total_bookings > 0 {
            round_to(total_revenue / total_bookings as f64, 2)
        } else {
            0.0
        };

        let max_bookings = rows.iter().map(|r| r.total_bookings).max().unwrap_or(0);
        let conversion_rate = if max_bookings > 0 {
            let capacity = rows.len() as f64 * max_bookings as f64;
            round_to(total_bookings as f64 / capacity * 100.0, 1)
        } else {
            0.0
        };

        Self {
            total_bookings,
            total_revenue,
            total_users: total_bookings,
            average_order_value,
            conversion_rate,
        }
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

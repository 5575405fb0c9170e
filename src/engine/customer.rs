use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    api::RawCustomer,
    core::{sort::SortValue, store::Keyed},
    export::{ColumnSpec, columns},
    normalize::normalize_customer,
    record::{CustomerPatch, CustomerRecord},
    types::CustomerId,
};

use super::{query::SortSpec, traits::ListEntity};

/// Sortable customer columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CustomerSortKey {
    /// Numeric id.
    Id,
    /// Name.
    Name,
    /// Email.
    Email,
    /// Phone.
    Phone,
}

/// Customers have no categorical filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerFilters;

/// Summary of the customer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomerStats {
    /// Filtered customer count.
    pub total_customers: usize,
}

impl Keyed for CustomerRecord {
    type Id = CustomerId;

    fn id(&self) -> &CustomerId {
        &self.id
    }
}

impl ListEntity for CustomerRecord {
    type Raw = RawCustomer;
    type SortKey = CustomerSortKey;
    type Filters = CustomerFilters;
    type Patch = CustomerPatch;
    type Stats = CustomerStats;

    const NOUN: &'static str = "customer";
    const EXPORT_FILE_NAME: &'static str = "customers.csv";

    fn normalize(raw: RawCustomer, _now: DateTime<Utc>) -> Self {
        normalize_customer(raw)
    }

    fn default_sort() -> SortSpec<CustomerSortKey> {
        SortSpec::asc(CustomerSortKey::Id)
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.phone.as_str()]
    }

    fn matches_filters(&self, _filters: &CustomerFilters) -> bool {
        true
    }

    fn sort_value(&self, key: CustomerSortKey) -> SortValue<'_> {
        match key {
            CustomerSortKey::Id => SortValue::Int(self.id),
            CustomerSortKey::Name => SortValue::Text(&self.name),
            CustomerSortKey::Email => SortValue::Text(&self.email),
            CustomerSortKey::Phone => SortValue::Text(&self.phone),
        }
    }

    fn apply_patch(&mut self, patch: &CustomerPatch) {
        patch.apply_to(self);
    }

    fn aggregate(filtered: &[Self]) -> CustomerStats {
        CustomerStats {
            total_customers: filtered.len(),
        }
    }

    fn export_columns() -> Vec<ColumnSpec<Self>> {
        columns::customer_columns()
    }
}

use crate::core::store::Store;
use crate::ledger::MonthlySummary;

use super::{ServiceError, ServiceResult};

pub struct SummaryService;

impl SummaryService {
    /// Monthly totals and category breakdown for `month` (1-12) of `year`.
    pub fn monthly(store: &Store, month: u32, year: i32) -> ServiceResult<MonthlySummary> {
        if !(1..=12).contains(&month) {
            return Err(ServiceError::Invalid(format!(
                "Month must be between 1 and 12, got {month}"
            )));
        }
        Ok(store.monthly_summary(month, year)?)
    }
}

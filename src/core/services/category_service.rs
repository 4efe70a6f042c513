use crate::ledger::TransactionKind;

pub struct CategoryService;

impl CategoryService {
    /// Categories offered for `kind`, in menu order.
    pub fn list(kind: TransactionKind) -> &'static [&'static str] {
        kind.categories()
    }
}

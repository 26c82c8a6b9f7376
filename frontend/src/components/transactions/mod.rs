pub mod devotee_search;
pub mod edit_transaction_modal;
pub mod edit_transactions;
pub mod transaction_list;

pub use devotee_search::DevoteeSearch;
pub use edit_transactions::EditTransactions;
pub use transaction_list::TransactionList;

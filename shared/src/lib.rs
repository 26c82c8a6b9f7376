use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod config;
pub mod gateway;
pub mod notification;
pub mod permissions;
pub mod record;
pub mod session;
pub mod table;
pub mod validation;

pub use config::PortalConfig;
pub use gateway::{GatewayError, GatewayResponse};
pub use notification::{Notification, ToastKind};
pub use permissions::{DashboardTab, Section};
pub use record::{FieldValue, Record, TableRecord};
pub use session::{Session, SessionStore, SessionUser};
pub use table::{PageState, SortDirection, SortState, TableState, TableView};
pub use validation::FormErrors;

/// Portal user tier. Only drives which screens render; the gateway enforces
/// real authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    SuperAdmin,
    ReceptionistAdmin,
    Volunteer,
    Guest,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::SuperAdmin,
        Role::ReceptionistAdmin,
        Role::Volunteer,
        Role::Guest,
    ];

    /// Unknown ids get the least privileged tier.
    pub fn from_id(id: i64) -> Role {
        match id {
            1 => Role::SuperAdmin,
            2 => Role::ReceptionistAdmin,
            3 => Role::Volunteer,
            _ => Role::Guest,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            Role::SuperAdmin => 1,
            Role::ReceptionistAdmin => 2,
            Role::Volunteer => 3,
            Role::Guest => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::SuperAdmin => "Super Admin",
            Role::ReceptionistAdmin => "Receptionist Admin",
            Role::Volunteer => "Volunteer",
            Role::Guest => "Guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Display name for a raw role id; ids outside 1..=4 read "Unknown".
pub fn role_name(role_id: i64) -> &'static str {
    match role_id {
        1..=4 => Role::from_id(role_id).label(),
        _ => "Unknown",
    }
}

/// Portal account as returned by `listusers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role_id: i64,
    pub is_active: bool,
    /// Creation timestamp as sent by the API
    #[serde(default)]
    pub created_at: String,
}

impl User {
    pub fn role_name(&self) -> &'static str {
        role_name(self.role_id)
    }

    pub fn status_label(&self) -> &'static str {
        if self.is_active {
            "Active"
        } else {
            "Inactive"
        }
    }
}

impl TableRecord for User {
    fn record_id(&self) -> String {
        self.user_id.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "UserId" => self.user_id.as_str().into(),
            "Name" => self.name.as_str().into(),
            "Email" => self.email.as_str().into(),
            "RoleId" => self.role_id.into(),
            "IsActive" => self.is_active.into(),
            "CreatedAt" => FieldValue::date(&self.created_at),
            _ => FieldValue::Missing,
        }
    }

    fn field_keys(&self) -> Vec<&str> {
        vec!["UserId", "Name", "Email", "RoleId", "IsActive", "CreatedAt"]
    }

    /// Users are also found by the name of their role.
    fn search_values(&self) -> Vec<String> {
        let mut values: Vec<String> = self
            .field_keys()
            .into_iter()
            .filter_map(|key| self.field(key).search_text())
            .collect();
        values.push(self.role_name().to_string());
        values
    }
}

/// One entry of the service catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    /// Free-text price; the catalog stores it as a string
    #[serde(default, deserialize_with = "string_or_number")]
    pub price: String,
    #[serde(default)]
    pub group: String,
}

impl TableRecord for Service {
    fn record_id(&self) -> String {
        self.name.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "group" => self.group.as_str().into(),
            "name" => self.name.as_str().into(),
            "price" => self.price.as_str().into(),
            _ => FieldValue::Missing,
        }
    }

    fn field_keys(&self) -> Vec<&str> {
        vec!["group", "name", "price"]
    }
}

/// Devotee payment recorded against a service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    pub transaction_id: String,
    #[serde(default)]
    pub devotee_name: String,
    #[serde(default)]
    pub devotee_email: String,
    #[serde(default)]
    pub service_name: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub transaction_date: String,
    #[serde(default)]
    pub notes: String,
}

impl Transaction {
    pub fn formatted_amount(&self) -> String {
        format_amount(self.amount)
    }

    pub fn formatted_date(&self) -> String {
        format_display_date(&self.transaction_date)
    }
}

impl TableRecord for Transaction {
    fn record_id(&self) -> String {
        self.transaction_id.clone()
    }

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "TransactionId" => self.transaction_id.as_str().into(),
            "DevoteeName" => self.devotee_name.as_str().into(),
            "DevoteeEmail" => self.devotee_email.as_str().into(),
            "ServiceName" => self.service_name.as_str().into(),
            "Amount" => self.amount.into(),
            "PaymentMethod" => self.payment_method.as_str().into(),
            "TransactionDate" => FieldValue::date(&self.transaction_date),
            "Notes" => self.notes.as_str().into(),
            _ => FieldValue::Missing,
        }
    }

    fn field_keys(&self) -> Vec<&str> {
        vec![
            "TransactionId",
            "DevoteeName",
            "DevoteeEmail",
            "ServiceName",
            "Amount",
            "PaymentMethod",
            "TransactionDate",
            "Notes",
        ]
    }
}

/// Swap in an edited transaction by id; other rows are left as they are.
pub fn replace_transaction(list: &[Transaction], edited: &Transaction) -> Vec<Transaction> {
    list.iter()
        .map(|t| {
            if t.transaction_id == edited.transaction_id {
                edited.clone()
            } else {
                t.clone()
            }
        })
        .collect()
}

/// A person who appears on at least one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Devotee {
    pub name: String,
    pub email: String,
}

impl Devotee {
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.name.eq_ignore_ascii_case(transaction.devotee_name.trim())
            && self.email.eq_ignore_ascii_case(transaction.devotee_email.trim())
    }
}

/// Distinct devotees in first-seen order.
pub fn unique_devotees(transactions: &[Transaction]) -> Vec<Devotee> {
    let mut seen = std::collections::HashSet::new();
    transactions
        .iter()
        .filter(|tx| !tx.devotee_name.trim().is_empty())
        .filter_map(|tx| {
            let devotee = Devotee {
                name: tx.devotee_name.trim().to_string(),
                email: tx.devotee_email.trim().to_string(),
            };
            let key = (devotee.name.to_lowercase(), devotee.email.to_lowercase());
            seen.insert(key).then_some(devotee)
        })
        .collect()
}

/// Typeahead: devotees whose name or email contains the query.
pub fn suggest_devotees<'a>(
    devotees: &'a [Devotee],
    query: &str,
    limit: usize,
) -> Vec<&'a Devotee> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    devotees
        .iter()
        .filter(|d| {
            d.name.to_lowercase().contains(&needle) || d.email.to_lowercase().contains(&needle)
        })
        .take(limit)
        .collect()
}

pub fn format_amount(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// "Mar 1, 2025, 10 AM"; unparseable input is returned unchanged.
pub fn format_display_date(raw: &str) -> String {
    match record::parse_timestamp(raw) {
        Some(at) => at.format("%b %-d, %Y, %I %p").to_string(),
        None => raw.to_string(),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        serde_json::Value::Number(n) => record::format_number(n.as_f64().unwrap_or_default()),
        other => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user(name: &str, role_id: i64) -> User {
        User {
            user_id: format!("{}@example.org", name.to_lowercase()),
            name: name.to_string(),
            email: format!("{}@example.org", name.to_lowercase()),
            role_id,
            is_active: true,
            created_at: "2025-01-15T09:30:00Z".to_string(),
        }
    }

    #[test]
    fn test_role_ids_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_id(role.id()), role);
        }
        assert_eq!(Role::from_id(0), Role::Guest);
        assert_eq!(Role::from_id(99), Role::Guest);
        assert_eq!(role_name(2), "Receptionist Admin");
        assert_eq!(role_name(7), "Unknown");
    }

    #[test]
    fn test_user_deserializes_from_api_shape() {
        let user: User = serde_json::from_value(json!({
            "UserId": "ann@example.org",
            "Name": "Ann",
            "Email": "ann@example.org",
            "RoleId": 1,
            "IsActive": false,
            "CreatedAt": "2025-01-15T09:30:00Z"
        }))
        .unwrap();
        assert_eq!(user.role_name(), "Super Admin");
        assert_eq!(user.status_label(), "Inactive");
    }

    #[test]
    fn test_user_search_includes_role_name() {
        let users = vec![user("Ann", 1), user("Bob", 3)];
        let hits = table::filter_records(&users, "volunteer");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Bob");
    }

    #[test]
    fn test_user_sort_by_created_at_is_chronological() {
        let mut older = user("Zed", 1);
        older.created_at = "2023-06-01T00:00:00Z".into();
        let users = vec![user("Ann", 1), older];
        let state = TableState {
            sort: SortState::by("CreatedAt", SortDirection::Ascending),
            ..TableState::default()
        };
        let view = state.present(&users);
        assert_eq!(view.rows[0].name, "Zed");
    }

    #[test]
    fn test_blank_created_at_sorts_first() {
        let mut dated = user("Dated", 1);
        dated.created_at = "2025-01-01T00:00:00Z".into();
        let mut blank = user("Blank", 1);
        blank.created_at = String::new();
        let users = vec![dated, blank];
        let order = |state: &TableState| -> Vec<String> {
            let view = state.present(&users);
            view.rows.iter().map(|u| u.name.clone()).collect()
        };
        let mut state = TableState::default();
        state.toggle_sort("CreatedAt");
        assert_eq!(order(&state), vec!["Blank", "Dated"]);
        state.toggle_sort("CreatedAt");
        assert_eq!(order(&state), vec!["Dated", "Blank"]);
    }

    #[test]
    fn test_blank_transaction_date_sorts_first() {
        let tx = |id: &str, date: &str| Transaction {
            transaction_id: id.to_string(),
            transaction_date: date.to_string(),
            ..Transaction::default()
        };
        let transactions = vec![tx("t-dated", "2024-05-01"), tx("t-blank", "")];
        assert!(transactions[1].field("TransactionDate").is_missing());
        let state = TableState {
            sort: SortState::by("TransactionDate", SortDirection::Ascending),
            ..TableState::default()
        };
        let view = state.present(&transactions);
        assert_eq!(view.rows[0].transaction_id, "t-blank");
        assert_eq!(view.rows[1].transaction_id, "t-dated");
    }

    #[test]
    fn test_service_price_accepts_numbers() {
        let services: Vec<Service> = serde_json::from_value(json!([
            {"name": "Archana", "price": "11", "group": "Pooja"},
            {"name": "Abhishekam", "price": 51, "group": "Pooja"},
            {"name": "General Donation"}
        ]))
        .unwrap();
        assert_eq!(services[1].price, "51");
        assert_eq!(services[2].price, "");
        assert_eq!(services[2].group, "");
    }

    #[test]
    fn test_unique_devotees_and_suggestions() {
        let tx = |name: &str, email: &str| Transaction {
            transaction_id: format!("{name}-{email}"),
            devotee_name: name.to_string(),
            devotee_email: email.to_string(),
            ..Transaction::default()
        };
        let transactions = vec![
            tx("Lakshmi Rao", "lrao@example.org"),
            tx("lakshmi rao ", "LRAO@example.org"),
            tx("Ravi Kumar", "ravi@example.org"),
            tx("", "nobody@example.org"),
        ];
        let devotees = unique_devotees(&transactions);
        assert_eq!(devotees.len(), 2);
        assert!(devotees[0].matches(&transactions[1]));
        assert!(!devotees[1].matches(&transactions[0]));

        let hits = suggest_devotees(&devotees, "RAV", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ravi Kumar");
        assert!(suggest_devotees(&devotees, "  ", 5).is_empty());
    }

    #[test]
    fn test_replace_transaction_by_id() {
        let tx = |id: &str, amount: f64| Transaction {
            transaction_id: id.to_string(),
            amount,
            ..Transaction::default()
        };
        let list = vec![tx("t1", 10.0), tx("t2", 20.0)];
        let next = replace_transaction(&list, &tx("t2", 25.0));
        assert_eq!(next[0], list[0]);
        assert_eq!(next[1].amount, 25.0);

        let unchanged = replace_transaction(&list, &tx("t9", 1.0));
        assert_eq!(unchanged, list);
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(format_amount(51.0), "$51.00");
        assert_eq!(format_amount(-2.5), "-$2.50");
        assert_eq!(format_display_date("2025-03-01T10:15:00Z"), "Mar 1, 2025, 10 AM");
        assert_eq!(format_display_date("sometime"), "sometime");
    }
}

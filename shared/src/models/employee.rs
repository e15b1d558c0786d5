//! Employee Model and operator context

use serde::{Deserialize, Serialize};

/// Employee entity (store staff)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: String,
    /// Store reference (String ID)
    pub store_id: String,
    /// Human-facing employee code shown on receipts and rosters
    pub employee_code: String,
    pub name: String,
    pub phone: Option<String>,
    pub role: String,
    pub is_active: bool,
    pub avatar_url: Option<String>,
}

/// Operator context threaded into the checkout session
///
/// Passed explicitly at construction instead of being read from ambient
/// process-wide state, so every transaction carries the identity of the
/// cashier and store that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperatorContext {
    pub employee_id: String,
    /// Name snapshot for audit
    pub employee_name: String,
    pub store_id: String,
}

impl OperatorContext {
    pub fn new(
        employee_id: impl Into<String>,
        employee_name: impl Into<String>,
        store_id: impl Into<String>,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            employee_name: employee_name.into(),
            store_id: store_id.into(),
        }
    }
}

impl From<&Employee> for OperatorContext {
    fn from(employee: &Employee) -> Self {
        Self {
            employee_id: employee.id.clone(),
            employee_name: employee.name.clone(),
            store_id: employee.store_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_context_from_employee() {
        let employee = Employee {
            id: "emp-1".to_string(),
            store_id: "store-1".to_string(),
            employee_code: "K-07".to_string(),
            name: "Sari".to_string(),
            phone: None,
            role: "cashier".to_string(),
            is_active: true,
            avatar_url: None,
        };

        let ctx = OperatorContext::from(&employee);
        assert_eq!(ctx.employee_id, "emp-1");
        assert_eq!(ctx.employee_name, "Sari");
        assert_eq!(ctx.store_id, "store-1");
    }
}

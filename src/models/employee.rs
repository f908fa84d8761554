//! Employee identity model.
//!
//! Identity fields travel alongside a calculation for display and export.
//! They never influence the computed figures.

use serde::{Deserialize, Serialize};

/// Identity of the employee a payslip is prepared for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    /// Full name as printed on the payslip.
    pub name: String,
    /// Employer-assigned employee identifier.
    pub id: String,
    /// Department the employee belongs to.
    pub department: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_employee_details() {
        let json = r#"{
            "name": "Jane Doe",
            "id": "EMP-001",
            "department": "Finance"
        }"#;

        let employee: EmployeeDetails = serde_json::from_str(json).unwrap();
        assert_eq!(employee.name, "Jane Doe");
        assert_eq!(employee.id, "EMP-001");
        assert_eq!(employee.department, "Finance");
    }

    #[test]
    fn test_missing_department_is_rejected() {
        let json = r#"{ "name": "Jane Doe", "id": "EMP-001" }"#;
        let result: Result<EmployeeDetails, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}

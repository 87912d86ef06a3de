use shared::models::{Customer, CustomerRole, Employee, EmployeeRole};

pub fn customer(role: CustomerRole) -> Customer {
    Customer {
        id: 1,
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        role,
        approved: role != CustomerRole::Visitor,
        balance: 0.0,
        total_spent: 0.0,
        orders_count: 0,
        warnings: 0,
        complaints_count: 0,
        compliments_count: 0,
        upheld_complaints: 0,
        free_delivery_credits: 0,
        blacklisted: false,
        closure_requested: false,
        vip_since: None,
        created_at: 0,
        updated_at: 0,
    }
}

pub fn employee(role: EmployeeRole, pay: f64) -> Employee {
    Employee {
        id: 1,
        name: "Marco".to_string(),
        role,
        pay,
        demotions: 0,
        bonuses: 0,
        complaints_count: 0,
        compliments_count: 0,
        rating_sum: 0,
        ratings_count: 0,
        warnings: 0,
        is_active: true,
        hired_at: 0,
        updated_at: 0,
    }
}

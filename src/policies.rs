/*
 * Responsibility
 * - どの service として起動するか (SCM_SERVICE)
 * - service ごとの policy 表 (read / write / delete)
 *
 * Notes
 * - policy は role を全部列挙する (継承しない)。ManagerPolicy に Admin/SuperAdmin を
 *   書くのはそのため。ある policy に role を足しても他の policy には波及しない。
 */
use std::fmt;
use std::str::FromStr;

use token_gate::{
    Policy,
    roles::{ADMIN, CUSTOMER, MANAGER, STAFF, SUPER_ADMIN, SUPPLIER},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Admin,
    Customer,
    Inventory,
    Payments,
    Suppliers,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::Admin,
        ServiceKind::Customer,
        ServiceKind::Inventory,
        ServiceKind::Payments,
        ServiceKind::Suppliers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Admin => "admin",
            ServiceKind::Customer => "customer",
            ServiceKind::Inventory => "inventory",
            ServiceKind::Payments => "payments",
            ServiceKind::Suppliers => "suppliers",
        }
    }

    pub fn policies(&self) -> ServicePolicies {
        match self {
            ServiceKind::Admin => ServicePolicies {
                read: admin_policy(),
                write: super_admin_policy(),
                delete: super_admin_policy(),
            },
            ServiceKind::Customer => ServicePolicies {
                read: Policy::new("CustomerPolicy", [ADMIN, SUPER_ADMIN, MANAGER, STAFF, CUSTOMER]),
                write: manager_policy(),
                delete: admin_policy(),
            },
            ServiceKind::Inventory => ServicePolicies {
                read: Policy::new("StaffPolicy", [ADMIN, SUPER_ADMIN, MANAGER, STAFF]),
                write: manager_policy(),
                delete: admin_policy(),
            },
            ServiceKind::Payments => ServicePolicies {
                read: manager_policy(),
                write: manager_policy(),
                delete: admin_policy(),
            },
            ServiceKind::Suppliers => ServicePolicies {
                read: Policy::new("SupplierPolicy", [ADMIN, SUPER_ADMIN, MANAGER, SUPPLIER]),
                write: manager_policy(),
                delete: admin_policy(),
            },
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(ServiceKind::Admin),
            "customer" | "customers" => Ok(ServiceKind::Customer),
            "inventory" => Ok(ServiceKind::Inventory),
            "payments" | "payment" => Ok(ServiceKind::Payments),
            "suppliers" | "supplier" => Ok(ServiceKind::Suppliers),
            _ => Err(()),
        }
    }
}

/// Policies one service applies to its resource routes.
#[derive(Debug, Clone)]
pub struct ServicePolicies {
    pub read: Policy,
    pub write: Policy,
    pub delete: Policy,
}

pub fn super_admin_policy() -> Policy {
    Policy::new("SuperAdminPolicy", [SUPER_ADMIN])
}

pub fn admin_policy() -> Policy {
    Policy::new("AdminPolicy", [ADMIN, SUPER_ADMIN])
}

pub fn manager_policy() -> Policy {
    Policy::new("ManagerPolicy", [ADMIN, SUPER_ADMIN, MANAGER])
}

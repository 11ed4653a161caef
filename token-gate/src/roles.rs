//! Role names shared by every service.
//!
//! Role names are compared case-sensitively against the `role` claim.

pub const SUPER_ADMIN: &str = "SuperAdmin";
pub const ADMIN: &str = "Admin";
pub const MANAGER: &str = "Manager";
pub const STAFF: &str = "Staff";
pub const CUSTOMER: &str = "Customer";
pub const SUPPLIER: &str = "Supplier";

pub const ALL: [&str; 6] = [SUPER_ADMIN, ADMIN, MANAGER, STAFF, CUSTOMER, SUPPLIER];

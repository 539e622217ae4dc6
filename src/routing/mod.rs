//! Role-based route access: the route table and the gate that reads it.

pub mod gate;
pub mod prefix;
pub mod route_table;

pub use gate::{decide, AccessState, GateDecision, GateVerdict, RouteGate};
pub use prefix::{normalize_path, PrefixSet};
pub use route_table::{RoleRoutes, RouteTable, RouteTableError};

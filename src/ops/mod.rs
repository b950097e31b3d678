//! Mock operations tools standing in for real integrations.

pub mod cmdb;
pub mod customers;
pub mod ec2;
pub mod search;

pub use cmdb::{ChangeRecord, CmdbWriter};
pub use customers::{customer_lookup, Customer, Order};
pub use ec2::Instance;
pub use search::SerpApiSearchTool;

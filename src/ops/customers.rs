//! Static customer directory behind the `customer_lookup` tool.

use crate::llm::tools::FunctionTool;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub order_id: &'static str,
    pub product: &'static str,
    pub quantity: u32,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id: u32,
    pub first_name: &'static str,
    pub last_name: &'static str,
    pub age: u8,
    pub zip_code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orders: Option<&'static [Order]>,
}

const CUSTOMERS: &[Customer] = &[
    Customer {
        id: 1,
        first_name: "Ada",
        last_name: "Okafor",
        age: 34,
        zip_code: "98101",
        orders: None,
    },
    Customer {
        id: 2,
        first_name: "Bruno",
        last_name: "Lindqvist",
        age: 51,
        zip_code: "10001",
        orders: Some(&[Order {
            order_id: "ORD-1001",
            product: "Standing desk",
            quantity: 1,
            total: 649.00,
        }]),
    },
    Customer {
        id: 3,
        first_name: "Chiara",
        last_name: "Benedetti",
        age: 27,
        zip_code: "60614",
        orders: None,
    },
    Customer {
        id: 4,
        first_name: "Deepak",
        last_name: "Raman",
        age: 45,
        zip_code: "94103",
        orders: Some(&[
            Order {
                order_id: "ORD-1002",
                product: "Noise-cancelling headphones",
                quantity: 1,
                total: 299.99,
            },
            Order {
                order_id: "ORD-1003",
                product: "USB-C dock",
                quantity: 2,
                total: 259.98,
            },
        ]),
    },
    Customer {
        id: 5,
        first_name: "Elena",
        last_name: "Vasquez",
        age: 62,
        zip_code: "33101",
        orders: None,
    },
    Customer {
        id: 6,
        first_name: "Farah",
        last_name: "Haddad",
        age: 39,
        zip_code: "02139",
        orders: Some(&[Order {
            order_id: "ORD-1004",
            product: "Mechanical keyboard",
            quantity: 1,
            total: 139.50,
        }]),
    },
    Customer {
        id: 7,
        first_name: "Gunnar",
        last_name: "Eriksen",
        age: 29,
        zip_code: "80202",
        orders: None,
    },
    Customer {
        id: 8,
        first_name: "Hana",
        last_name: "Kobayashi",
        age: 41,
        zip_code: "97205",
        orders: Some(&[
            Order {
                order_id: "ORD-1005",
                product: "Espresso machine",
                quantity: 1,
                total: 489.00,
            },
            Order {
                order_id: "ORD-1006",
                product: "Coffee grinder",
                quantity: 1,
                total: 129.00,
            },
        ]),
    },
    Customer {
        id: 9,
        first_name: "Ivan",
        last_name: "Petrov",
        age: 57,
        zip_code: "78701",
        orders: None,
    },
    Customer {
        id: 10,
        first_name: "Julia",
        last_name: "Moreau",
        age: 23,
        zip_code: "30301",
        orders: Some(&[Order {
            order_id: "ORD-1007",
            product: "Trail running shoes",
            quantity: 2,
            total: 279.90,
        }]),
    },
];

pub fn all_customers() -> &'static [Customer] {
    CUSTOMERS
}

/// Find the customer whose id equals `id`
pub fn customer_lookup(id: u32) -> Option<&'static Customer> {
    CUSTOMERS.iter().find(|c| c.id == id)
}

/// Text form used by the tool. Bad input becomes an answer the model can act
/// on instead of an error.
pub fn lookup_text(input: &str) -> String {
    let cleaned = input.trim().trim_matches(|c| c == '"' || c == '\'').trim();

    let id: u32 = match cleaned.parse() {
        Ok(id) => id,
        Err(_) => {
            return format!(
                "'{}' is not a customer id. Pass the numeric id only, for example 8.",
                cleaned
            )
        }
    };

    match customer_lookup(id) {
        Some(customer) => serde_json::to_string(customer)
            .unwrap_or_else(|e| format!("Customer {} could not be rendered: {}", id, e)),
        None => format!("No customer found with id {}", id),
    }
}

pub fn tool() -> FunctionTool {
    FunctionTool::new(
        "customer_lookup",
        "Look up a customer record by numeric customer id. Returns first name, last name, \
         age, zip code and any orders as JSON. Input must be the id only, e.g. 8.",
        |input| Ok(lookup_text(input)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<u32> = all_customers().iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), all_customers().len());
    }

    #[test]
    fn test_lookup_returns_matching_record() {
        let customer = customer_lookup(8).unwrap();
        assert_eq!(customer.id, 8);
        assert_eq!(customer.first_name, "Hana");
        assert_eq!(customer.orders.unwrap().len(), 2);
    }

    #[test]
    fn test_lookup_unknown_id() {
        assert!(customer_lookup(999).is_none());
        assert_eq!(lookup_text("999"), "No customer found with id 999");
    }

    #[test]
    fn test_lookup_text_tolerates_quotes_and_whitespace() {
        let json: serde_json::Value = serde_json::from_str(&lookup_text(" \"8\"\n")).unwrap();
        assert_eq!(json["id"], 8);
        assert_eq!(json["zip_code"], "97205");
        assert_eq!(json["orders"][0]["order_id"], "ORD-1005");
    }

    #[test]
    fn test_lookup_text_omits_missing_orders() {
        let json: serde_json::Value = serde_json::from_str(&lookup_text("1")).unwrap();
        assert!(json.get("orders").is_none());
    }

    #[test]
    fn test_lookup_text_non_numeric() {
        assert!(lookup_text("Hana").contains("is not a customer id"));
    }

    #[test]
    fn test_tool_uses_lookup() {
        let tool = tool();
        assert_eq!(tool.call("4").unwrap(), lookup_text("4"));
    }
}

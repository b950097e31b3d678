//! Fake EC2 fleet for the operations demo.
//!
//! Search, patch and stop answer from a fixed inventory and never change it.

use crate::llm::tools::FunctionTool;

pub const PATCH_BASELINE: &str = "AWS-DefaultPatchBaseline";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instance {
    pub instance_id: &'static str,
    pub name: &'static str,
    pub environment: &'static str,
    pub state: &'static str,
    pub platform: &'static str,
    pub patch_level: &'static str,
}

const INSTANCES: &[Instance] = &[
    Instance {
        instance_id: "i-0a1b2c3d4e5f60718",
        name: "web-frontend-01",
        environment: "production",
        state: "running",
        platform: "Amazon Linux 2023",
        patch_level: "2024-05",
    },
    Instance {
        instance_id: "i-0f3e9a7c21b4d5e60",
        name: "web-frontend-02",
        environment: "production",
        state: "running",
        platform: "Amazon Linux 2023",
        patch_level: "2024-02",
    },
    Instance {
        instance_id: "i-07c6d5e4f3a2b1908",
        name: "billing-db-primary",
        environment: "production",
        state: "running",
        platform: "Windows Server 2022",
        patch_level: "2024-03",
    },
    Instance {
        instance_id: "i-0123456789abcdef0",
        name: "ci-runner-03",
        environment: "staging",
        state: "running",
        platform: "Ubuntu 22.04",
        patch_level: "2023-11",
    },
    Instance {
        instance_id: "i-0deadbeefcafe1234",
        name: "legacy-reporting",
        environment: "development",
        state: "stopped",
        platform: "Windows Server 2016",
        patch_level: "2022-08",
    },
];

pub fn inventory() -> &'static [Instance] {
    INSTANCES
}

fn find_instance(instance_id: &str) -> Option<&'static Instance> {
    let wanted = instance_id.trim().trim_matches(|c| c == '"' || c == '\'');
    INSTANCES.iter().find(|i| i.instance_id.eq_ignore_ascii_case(wanted))
}

fn describe(instance: &Instance) -> String {
    format!(
        "{} ({}) env={} state={} platform={} patch_level={}",
        instance.instance_id,
        instance.name,
        instance.environment,
        instance.state,
        instance.platform,
        instance.patch_level
    )
}

/// Words a model tends to add that name no instance field
const FILLER_TERMS: &[&str] = &["all", "and", "ec2", "instance", "instances"];

/// Instances matching every whitespace-separated term of `query`.
///
/// A term matches when the id, name, environment, state or platform contains
/// it. An empty query lists the whole fleet.
pub fn search_ec2_instances(query: &str) -> String {
    let query = query.trim().trim_matches(|c| c == '"' || c == '\'').to_lowercase();
    let terms: Vec<&str> = query
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty() && !FILLER_TERMS.contains(t))
        .collect();

    let matches: Vec<String> = INSTANCES
        .iter()
        .filter(|i| {
            let fields = [i.instance_id, i.name, i.environment, i.state, i.platform]
                .map(|field| field.to_lowercase());
            terms.iter().all(|term| fields.iter().any(|field| field.contains(term)))
        })
        .map(describe)
        .collect();

    if matches.is_empty() {
        format!("No EC2 instances matched '{}'", query)
    } else {
        matches.join("\n")
    }
}

pub fn patch_ec2_instance(instance_id: &str) -> String {
    match find_instance(instance_id) {
        Some(instance) => format!(
            "Patch run started on {} ({}) using baseline {}. All missing patches installed; reboot completed.",
            instance.instance_id, instance.name, PATCH_BASELINE
        ),
        None => format!("Instance not found: {}", instance_id.trim()),
    }
}

pub fn stop_ec2_instance(instance_id: &str) -> String {
    match find_instance(instance_id) {
        Some(instance) if instance.state == "stopped" => {
            format!("Instance {} ({}) is already stopped", instance.instance_id, instance.name)
        }
        Some(instance) => format!(
            "Instance {} ({}) is stopping. Previous state: {}",
            instance.instance_id, instance.name, instance.state
        ),
        None => format!("Instance not found: {}", instance_id.trim()),
    }
}

/// Search, patch and stop as agent tools
pub fn tools() -> Vec<FunctionTool> {
    vec![
        FunctionTool::new(
            "search_ec2_instances",
            "Search EC2 instances. Input is one or more words, each matched against the \
             instance id, name, environment (production, staging, development), state \
             (running, stopped) or platform; an instance must match every word. Returns one \
             line per instance with its state and patch level. Empty input lists every \
             instance.",
            |input| Ok(search_ec2_instances(input)),
        ),
        FunctionTool::new(
            "patch_ec2_instance",
            "Apply the default patch baseline to one EC2 instance. Input is a single \
             instance id such as i-0a1b2c3d4e5f60718.",
            |input| Ok(patch_ec2_instance(input)),
        ),
        FunctionTool::new(
            "stop_ec2_instance",
            "Stop one running EC2 instance. Input is a single instance id.",
            |input| Ok(stop_ec2_instance(input)),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::tools::LlmTool;

    #[test]
    fn test_instance_ids_are_unique() {
        let mut ids: Vec<_> = inventory().iter().map(|i| i.instance_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), inventory().len());
    }

    #[test]
    fn test_search_by_environment_is_case_insensitive() {
        let result = search_ec2_instances("PRODUCTION");
        assert_eq!(result.lines().count(), 3);
        assert!(result.contains("billing-db-primary"));
    }

    #[test]
    fn test_search_by_platform() {
        let result = search_ec2_instances("windows");
        assert!(result.contains("i-07c6d5e4f3a2b1908"));
        assert!(result.contains("i-0deadbeefcafe1234"));
        assert_eq!(result.lines().count(), 2);
    }

    #[test]
    fn test_search_requires_every_term() {
        let result = search_ec2_instances("production windows");
        assert_eq!(result.lines().count(), 1);
        assert!(result.starts_with("i-07c6d5e4f3a2b1908"));
    }

    #[test]
    fn test_search_matches_state_and_skips_filler_words() {
        let result = search_ec2_instances("running production Windows instances");
        assert_eq!(result.lines().count(), 1);
        assert!(result.contains("billing-db-primary"));

        let stopped = search_ec2_instances("stopped, windows");
        assert_eq!(stopped.lines().count(), 1);
        assert!(stopped.contains("legacy-reporting"));
    }

    #[test]
    fn test_search_combined_terms_no_match() {
        assert_eq!(
            search_ec2_instances("staging windows"),
            "No EC2 instances matched 'staging windows'"
        );
    }

    #[test]
    fn test_empty_search_lists_all() {
        assert_eq!(search_ec2_instances("  ").lines().count(), inventory().len());
    }

    #[test]
    fn test_search_no_match() {
        assert_eq!(search_ec2_instances("mainframe"), "No EC2 instances matched 'mainframe'");
    }

    #[test]
    fn test_patch_known_instance() {
        let result = patch_ec2_instance(" \"i-0f3e9a7c21b4d5e60\" ");
        assert!(result.contains("web-frontend-02"));
        assert!(result.contains(PATCH_BASELINE));
    }

    #[test]
    fn test_patch_unknown_instance() {
        assert_eq!(patch_ec2_instance("i-nope"), "Instance not found: i-nope");
    }

    #[test]
    fn test_stop_running_and_stopped_instances() {
        assert!(stop_ec2_instance("i-0123456789abcdef0").contains("is stopping"));
        assert!(stop_ec2_instance("i-0deadbeefcafe1234").contains("already stopped"));
    }

    #[test]
    fn test_stop_does_not_mutate_inventory() {
        stop_ec2_instance("i-0a1b2c3d4e5f60718");
        assert!(search_ec2_instances("web-frontend-01").contains("state=running"));
    }

    #[test]
    fn test_tools_names() {
        let names: Vec<String> = tools().iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["search_ec2_instances", "patch_ec2_instance", "stop_ec2_instance"]);
    }
}

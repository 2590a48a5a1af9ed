//! 跟踪生命周期演示：new -> dirty -> clean -> dirty
//!
//! ```bash
//! cargo run -p tracking-domain --example tracking_lifecycle
//! ```
use serde::{Deserialize, Serialize};
use tracking_domain::aggregate::AggregateRoot;
use tracking_domain::broken_rules::{BrokenRules, Severity};
use tracking_domain::serializer::AggregateSerializer;
use tracking_domain::tracking::{Props, TrackedValue};
use tracking_macros::aggregate;
use ulid::Ulid;

#[aggregate(id = String)]
#[derive(Clone, Serialize, Deserialize)]
struct Project {
    name: String,
}

impl AggregateRoot for Project {
    const TYPE: &'static str = "project";

    fn tracked_props(&self) -> Props {
        let mut props = Props::new();
        props.insert("name".to_string(), TrackedValue::scalar(self.name.as_str()));
        props
    }

    fn check_rules(&self, notification: &mut BrokenRules) {
        if self.name.trim().is_empty() {
            notification.add("name", "name must not be empty", Severity::Error);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let mut project = Project::create(Ulid::new().to_string());
    println!("created: state={}", project.tracking_state());

    project.name = "World Tour".to_string();
    project.detect_changes();
    project.validate();
    println!("renamed: state={}", project.tracking_state());

    // 仓储持久化完成后
    project.mark_as_clean();
    println!("persisted: state={}", project.tracking_state());

    project.name = "Farewell Tour".to_string();
    project.detect_changes();
    println!("renamed again: state={}", project.tracking_state());

    println!("plain: {}", project.to_plain_object()?);
    println!("full: {}", project.to_full_object()?);
    Ok(())
}

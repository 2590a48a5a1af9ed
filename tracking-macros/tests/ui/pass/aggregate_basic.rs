use serde::{Deserialize, Serialize};
use tracking_domain::aggregate::AggregateRoot;
use tracking_domain::broken_rules::BrokenRules;
use tracking_domain::tracking::{Props, TrackedValue};
use tracking_macros::aggregate;

#[aggregate(id = String)]
#[derive(Clone, Serialize, Deserialize)]
struct Singer {
    name: String,
}

impl AggregateRoot for Singer {
    const TYPE: &'static str = "singer";

    fn tracked_props(&self) -> Props {
        let mut props = Props::new();
        props.insert("name".to_string(), TrackedValue::scalar(self.name.as_str()));
        props
    }

    fn check_rules(&self, _notification: &mut BrokenRules) {}
}

fn main() {
    let mut singer = Singer::create("s-1".to_string());
    assert!(singer.tracking_state().is_new());

    singer.name = "Michael".to_string();
    assert!(singer.detect_changes().is_dirty());

    // 簿记字段不出现在 serde 投影中
    let json = serde_json::to_value(&singer).unwrap();
    assert!(json.get("tracking").is_none());
    assert!(json.get("broken_rules").is_none());
}

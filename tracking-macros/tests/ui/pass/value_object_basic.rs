use tracking_macros::value_object;

#[value_object]
struct SongTitle {
    value: String,
}

#[value_object(debug = false)]
struct PlayCount(u32);

#[value_object]
enum SubscriptionLevel {
    #[default]
    Free,
    Premium,
}

fn main() {
    // Debug 默认开启，应可格式化
    let title = SongTitle {
        value: "Thriller".to_string(),
    };
    let _ = format!("{title:?}");

    // Default/Clone/PartialEq 可用
    let a = SongTitle::default();
    let _b = a.clone();
    let _eq = a == SongTitle::default();

    // debug = false 的只做构造，确保通过
    let _ = PlayCount(1);

    // 枚举派生 Default/Clone/PartialEq/Serialize/Deserialize 等
    let level: SubscriptionLevel = Default::default();
    assert!(level == SubscriptionLevel::Free);
}

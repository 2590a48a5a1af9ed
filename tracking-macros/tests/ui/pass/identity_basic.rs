use tracking_macros::identity;
use uuid::Uuid;

#[identity]
struct SingerId(Uuid);

#[identity]
struct SongId(String);

fn main() {
    let raw = Uuid::new_v4();
    let id = SingerId(raw);

    // Display 委托内部类型
    assert_eq!(id.to_string(), raw.to_string());

    // FromStr 委托解析，标识按值比较
    let parsed: SingerId = raw.to_string().parse().unwrap();
    assert!(parsed == id);

    let song: SongId = "song-1".parse().unwrap();
    assert_eq!(song.to_string(), "song-1");
}

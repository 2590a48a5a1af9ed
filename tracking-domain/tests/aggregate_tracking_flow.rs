use anyhow::Result as AnyResult;
use tracking_domain::aggregate::AggregateRoot;
use tracking_domain::broken_rules::{BrokenRules, Severity};
use tracking_domain::entity::Entity;
use tracking_domain::equality::{AggregateEquality, EqualityComponent, structural_equals};
use tracking_domain::error::{DomainError, DomainResult};
use tracking_domain::serializer::AggregateSerializer;
use tracking_domain::tracking::{Props, TrackedValue};
use tracking_domain::value_object::ValueObject;
use tracking_macros::{aggregate, value_object};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

#[value_object]
struct FullName {
    first: String,
    last: String,
}

impl FullName {
    fn new(first: &str, last: &str) -> DomainResult<Self> {
        if first.trim().is_empty() {
            return Err(DomainError::InvalidArgument {
                reason: "first name must not be empty".into(),
            });
        }
        Ok(Self {
            first: first.to_string(),
            last: last.to_string(),
        })
    }
}

impl ValueObject for FullName {
    fn equality_components(&self) -> Vec<EqualityComponent> {
        vec![self.first.clone().into(), self.last.clone().into()]
    }
}

#[value_object]
struct Money {
    amount: i64,
    currency: String,
}

impl Money {
    fn new(amount: i64, currency: &str) -> DomainResult<Self> {
        if currency.trim().is_empty() {
            return Err(DomainError::InvalidArgument {
                reason: "currency must not be empty".into(),
            });
        }
        Ok(Self {
            amount,
            currency: currency.to_string(),
        })
    }
}

impl ValueObject for Money {
    fn equality_components(&self) -> Vec<EqualityComponent> {
        vec![self.amount.into(), self.currency.clone().into()]
    }

    fn check_rules(&self, notification: &mut BrokenRules) {
        if self.amount < 0 {
            notification.add("amount", "amount must not be negative", Severity::Error);
        }
    }
}

#[aggregate(id = String)]
#[derive(Clone, Serialize, Deserialize)]
struct Song {
    title: String,
}

impl Song {
    fn compose(title: &str) -> Self {
        let mut song = <Song as Entity>::new(Ulid::new().to_string());
        song.title = title.to_string();
        song.detect_changes();
        song.validate();
        song
    }
}

impl AggregateRoot for Song {
    const TYPE: &'static str = "song";

    fn tracked_props(&self) -> Props {
        let mut props = Props::new();
        props.insert("title".to_string(), TrackedValue::scalar(self.title.as_str()));
        props
    }

    fn check_rules(&self, notification: &mut BrokenRules) {
        if self.title.trim().is_empty() {
            notification.add("title", "title must not be empty", Severity::Error);
        }
    }
}

#[aggregate(id = String)]
#[derive(Clone, Serialize, Deserialize)]
struct Singer {
    full_name: FullName,
    concert_fee: Money,
    songs: Vec<Song>,
}

impl Singer {
    fn register(full_name: FullName, concert_fee: Money) -> Self {
        let mut singer = <Singer as Entity>::new(Ulid::new().to_string());
        singer.full_name = full_name;
        singer.concert_fee = concert_fee;
        singer.detect_changes();
        singer.validate();
        singer
    }

    fn rename(&mut self, full_name: FullName) {
        self.full_name = full_name;
        self.detect_changes();
    }

    fn change_fee(&mut self, concert_fee: Money) {
        self.concert_fee = concert_fee;
        self.detect_changes();
    }

    fn add_song(&mut self, song: Song) {
        self.songs.push(song);
        self.detect_changes();
    }

    // 从聚合自身的操作中删除子实体：子实体标记 deleted，父聚合变 dirty
    fn drop_song(&mut self, song_id: &str) {
        if let Some(song) = self.songs.iter_mut().find(|song| song.id() == song_id) {
            song.mark_as_deleted();
        }
        self.detect_changes();
    }

    // 由自身操作结束生命周期
    fn retire(&mut self) {
        self.mark_as_self_deleted();
    }
}

impl AggregateRoot for Singer {
    const TYPE: &'static str = "singer";

    fn tracked_props(&self) -> Props {
        let mut props = Props::new();
        props.insert(
            "full_name".to_string(),
            TrackedValue::value_object(&self.full_name),
        );
        props.insert(
            "concert_fee".to_string(),
            TrackedValue::value_object(&self.concert_fee),
        );
        props.insert(
            "songs".to_string(),
            TrackedValue::sequence(self.songs.iter().map(AggregateRoot::as_child)),
        );
        props
    }

    fn check_rules(&self, notification: &mut BrokenRules) {
        self.concert_fee.check_rules(notification);
        if self.songs.len() > 100 {
            notification.add("songs", "catalog is unusually large", Severity::Warning);
        }
    }
}

fn usd(amount: i64) -> Money {
    Money::new(amount, "USD").unwrap()
}

#[test]
fn fresh_aggregate_is_new() -> AnyResult<()> {
    let singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(100));
    let state = singer.tracking_state();
    assert!(state.is_new());
    assert!(!state.is_dirty());
    assert!(!state.is_deleted());
    assert!(!state.is_self_deleted());
    assert!(singer.is_valid());
    Ok(())
}

#[test]
fn mutation_flow_new_dirty_clean_dirty() -> AnyResult<()> {
    let mut singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(100));

    // 变更嵌套值对象 -> dirty（不再是 new）
    singer.rename(FullName::new("Mick", "Jagger")?);
    assert!(singer.tracking_state().is_dirty());
    assert!(!singer.tracking_state().is_new());

    // 持久化 -> clean
    singer.mark_as_clean();
    assert!(singer.tracking_state().is_clean());

    // 再次变更 -> dirty（而非 new）
    singer.change_fee(usd(250));
    assert!(singer.tracking_state().is_dirty());
    assert!(!singer.tracking_state().is_new());
    Ok(())
}

#[test]
fn deleted_child_dirties_parent() -> AnyResult<()> {
    let mut singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(100));
    let song = Song::compose("Thriller");
    let song_id = song.id().clone();
    singer.add_song(song);
    singer.mark_as_clean();

    singer.drop_song(&song_id);
    assert!(singer.tracking_state().is_dirty());
    assert!(!singer.tracking_state().is_deleted());
    assert!(singer.songs[0].tracking_state().is_deleted());
    Ok(())
}

#[test]
fn self_deletion_vs_cascaded_deletion() -> AnyResult<()> {
    let mut singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(100));
    singer.retire();
    assert!(singer.tracking_state().is_self_deleted());
    assert!(!singer.tracking_state().is_deleted());

    // 外层级联删除走 deleted
    let mut song = Song::compose("Bad");
    song.mark_as_deleted();
    assert!(song.tracking_state().is_deleted());
    Ok(())
}

#[test]
fn validation_is_repeatable_and_fixable() -> AnyResult<()> {
    let mut singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(-10));
    assert!(!singer.is_valid());

    // 无中间状态变化时两次 validate 按值相等
    let first = singer.validate().to_vec();
    let second = singer.validate().to_vec();
    assert_eq!(first, second);
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].property(), "amount");

    // 修复违规属性后结果为空
    singer.change_fee(usd(100));
    assert!(singer.validate().is_empty());
    assert!(singer.is_valid());
    Ok(())
}

#[test]
fn aggregate_equality_is_identity_based() -> AnyResult<()> {
    let singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(100));

    // 相同标识、不同属性：相等
    let mut same_id = singer.clone();
    same_id.full_name = FullName::new("Mick", "Jagger")?;
    assert!(singer.equals(&same_id));
    assert!(AggregateEquality::are_equal(Some(&singer), Some(&same_id)));
    assert!(AggregateEquality::are_equal(Some(&singer), Some(&singer)));

    // 不同标识：不等；单侧缺失：不等
    let other = Singer::register(FullName::new("Freddie", "Mercury")?, usd(100));
    assert!(!singer.equals(&other));
    assert!(!AggregateEquality::are_equal(Some(&singer), None));
    assert!(AggregateEquality::are_equal::<Singer>(None, None));
    Ok(())
}

#[test]
fn value_objects_compare_structurally() -> AnyResult<()> {
    assert!(structural_equals(&usd(10), &usd(10)));
    assert!(!structural_equals(&usd(10), &Money::new(10, "EUR")?));
    assert!(!structural_equals(&usd(10), &usd(11)));

    // 构造入参的结构性错误快速失败
    assert!(matches!(
        Money::new(10, " "),
        Err(DomainError::InvalidArgument { .. })
    ));
    Ok(())
}

#[test]
fn serializer_projections() -> AnyResult<()> {
    let mut singer = Singer::register(FullName::new("Michael", "Jackson")?, usd(100));
    singer.add_song(Song::compose("Thriller"));

    let plain = singer.to_plain_object()?;
    assert_eq!(plain["version"], 0);
    assert_eq!(plain["full_name"]["first"], "Michael");
    assert_eq!(plain["is_valid"], true);
    assert!(plain.get("tracking_state").is_none());
    assert!(plain.get("broken_rules").is_none());

    let full = singer.to_full_object()?;
    assert!(full.get("tracking_state").is_some());
    assert!(full.get("broken_rules").is_some());
    assert_eq!(full["tracking_state"]["is_dirty"], true);

    let frozen = singer.frozen_copy()?;
    assert_eq!(frozen.id(), singer.id());
    assert!(frozen.tracking_state().is_dirty());
    assert_eq!(frozen.props()["songs"][0]["title"], "Thriller");
    assert!(frozen.props().get("id").is_none());

    // 纯投影：源聚合状态不受影响
    assert!(singer.tracking_state().is_dirty());
    Ok(())
}

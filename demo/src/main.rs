use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracking_domain::aggregate::AggregateRoot;
use tracking_domain::broken_rules::{BrokenRules, Severity};
use tracking_domain::command::Command;
use tracking_domain::domain_event::DomainEvent;
use tracking_domain::entity::Entity;
use tracking_domain::equality::EqualityComponent;
use tracking_domain::error::{DomainError, DomainResult};
use tracking_domain::registry::TypeRegistry;
use tracking_domain::serializer::AggregateSerializer;
use tracking_domain::tracking::{Props, TrackedValue};
use tracking_domain::value_object::ValueObject;
use tracking_macros::{aggregate, value_object};
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
    registered_at: Option<DateTime<Utc>>,
    songs: Vec<Song>,
}

impl Singer {
    fn register(full_name: FullName) -> Self {
        let mut singer = <Singer as Entity>::new(Ulid::new().to_string());
        singer.full_name = full_name;
        singer.registered_at = Some(Utc::now());
        singer.detect_changes();
        singer.validate();
        singer
    }

    fn rename(&mut self, full_name: FullName) {
        self.full_name = full_name;
        self.detect_changes();
    }

    fn add_song(&mut self, song: Song) {
        self.songs.push(song);
        self.detect_changes();
    }

    fn drop_song(&mut self, song_id: &str) {
        if let Some(song) = self.songs.iter_mut().find(|song| song.id() == song_id) {
            song.mark_as_deleted();
        }
        self.detect_changes();
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
            "registered_at".to_string(),
            TrackedValue::scalar(self.registered_at),
        );
        props.insert(
            "songs".to_string(),
            TrackedValue::sequence(self.songs.iter().map(AggregateRoot::as_child)),
        );
        props
    }

    fn check_rules(&self, notification: &mut BrokenRules) {
        if self.registered_at.is_none() {
            notification.add("registered_at", "registration date is missing", Severity::Warning);
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SingerRegistered {
    singer_id: String,
}

impl DomainEvent for SingerRegistered {
    const TYPE: &'static str = "singer.registered";
}

#[derive(Debug)]
struct RegisterSinger {
    first: String,
}

impl Command for RegisterSinger {
    const TYPE: &'static str = "singer.register";

    fn check_rules(&self, notification: &mut BrokenRules) {
        if self.first.trim().is_empty() {
            notification.add("first", "first name must not be empty", Severity::Error);
        }
    }
}

fn main() -> DomainResult<()> {
    // 进程启动时一次性填充类型注册表
    let mut registry = TypeRegistry::new();
    let event_id = registry.register_event::<SingerRegistered>()?;
    let command_id = registry.register_command::<RegisterSinger>()?;
    println!("registered types: event={event_id}, command={command_id}");

    // 注册歌手 -> new
    let mut singer = Singer::register(FullName::new("Michael", "Jackson")?);
    println!("registered: state={}", singer.tracking_state());

    // 改名 -> dirty
    singer.rename(FullName::new("Mick", "Jagger")?);
    println!("renamed: state={}", singer.tracking_state());

    // 仓储持久化后 -> clean
    singer.mark_as_clean();
    println!("persisted: state={}", singer.tracking_state());

    // 添加歌曲 -> dirty；子实体自身为 new
    let song = Song::compose("Thriller");
    let song_id = song.id().clone();
    singer.add_song(song);
    println!(
        "song added: state={}, song state={}",
        singer.tracking_state(),
        singer.songs[0].tracking_state()
    );

    // 删除歌曲：子实体 deleted，父聚合 dirty
    singer.mark_as_clean();
    singer.drop_song(&song_id);
    println!(
        "song dropped: state={}, song state={}",
        singer.tracking_state(),
        singer.songs[0].tracking_state()
    );

    // 三种投影
    println!("plain: {}", singer.to_plain_object()?);
    println!("full: {}", singer.to_full_object()?);
    let frozen = singer.frozen_copy()?;
    println!("frozen: id={}, state={}", frozen.id(), frozen.tracking_state());

    Ok(())
}

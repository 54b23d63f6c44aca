//! Serializes the shadow model to the fixed JSON schema and publishes it
//! only when it changes (§4.6). Publication itself is off the tracer
//! thread: the Reporter just hands a finished string to a background
//! worker over a single-producer/single-consumer channel (§5).

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::level::Level;
use crate::log::LogLevel::LogInfo;

#[derive(Serialize)]
struct PlayerReport {
    account: String,
    name: String,
    armor: u32,
    health: u32,
    sort: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    world: &'static str,
    x: i32,
    y: i32,
    z: i32,
}

/// Everything except `timestamp` — this is the part diffed between
/// emissions (§4.6: "excluding timestamp").
#[derive(Serialize)]
struct ReportBody {
    currentcount: usize,
    players: Vec<PlayerReport>,
    #[serde(rename = "hasStorm")]
    has_storm: bool,
    #[serde(rename = "isThundering")]
    is_thundering: bool,
    confighash: u32,
    servertime: i64,
    updates: [(); 0],
}

#[derive(Serialize)]
struct Report {
    #[serde(flatten)]
    body: ReportBody,
    timestamp: u128,
}

fn build_body(level: &Level) -> ReportBody {
    let mut players = Vec::new();
    level.players.for_each_reportable(|player, sort| {
        let pos = player.pos().expect("reportable player always has a pos");
        let dimension = player
            .dimension()
            .expect("reportable player always has a dimension");
        players.push(PlayerReport {
            account: player.name().to_string(),
            name: player.name().to_string(),
            armor: 0,
            health: 20,
            sort,
            kind: "player",
            world: dimension.report_name(),
            x: pos.x as i32,
            y: pos.y as i32,
            z: pos.z as i32,
        });
    });

    ReportBody {
        currentcount: level.players.len(),
        players,
        has_storm: level.weather.rain,
        is_thundering: level.weather.thunder,
        confighash: 0,
        servertime: level.server_time(),
        updates: [],
    }
}

fn unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Something that can take a finished JSON line and ship it somewhere.
/// Stdout is the reference transport; HTTP/WebSocket publication plugs in
/// here without the tracer or Reporter changing (§1, §6).
pub trait Transport: Send {
    fn publish(&mut self, payload: &str);
}

pub struct StdoutTransport;

impl Transport for StdoutTransport {
    fn publish(&mut self, payload: &str) {
        println!("{}", payload);
    }
}

pub struct Reporter {
    sender: crossbeam_channel::Sender<String>,
    last_body: Option<String>,
}

impl Reporter {
    pub fn new(sender: crossbeam_channel::Sender<String>) -> Reporter {
        Reporter {
            sender,
            last_body: None,
        }
    }

    /// Serializes `level`, compares against the last emitted body, and
    /// enqueues a full report (with a fresh timestamp) only if it changed.
    /// Called once unconditionally at startup by `emit_initial`, and after
    /// every breakpoint hit from the tracer loop.
    pub fn maybe_emit(&mut self, level: &Level) {
        let body = build_body(level);
        let body_json = serde_json::to_string(&body).expect("ReportBody is always serializable");

        if self.last_body.as_deref() == Some(body_json.as_str()) {
            return;
        }

        let report = Report {
            body,
            timestamp: unix_timestamp_millis(),
        };
        let full_json =
            serde_json::to_string(&report).expect("Report is always serializable");

        log!(LogInfo, "publishing updated snapshot ({} players)", level.players.len());
        let _ = self.sender.send(full_json);
        self.last_body = Some(body_json);
    }

    /// Publishes the empty startup snapshot unconditionally, so a consumer
    /// always has a baseline frame (§4.6).
    pub fn emit_initial(&mut self, level: &Level) {
        self.last_body = None;
        self.maybe_emit(level);
    }
}

/// Spawns the background thread that owns `transport` and drains `receiver`
/// until the tracer drops its sender (on target exit, §5).
pub fn spawn_worker(
    receiver: crossbeam_channel::Receiver<String>,
    mut transport: Box<dyn Transport>,
) -> std::thread::JoinHandle<()> {
    std::thread::spawn(move || {
        for payload in receiver {
            transport.publish(&payload);
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn does_not_re_emit_when_the_body_is_unchanged() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut reporter = Reporter::new(tx);
        let level = Level::new();

        reporter.emit_initial(&level);
        reporter.maybe_emit(&level);
        reporter.maybe_emit(&level);

        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn emits_again_once_the_body_changes() {
        let (tx, rx) = crossbeam_channel::unbounded();
        let mut reporter = Reporter::new(tx);
        let mut level = Level::new();

        reporter.emit_initial(&level);
        level.time = 100;
        reporter.maybe_emit(&level);

        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn schema_matches_spec_field_names() {
        let (tx, _rx) = crossbeam_channel::unbounded();
        let mut reporter = Reporter::new(tx);
        let mut level = Level::new();
        {
            let p = level.players.get_by_name("alice", 0x1000);
            p.set_pos(crate::vec3::Vec3::new(1.0, 64.0, 2.0));
            p.set_dimension(0);
        }
        reporter.emit_initial(&level);

        let body = build_body(&level);
        let value: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&body).unwrap()).unwrap();
        assert_eq!(value["currentcount"], 1);
        assert_eq!(value["players"][0]["account"], "alice");
        assert_eq!(value["players"][0]["world"], "world");
        assert_eq!(value["players"][0]["x"], 1);
        assert_eq!(value["players"][0]["y"], 64);
        assert_eq!(value["players"][0]["z"], 2);
    }
}

//! End-to-end scenarios S1-S6, driven directly against the shadow model
//! (`Level`/`PlayerRegistry`) and the `Reporter`, without any real `ptrace`
//! — exactly the "mock Target and in-process PlayerRegistry" framing the
//! testable properties call for.

use shadow_tracer::level::Level;
use shadow_tracer::reporter::Reporter;
use shadow_tracer::vec3::Vec3;

fn set_pos(level: &mut Level, addr: u64, pos: Vec3) {
    if let Some(player) = level.players.get_by_address(addr) {
        player.set_pos(pos);
    }
}

fn move_by(level: &mut Level, addr: u64, delta: Vec3) {
    if let Some(player) = level.players.get_by_address(addr) {
        player.apply_move(delta);
    }
}

fn change_dimension(level: &mut Level, addr: u64, dimension: i32) {
    if let Some(player) = level.players.get_by_address(addr) {
        player.set_dimension(dimension);
    }
}

fn set_name(level: &mut Level, name: &str, addr: u64) {
    level.players.get_by_name(name, addr);
}

fn destruct(level: &mut Level, addr: u64) {
    level.players.forget(addr);
}

fn weather_changed(level: &mut Level, dimension: &str, rain: bool, thunder: bool) {
    if dimension == "Overworld" || dimension == "overworld" {
        level.weather.rain = rain;
        level.weather.thunder = thunder;
    }
}

fn body_value(level: &Level) -> serde_json::Value {
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut reporter = Reporter::new(tx);
    reporter.emit_initial(level);
    let payload = rx.try_recv().expect("a snapshot was published");
    serde_json::from_str(&payload).unwrap()
}

#[test]
fn s1_single_named_positioned_player_is_reportable() {
    let mut level = Level::new();
    set_name(&mut level, "alice", 0x1000);
    set_pos(&mut level, 0x1000, Vec3::new(1.0, 64.0, 2.0));
    change_dimension(&mut level, 0x1000, 0);

    let v = body_value(&level);
    assert_eq!(v["currentcount"], 1);
    assert_eq!(v["players"].as_array().unwrap().len(), 1);
    let p = &v["players"][0];
    assert_eq!(p["name"], "alice");
    assert_eq!(p["account"], "alice");
    assert_eq!(p["world"], "world");
    assert_eq!(p["x"], 1);
    assert_eq!(p["y"], 64);
    assert_eq!(p["z"], 2);
}

#[test]
fn s2_move_shifts_x_and_z_leaves_y_untouched() {
    let mut level = Level::new();
    set_name(&mut level, "alice", 0x1000);
    set_pos(&mut level, 0x1000, Vec3::new(1.0, 64.0, 2.0));
    change_dimension(&mut level, 0x1000, 0);

    move_by(&mut level, 0x1000, Vec3::new(3.0, 9.0, 4.0));

    let v = body_value(&level);
    let p = &v["players"][0];
    assert_eq!(p["x"], 4);
    assert_eq!(p["y"], 64);
    assert_eq!(p["z"], 6);
}

#[test]
fn s3_rekey_moves_identity_to_the_new_address() {
    let mut level = Level::new();
    set_name(&mut level, "alice", 0x1000);
    set_pos(&mut level, 0x1000, Vec3::new(1.0, 64.0, 2.0));
    change_dimension(&mut level, 0x1000, 0);
    move_by(&mut level, 0x1000, Vec3::new(3.0, 9.0, 4.0));

    set_name(&mut level, "alice", 0x2000);

    assert_eq!(level.players.len(), 1);

    // The old address is now a no-op...
    set_pos(&mut level, 0x1000, Vec3::new(999.0, 999.0, 999.0));
    // ...while the new one still updates the same player.
    set_pos(&mut level, 0x2000, Vec3::new(4.0, 64.0, 6.0));

    let v = body_value(&level);
    assert_eq!(v["players"].as_array().unwrap().len(), 1);
    let p = &v["players"][0];
    assert_eq!(p["name"], "alice");
    assert_eq!(p["x"], 4);
    assert_eq!(p["y"], 64);
    assert_eq!(p["z"], 6);
}

#[test]
fn s4_destructor_empties_the_registry() {
    let mut level = Level::new();
    set_name(&mut level, "alice", 0x1000);
    set_pos(&mut level, 0x1000, Vec3::new(1.0, 64.0, 2.0));
    change_dimension(&mut level, 0x1000, 0);
    set_name(&mut level, "alice", 0x2000);

    destruct(&mut level, 0x2000);

    let v = body_value(&level);
    assert_eq!(v["currentcount"], 0);
    assert_eq!(v["players"].as_array().unwrap().len(), 0);
}

#[test]
fn s5_weather_only_applies_to_the_overworld() {
    let mut level = Level::new();
    weather_changed(&mut level, "Overworld", true, false);

    let v = body_value(&level);
    assert_eq!(v["hasStorm"], true);
    assert_eq!(v["isThundering"], false);

    weather_changed(&mut level, "Nether", false, true);
    let v = body_value(&level);
    assert_eq!(v["hasStorm"], true);
    assert_eq!(v["isThundering"], false);
}

#[test]
fn s6_time_packet_sets_servertime_modulo_24000() {
    let mut level = Level::new();
    level.time = 25001;

    let v = body_value(&level);
    assert_eq!(v["servertime"], 1001);
}

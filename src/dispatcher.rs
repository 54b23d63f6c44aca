//! Maps a breakpoint hit to the handler that reads its arguments and
//! mutates the shadow model (§4.5). Hooks are identified by the tagged
//! `HookId` enum and dispatched through a single `match`, rather than
//! boxed closures (§9 Design Notes) — the `Level` is threaded through by
//! exclusive reference instead of being captured.

use libc::user_regs_struct;
use nix::unistd::Pid;

use crate::hooks::HookId;
use crate::level::Level;
use crate::memory::TargetMemory;

pub struct Dispatcher;

impl Dispatcher {
    pub fn dispatch(hook: HookId, pid: Pid, regs: &user_regs_struct, level: &mut Level) {
        match hook {
            HookId::ActorSetPos => Self::actor_set_pos(pid, regs, level),
            HookId::PlayerMove => Self::player_move(pid, regs, level),
            HookId::PlayerSetName => Self::player_set_name(pid, regs, level),
            HookId::ServerPlayerChangeDimension => {
                Self::server_player_change_dimension(regs, level)
            }
            HookId::ServerPlayerDestruct => Self::server_player_destruct(regs, level),
            HookId::LevelWeatherChanged => Self::level_weather_changed(pid, regs, level),
            HookId::SetTimePacketCtor => Self::set_time_packet_ctor(regs, level),
        }
    }

    /// `Actor::setPos(Vec3 const&)` — `rdi` is the player address, `rsi` a
    /// pointer to the new position. Non-creating: an unknown address is a
    /// no-op.
    fn actor_set_pos(pid: Pid, regs: &user_regs_struct, level: &mut Level) {
        let address = regs.rdi;
        let pos = match TargetMemory::read_vec3(pid, regs.rsi) {
            Ok(pos) => pos,
            Err(_) => return,
        };
        if let Some(player) = level.players.get_by_address(address) {
            player.set_pos(pos);
        }
    }

    /// `Player::move(Vec3 const&)` — `rsi` is a position *delta*.
    /// Non-creating.
    fn player_move(pid: Pid, regs: &user_regs_struct, level: &mut Level) {
        let address = regs.rdi;
        let delta = match TargetMemory::read_vec3(pid, regs.rsi) {
            Ok(delta) => delta,
            Err(_) => return,
        };
        if let Some(player) = level.players.get_by_address(address) {
            player.apply_move(delta);
        }
    }

    /// `Player::setName(std::string const&)` — the only hook allowed to
    /// create a Player purely from an address never seen before, via
    /// `get_by_name`'s rekey-or-create semantics.
    fn player_set_name(pid: Pid, regs: &user_regs_struct, level: &mut Level) {
        let address = regs.rdi;
        let name = match TargetMemory::read_string(pid, regs.rsi) {
            Ok(name) => name,
            Err(_) => return,
        };
        level.players.get_by_name(&name, address);
    }

    /// `ServerPlayer::changeDimension`/`changeDimensionWithCredits`/
    /// `is2DPositionRelevant` — all three have the same effect on the
    /// shadow model. `rsi` is the raw dimension code. Non-creating.
    fn server_player_change_dimension(regs: &user_regs_struct, level: &mut Level) {
        let address = regs.rdi;
        let dimension = regs.rsi as i32;
        if let Some(player) = level.players.get_by_address(address) {
            player.set_dimension(dimension);
        }
    }

    /// `ServerPlayer::~ServerPlayer()` (either destructor entry point).
    fn server_player_destruct(regs: &user_regs_struct, level: &mut Level) {
        level.players.forget(regs.rdi);
    }

    /// `LevelEventCoordinator::sendLevelWeatherChanged(std::string const&,
    /// bool, bool)` — `rsi` a pointer to the dimension name, `rdx` rain,
    /// `rcx` thunder. Only applied when the dimension is the overworld.
    fn level_weather_changed(pid: Pid, regs: &user_regs_struct, level: &mut Level) {
        let dimension = match TargetMemory::read_string(pid, regs.rsi) {
            Ok(dimension) => dimension,
            Err(_) => return,
        };
        if dimension == "Overworld" || dimension == "overworld" {
            level.weather.rain = regs.rdx != 0;
            level.weather.thunder = regs.rcx != 0;
        }
    }

    /// `SetTimePacket::SetTimePacket(int)` — `rsi` the raw time value.
    fn set_time_packet_ctor(regs: &user_regs_struct, level: &mut Level) {
        level.time = regs.rsi as i32 as i64;
    }
}

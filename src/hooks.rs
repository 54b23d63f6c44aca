//! The compiled-in hook table (§6). Each address is a virtual address in
//! the target's loaded executable for the specific build this reference
//! table targets: game server build "1.16.220.02". A mismatched build
//! silently yields no hits — there is no symbol resolution here, on
//! purpose (§1 Non-goals).
//!
//! Ten addresses map to six distinct handlers: `ChangeDimension` covers
//! both `changeDimension`/`changeDimensionWithCredits` and
//! `is2DPositionRelevant` (they have the same effect on the shadow model),
//! and `Destruct` covers both destructor entry points the target exposes.

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum HookId {
    ActorSetPos,
    PlayerMove,
    PlayerSetName,
    ServerPlayerChangeDimension,
    ServerPlayerDestruct,
    LevelWeatherChanged,
    SetTimePacketCtor,
}

pub const HOOK_TABLE: &[(u64, HookId)] = &[
    (0x0000_0000_01f9_fbd0, HookId::ActorSetPos),
    (0x0000_0000_01b1_72b0, HookId::PlayerMove),
    (0x0000_0000_01b1_4270, HookId::PlayerSetName),
    (0x0000_0000_016a_c180, HookId::ServerPlayerChangeDimension),
    (0x0000_0000_016a_c290, HookId::ServerPlayerChangeDimension),
    (0x0000_0000_016a_c970, HookId::ServerPlayerChangeDimension),
    (0x0000_0000_016a_46c0, HookId::ServerPlayerDestruct),
    (0x0000_0000_016a_4530, HookId::ServerPlayerDestruct),
    (0x0000_0000_022c_b030, HookId::LevelWeatherChanged),
    (0x0000_0000_011e_0b00, HookId::SetTimePacketCtor),
];

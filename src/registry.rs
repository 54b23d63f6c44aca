use crate::log::LogLevel::LogWarn;
use crate::player::Player;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// Address → Player, with the rekey-by-name invariant from §3/§4.5.
///
/// Name lookup is a linear scan over the map's values (§9 Design Notes):
/// acceptable given the small player counts an observer like this sees. A
/// secondary name→address index is the natural next step if that ever
/// stops being true.
#[derive(Default)]
pub struct PlayerRegistry {
    players: HashMap<u64, Player>,
}

impl PlayerRegistry {
    pub fn new() -> PlayerRegistry {
        PlayerRegistry::default()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Returns the existing Player, or nothing. Never creates.
    pub fn get_by_address(&mut self, address: u64) -> Option<&mut Player> {
        self.players.get_mut(&address)
    }

    /// Returns the existing Player at `address`, creating an unnamed one if
    /// there isn't one yet.
    pub fn get_or_create_by_address(&mut self, address: u64) -> &mut Player {
        self.players
            .entry(address)
            .or_insert_with(|| Player::new(address))
    }

    /// `Player.setName`: rekeys an existing Player with this name to
    /// `new_address` if its address differs, otherwise creates a fresh one
    /// at `new_address` with `name` set.
    ///
    /// Matches `std::map::insert`'s occupied-key semantics (§8.1 of
    /// `original_source/src/tracer/main.cpp`): if `new_address` is already
    /// home to a *different* Player, the insert is a no-op rather than
    /// overwriting it — a missed dtor elsewhere must not silently erase
    /// that other Player's shadow state.
    pub fn get_by_name(&mut self, name: &str, new_address: u64) -> &mut Player {
        let existing_address = self
            .players
            .values()
            .find(|p| p.name() == name)
            .map(Player::address);

        match existing_address {
            Some(old_address) if old_address != new_address => {
                let mut player = self.players.remove(&old_address).unwrap();
                player.set_address(new_address);
                match self.players.entry(new_address) {
                    Entry::Occupied(_) => log!(
                        LogWarn,
                        "address {:#x} already occupied while rekeying {:?} from {:#x}; dropping rekeyed player instead of overwriting",
                        new_address,
                        name,
                        old_address
                    ),
                    Entry::Vacant(slot) => {
                        slot.insert(player);
                    }
                }
            }
            Some(_) => {}
            None => {
                let mut player = Player::new(new_address);
                player.set_name(name.to_string());
                match self.players.entry(new_address) {
                    Entry::Occupied(_) => log!(
                        LogWarn,
                        "address {:#x} already occupied while naming {:?}; dropping new player instead of overwriting",
                        new_address,
                        name
                    ),
                    Entry::Vacant(slot) => {
                        slot.insert(player);
                    }
                }
            }
        }

        self.players.get_mut(&new_address).unwrap()
    }

    pub fn forget(&mut self, address: u64) {
        self.players.remove(&address);
    }

    pub fn for_each_reportable<F: FnMut(&Player, usize)>(&self, mut callback: F) {
        let mut sort = 0usize;
        for player in self.players.values() {
            if player.is_reportable() {
                callback(player, sort);
                sort += 1;
            }
        }
    }
}

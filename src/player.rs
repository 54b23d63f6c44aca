use crate::dimension::Dimension;
use crate::vec3::Vec3;
use std::convert::TryFrom;

/// The observer's shadow of one game entity (§3).
#[derive(Clone, Debug)]
pub struct Player {
    address: u64,
    name: String,
    pos: Option<Vec3>,
    dimension: Option<Dimension>,
}

impl Player {
    pub fn new(address: u64) -> Player {
        Player {
            address,
            name: String::new(),
            pos: None,
            dimension: None,
        }
    }

    pub fn address(&self) -> u64 {
        self.address
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pos(&self) -> Option<Vec3> {
        self.pos
    }

    pub fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    /// A Player is reportable once it has a non-empty name, a position and
    /// a dimension (§3).
    pub fn is_reportable(&self) -> bool {
        !self.name.is_empty() && self.pos.is_some() && self.dimension.is_some()
    }

    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub fn set_address(&mut self, address: u64) {
        self.address = address;
    }

    pub fn set_pos(&mut self, pos: Vec3) {
        self.pos = Some(pos);
    }

    /// `Player.move`: `x`/`z` shift by the delta, `y` is left untouched
    /// (§4.5). A no-op if the position isn't known yet.
    pub fn apply_move(&mut self, delta: Vec3) {
        if let Some(pos) = self.pos.as_mut() {
            pos.x += delta.x;
            pos.z += delta.z;
        }
    }

    /// Values outside `{0,1,2}` are silently ignored (§3, §4.5).
    pub fn set_dimension(&mut self, raw: i32) {
        if let Ok(dimension) = Dimension::try_from(raw) {
            self.dimension = Some(dimension);
        }
    }
}

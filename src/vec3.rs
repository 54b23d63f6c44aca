/// Three little-endian IEEE-754 floats, laid out the way the target stores
/// them: 12 bytes, no padding.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const SIZE: usize = 12;

    pub fn new(x: f32, y: f32, z: f32) -> Vec3 {
        Vec3 { x, y, z }
    }

    /// Reinterprets a 12-byte little-endian buffer as a `Vec3`.
    pub fn from_le_bytes(bytes: &[u8]) -> Vec3 {
        debug_assert_eq!(bytes.len(), Vec3::SIZE);
        let x = f32::from_le_bytes(bytes[0..4].try_into().unwrap());
        let y = f32::from_le_bytes(bytes[4..8].try_into().unwrap());
        let z = f32::from_le_bytes(bytes[8..12].try_into().unwrap());
        Vec3::new(x, y, z)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn round_trips_through_le_bytes() {
        let v = Vec3::new(1.0, 64.0, 2.0);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&v.x.to_le_bytes());
        bytes.extend_from_slice(&v.y.to_le_bytes());
        bytes.extend_from_slice(&v.z.to_le_bytes());
        assert_eq!(Vec3::from_le_bytes(&bytes), v);
    }
}

use std::convert::TryFrom;

/// One of the three worlds the target models. Any integer code outside
/// `{0,1,2}` has no corresponding `Dimension` (§3: "any other integer is
/// ignored").
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Dimension {
    Normal,
    Nether,
    End,
}

impl Dimension {
    /// The name the Reporter emits for `"world"`.
    pub fn report_name(self) -> &'static str {
        match self {
            Dimension::Normal => "world",
            Dimension::Nether => "world_nether",
            Dimension::End => "world_the_end",
        }
    }
}

impl TryFrom<i32> for Dimension {
    type Error = ();

    fn try_from(code: i32) -> Result<Dimension, ()> {
        match code {
            0 => Ok(Dimension::Normal),
            1 => Ok(Dimension::Nether),
            2 => Ok(Dimension::End),
            _ => Err(()),
        }
    }
}

/// Overworld-only weather flags (§3).
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Weather {
    pub rain: bool,
    pub thunder: bool,
}

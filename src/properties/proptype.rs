use serde::{Deserialize, Serialize};
use std::fmt::Display;
use uom::si::{angle::degree, f64::Angle};

#[non_exhaustive]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// The type of the [`Property`](crate::properties::Property).
pub enum Proptype {
    /// A string property
    String(String),
    /// An integer property
    I32(i32),
    /// A float property
    F64(f64),
    /// A boolean property
    Bool(bool),
    /// An angle property
    Angle(Angle),
}
impl Display for Proptype {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(value) => write!(f, "{value}"),
            Self::I32(value) => write!(f, "{value}"),
            Self::F64(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Angle(value) => write!(f, "{}°", value.get::<degree>()),
        }
    }
}
impl From<bool> for Proptype {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}
impl From<f64> for Proptype {
    fn from(value: f64) -> Self {
        Self::F64(value)
    }
}
impl From<String> for Proptype {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
impl From<&str> for Proptype {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}
impl From<i32> for Proptype {
    fn from(value: i32) -> Self {
        Self::I32(value)
    }
}
impl From<Angle> for Proptype {
    fn from(value: Angle) -> Self {
        Self::Angle(value)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    use crate::degree;
    use assert_matches::assert_matches;
    #[test]
    fn from() {
        assert_matches!(Proptype::from(true), Proptype::Bool(true));
        assert_matches!(Proptype::from(1), Proptype::I32(1));
        assert_matches!(Proptype::from("test"), Proptype::String(_));
        assert_matches!(Proptype::from(degree!(1.0)), Proptype::Angle(_));
        assert_eq!(Proptype::from(1.5), Proptype::F64(1.5));
    }
    #[test]
    fn display() {
        assert_eq!(format!("{}", Proptype::from("text")), "text");
        assert_eq!(format!("{}", Proptype::from(3)), "3");
        assert_eq!(format!("{}", Proptype::from(2.5)), "2.5");
        assert_eq!(format!("{}", Proptype::from(false)), "false");
        assert_eq!(format!("{}", Proptype::from(degree!(0.0))), "0°");
    }
}

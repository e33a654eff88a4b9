#![warn(missing_docs)]
//! Lightbench specific error structures
use std::{error::Error, fmt::Display};

/// Lightbench specific Result type
pub type LbResult<T> = std::result::Result<T, LbError>;

/// Errors that can be returned by various lightbench functions.
///
/// All of them are recoverable. Pure geometric degeneracies (parallel lines, rays missing a shape)
/// are not reported as errors but as "no intersection" (`None`).
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum LbError {
    /// a unit vector of a null vector was requested
    DivisionByZero,
    /// a scene without any light source was handed to the propagator
    NoLightSource,
    /// two lines are parallel or identical. The geometry functions report this as `None`.
    DegenerateLine,
    /// errors in connection with properties handling
    Properties(String),
    /// an unknown element type was requested from the registry
    Registry(String),
    /// error while reading, writing or setting up a [`Scene`](crate::scene::Scene)
    Scene(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for LbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "DivisionByZero:unit vector of a null vector"),
            Self::NoLightSource => write!(
                f,
                "NoLightSource:no light source provided! There has to be at least one!"
            ),
            Self::DegenerateLine => write!(f, "DegenerateLine:lines are parallel or identical"),
            Self::Properties(m) => write!(f, "Properties:{m}"),
            Self::Registry(m) => write!(f, "Registry:{m}"),
            Self::Scene(m) => write!(f, "Scene:{m}"),
            Self::Console(m) => write!(f, "Console:{m}"),
            Self::Other(m) => write!(f, "Lightbench Error:Other:{m}"),
        }
    }
}
impl Error for LbError {}

impl std::convert::From<String> for LbError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = LbError::from("test".to_string());
        assert_eq!(error, LbError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", LbError::DivisionByZero),
            "DivisionByZero:unit vector of a null vector"
        );
        assert_eq!(
            format!("{}", LbError::NoLightSource),
            "NoLightSource:no light source provided! There has to be at least one!"
        );
        assert_eq!(
            format!("{}", LbError::DegenerateLine),
            "DegenerateLine:lines are parallel or identical"
        );
        assert_eq!(
            format!("{}", LbError::Properties("test".to_string())),
            "Properties:test"
        );
        assert_eq!(
            format!("{}", LbError::Registry("test".to_string())),
            "Registry:test"
        );
        assert_eq!(format!("{}", LbError::Scene("test".to_string())), "Scene:test");
        assert_eq!(
            format!("{}", LbError::Console("test".to_string())),
            "Console:test"
        );
        assert_eq!(
            format!("{}", LbError::Other("test".to_string())),
            "Lightbench Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", LbError::Scene("test".to_string())),
            "Scene(\"test\")"
        );
        assert_eq!(format!("{:?}", LbError::NoLightSource), "NoLightSource");
    }
}

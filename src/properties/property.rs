use super::Proptype;
use crate::error::{LbError, LbResult};
use serde::{Deserialize, Serialize};
use std::mem;

/// (optical) Property
///
/// A property consists of the actual value (stored as [`Proptype`]) and a description.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(transparent)]
pub struct Property {
    prop: Proptype,
    #[serde(skip)]
    description: String,
}
impl Property {
    #[must_use]
    pub const fn new(prop: Proptype, description: String) -> Self {
        Self { prop, description }
    }
    /// Returns a reference to the actual property value (expressed as [`Proptype`] prop of this [`Property`].
    #[must_use]
    pub const fn prop(&self) -> &Proptype {
        &self.prop
    }
    /// Returns a reference to the description of this [`Property`].
    #[must_use]
    pub fn description(&self) -> &str {
        self.description.as_ref()
    }
    /// Sets the value of this [`Property`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the new value has a different type.
    pub fn set_value(&mut self, prop: Proptype) -> LbResult<()> {
        if mem::discriminant(&self.prop) != mem::discriminant(&prop) {
            return Err(LbError::Properties("incompatible value types".into()));
        }
        self.prop = prop;
        Ok(())
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn new() {
        let prop = Property::new(true.into(), "my description".to_string());
        assert_eq!(prop.description, "my description");
        assert_eq!(prop.prop, Proptype::Bool(true));
    }
    #[test]
    fn description() {
        let prop = Property::new(true.into(), "my description".to_string());
        assert_eq!(prop.description(), "my description");
    }
    #[test]
    fn set_different_type() {
        let mut prop = Property::new(Proptype::Bool(true), String::new());
        assert!(prop.set_value(Proptype::Bool(false)).is_ok());
        assert_eq!(prop.prop(), &Proptype::Bool(false));
        assert_eq!(
            prop.set_value(Proptype::F64(3.14)),
            Err(LbError::Properties("incompatible value types".into()))
        );
    }
}

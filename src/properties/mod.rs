//! Module for handling element properties
pub mod property;
pub mod proptype;

pub use property::Property;
pub use proptype::Proptype;

use crate::error::{LbError, LbResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uom::si::f64::Angle;

/// A general set of (optical) properties.
///
/// The property system is the data model used by external editors for inspecting and changing the
/// parameters of an element (such as focal length, refractive index, width, etc ...). Properties
/// have to be created once before they can be set and used.
///
/// ## Example
/// ```rust
/// use lightbench::properties::Properties;
/// let mut props = Properties::default();
/// props.create("my float", "my floating point value", 3.14.into()).unwrap();
/// props.set("my float", 2.71.into()).unwrap();
/// ```
#[derive(Default, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct Properties {
    props: BTreeMap<String, Property>,
}
impl Properties {
    /// Create a new property with the given name.
    ///
    /// # Errors
    ///
    /// This function will return an [`LbError`] if a property with the same name was already created before.
    pub fn create(&mut self, name: &str, description: &str, value: Proptype) -> LbResult<()> {
        if self.props.contains_key(name) {
            return Err(LbError::Properties(format!(
                "property {name} already created",
            )));
        }
        let new_property = Property::new(value, description.into());
        self.props.insert(name.into(), new_property);
        Ok(())
    }
    /// Returns the number of properties that have been set
    #[must_use]
    pub fn nr_of_props(&self) -> usize {
        self.props.len()
    }
    /// Set the value of the property with the given name.
    ///
    /// # Errors
    ///
    /// This function will return an [`LbError`] if
    ///   - the property with the given name does not exist (i.e. has not been created before).
    ///   - the value has a different type than the one used during creation.
    pub fn set(&mut self, name: &str, value: Proptype) -> LbResult<()> {
        let property = self
            .props
            .get_mut(name)
            .ok_or_else(|| LbError::Properties(format!("property {name} does not exist")))?;
        property.set_value(value)
    }
    /// Returns the iter of this [`Properties`].
    pub fn iter(&self) -> std::collections::btree_map::Iter<'_, String, Property> {
        self.props.iter()
    }
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }
    /// Return `true`if a property with the given name exists.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }
    /// Return the value of the given property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist.
    pub fn get(&self, name: &str) -> LbResult<&Proptype> {
        self.props.get(name).map_or_else(
            || {
                Err(LbError::Properties(format!(
                    "property {name} does not exist"
                )))
            },
            |prop| Ok(prop.prop()),
        )
    }
    /// Return the value of a boolean property.
    ///
    /// This is convenience function for easier access.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist or
    /// is not a boolean.
    pub fn get_bool(&self, name: &str) -> LbResult<bool> {
        if let Proptype::Bool(value) = self.get(name)? {
            Ok(*value)
        } else {
            Err(LbError::Properties(format!("{name} is not a bool property")))
        }
    }
    /// Return the value of a floating point property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist or
    /// is not a float.
    pub fn get_f64(&self, name: &str) -> LbResult<f64> {
        if let Proptype::F64(value) = self.get(name)? {
            Ok(*value)
        } else {
            Err(LbError::Properties(format!("{name} is not a float property")))
        }
    }
    /// Return the value of an integer property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist or
    /// is not an integer.
    pub fn get_i32(&self, name: &str) -> LbResult<i32> {
        if let Proptype::I32(value) = self.get(name)? {
            Ok(*value)
        } else {
            Err(LbError::Properties(format!(
                "{name} is not an integer property"
            )))
        }
    }
    /// Return the value of an angle property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist or
    /// is not an angle.
    pub fn get_angle(&self, name: &str) -> LbResult<Angle> {
        if let Proptype::Angle(value) = self.get(name)? {
            Ok(*value)
        } else {
            Err(LbError::Properties(format!("{name} is not an angle property")))
        }
    }
    /// Return the value of a string property.
    ///
    /// # Errors
    ///
    /// This function will return an error if the property with the given name does not exist or
    /// is not a string.
    pub fn get_string(&self, name: &str) -> LbResult<&str> {
        if let Proptype::String(value) = self.get(name)? {
            Ok(value)
        } else {
            Err(LbError::Properties(format!("{name} is not a string property")))
        }
    }
}

impl<'a> IntoIterator for &'a Properties {
    type IntoIter = std::collections::btree_map::Iter<'a, String, Property>;
    type Item = (&'a std::string::String, &'a Property);
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
